//! Prediction result types.
//!
//! Represents the output of the diabetes classifier.

use serde::{Deserialize, Serialize};

/// Interpretation of the binary label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Label 0
    Unlikely,
    /// Label 1
    Likely,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unlikely => write!(f, "unlikely"),
            Self::Likely => write!(f, "likely"),
        }
    }
}

/// Classifier output for one record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Binary prediction (0 = no diabetes, 1 = diabetes)
    pub label: u8,

    /// Probability of the positive class (0.0 to 1.0)
    pub probability: f64,
}

impl PredictionResult {
    /// Build a result from the positive-class probability.
    ///
    /// The label is 1 only when the positive class strictly wins.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        let probability = probability.clamp(0.0, 1.0);
        Self {
            label: u8::from(probability > 0.5),
            probability,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        if self.label == 1 {
            Outcome::Likely
        } else {
            Outcome::Unlikely
        }
    }

    /// One-line summary shown under the prediction form.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "The person is {} to have diabetes (Probability: {:.2})",
            self.outcome(),
            self.probability
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_probability() {
        assert_eq!(PredictionResult::from_probability(0.1).label, 0);
        assert_eq!(PredictionResult::from_probability(0.5).label, 0);
        assert_eq!(PredictionResult::from_probability(0.51).label, 1);
    }

    #[test]
    fn test_probability_is_clamped() {
        let result = PredictionResult::from_probability(1.2);
        assert!((result.probability - 1.0).abs() < f64::EPSILON);
        assert_eq!(result.outcome(), Outcome::Likely);
    }

    #[test]
    fn test_summary_wording() {
        assert_eq!(
            PredictionResult::from_probability(0.62).summary(),
            "The person is likely to have diabetes (Probability: 0.62)"
        );
        assert_eq!(
            PredictionResult::from_probability(0.041).summary(),
            "The person is unlikely to have diabetes (Probability: 0.04)"
        );
    }
}
