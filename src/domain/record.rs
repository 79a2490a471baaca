//! Clinical measurements for diabetes risk prediction.
//!
//! Field set and order follow the classifier artifact's training columns.

use serde::{Deserialize, Serialize};

/// Number of features the classifier consumes.
pub const FEATURE_COUNT: usize = 8;

/// Column names in the order the classifier was trained on.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "gender",
    "age",
    "hypertension",
    "heart_disease",
    "smoking_history",
    "bmi",
    "HbA1c_level",
    "blood_glucose_level",
];

/// One set of clinical inputs, built fresh for each prediction request.
///
/// Categorical fields hold the raw label; encoding to integers happens in
/// [`crate::application::PredictionService`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalRecord {
    /// Gender label from the gender encoder's vocabulary
    pub gender: String,

    /// Age in years (0-120)
    pub age: f64,

    /// Hypertension: 0 = no, 1 = yes
    pub hypertension: u8,

    /// Heart disease: 0 = no, 1 = yes
    pub heart_disease: u8,

    /// Smoking history label from the smoking encoder's vocabulary
    pub smoking_history: String,

    /// Body mass index (10.0-70.0)
    pub bmi: f64,

    /// Glycated haemoglobin in % (3.0-15.0)
    pub hba1c_level: f64,

    /// Blood glucose in mg/dL (50-300)
    pub blood_glucose_level: f64,
}

impl ClinicalRecord {
    /// Assemble the feature vector from already-encoded categorical codes.
    ///
    /// Order matches [`FEATURE_NAMES`].
    #[must_use]
    pub fn to_features(&self, gender_code: usize, smoking_code: usize) -> [f64; FEATURE_COUNT] {
        [
            gender_code as f64,
            self.age,
            f64::from(self.hypertension),
            f64::from(self.heart_disease),
            smoking_code as f64,
            self.bmi,
            self.hba1c_level,
            self.blood_glucose_level,
        ]
    }

    /// Check every numeric field against the input ranges.
    ///
    /// # Errors
    /// Returns one message per offending field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(0.0..=120.0).contains(&self.age) {
            errors.push(format!("Age {} out of range [0, 120]", self.age));
        }
        if self.hypertension > 1 {
            errors.push(format!("Hypertension {} must be 0 or 1", self.hypertension));
        }
        if self.heart_disease > 1 {
            errors.push(format!("Heart disease {} must be 0 or 1", self.heart_disease));
        }
        if !(10.0..=70.0).contains(&self.bmi) {
            errors.push(format!("BMI {} out of range [10, 70]", self.bmi));
        }
        if !(3.0..=15.0).contains(&self.hba1c_level) {
            errors.push(format!("HbA1c {} out of range [3, 15]", self.hba1c_level));
        }
        if !(50.0..=300.0).contains(&self.blood_glucose_level) {
            errors.push(format!(
                "Blood glucose {} out of range [50, 300]",
                self.blood_glucose_level
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ClinicalRecord {
        ClinicalRecord {
            gender: "Female".to_string(),
            age: 45.0,
            hypertension: 0,
            heart_disease: 0,
            smoking_history: "never".to_string(),
            bmi: 22.0,
            hba1c_level: 5.2,
            blood_glucose_level: 95.0,
        }
    }

    #[test]
    fn test_features_follow_training_order() {
        let features = sample().to_features(0, 4);
        assert_eq!(features.len(), FEATURE_NAMES.len());
        assert!((features[0] - 0.0).abs() < f64::EPSILON);
        assert!((features[1] - 45.0).abs() < f64::EPSILON);
        assert!((features[4] - 4.0).abs() < f64::EPSILON);
        assert!((features[7] - 95.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validation() {
        assert!(sample().validate().is_ok());

        let invalid = ClinicalRecord {
            age: 130.0,
            hypertension: 2,
            bmi: 5.0,
            ..sample()
        };
        let errors = invalid.validate().expect_err("should reject");
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let edge = ClinicalRecord {
            age: 0.0,
            bmi: 70.0,
            hba1c_level: 3.0,
            blood_glucose_level: 300.0,
            ..sample()
        };
        assert!(edge.validate().is_ok());
    }
}
