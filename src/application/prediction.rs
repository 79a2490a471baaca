//! Prediction service: clinical record in, risk prediction out.
//!
//! Encodes the categorical fields with the fitted encoders, assembles the
//! feature vector in training order and evaluates the classifier. Every
//! failure propagates to the caller unchanged; there is no fallback encoding
//! and no retry.

use std::sync::Arc;

use crate::domain::{ClinicalRecord, LabelEncoder, PredictionResult};
use crate::ports::Classifier;
use crate::GlycodashError;

/// Read-only prediction pipeline shared by the UI.
pub struct PredictionService {
    classifier: Arc<dyn Classifier>,
    gender: LabelEncoder,
    smoking: LabelEncoder,
}

impl PredictionService {
    /// Create a new prediction service.
    pub fn new(classifier: Arc<dyn Classifier>, gender: LabelEncoder, smoking: LabelEncoder) -> Self {
        Self {
            classifier,
            gender,
            smoking,
        }
    }

    /// Gender vocabulary, in code order.
    #[must_use]
    pub fn gender_classes(&self) -> &[String] {
        self.gender.classes()
    }

    /// Smoking-history vocabulary, in code order.
    #[must_use]
    pub fn smoking_classes(&self) -> &[String] {
        self.smoking.classes()
    }

    /// Run one prediction.
    ///
    /// # Errors
    /// Returns `GlycodashError::Validation` for out-of-range measurements,
    /// `GlycodashError::Encoding` for a categorical value outside the encoder
    /// vocabulary and `GlycodashError::Classifier` if the model rejects the
    /// feature vector.
    pub fn predict(&self, record: &ClinicalRecord) -> Result<PredictionResult, GlycodashError> {
        record
            .validate()
            .map_err(|errors| GlycodashError::Validation(errors.join("; ")))?;

        let gender_code = self.gender.transform(&record.gender)?;
        let smoking_code = self.smoking.transform(&record.smoking_history)?;

        let features = record.to_features(gender_code, smoking_code);
        let result = self.classifier.predict(&features)?;

        tracing::info!(
            "Prediction complete: label={}, probability={:.2}",
            result.label,
            result.probability
        );

        Ok(result)
    }
}
