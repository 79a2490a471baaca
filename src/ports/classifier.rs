//! Classifier port: Trait for the pre-trained risk model.
//!
//! Abstracts the serialized artifact format from the prediction use case.

use crate::domain::PredictionResult;

/// Errors raised while evaluating a classifier.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifierError {
    #[error("Feature count mismatch: got {got}, expected {expected}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("Non-finite feature value at column {column} ({name})")]
    NonFinite { column: usize, name: String },
}

/// Binary classifier over a fixed feature vector.
///
/// Implementations are loaded once and evaluated read-only, so they must be
/// shareable across threads.
pub trait Classifier: Send + Sync {
    /// Column names in training order.
    fn feature_names(&self) -> &[String];

    /// Score one feature vector.
    ///
    /// Must be deterministic for a given loaded model.
    ///
    /// # Errors
    /// Returns `ClassifierError::ShapeMismatch` if `features` does not have
    /// exactly `feature_names().len()` entries.
    fn predict(&self, features: &[f64]) -> Result<PredictionResult, ClassifierError>;
}
