//! Label encoders for the categorical features.
//!
//! Same semantics as a fitted scikit-learn `LabelEncoder`: the vocabulary is
//! sorted and unique, and a label's code is its index.

use serde::{Deserialize, Serialize};

/// Error type for encoder lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncoderError {
    #[error("{encoder}: unknown label {label:?}")]
    UnknownLabel { encoder: String, label: String },

    #[error("{encoder}: unknown code {code}")]
    UnknownCode { encoder: String, code: usize },

    #[error("{encoder}: invalid vocabulary: {reason}")]
    InvalidVocabulary { encoder: String, reason: String },
}

/// A closed label vocabulary fitted outside this application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    /// Name used in error messages (e.g. "gender")
    #[serde(default)]
    name: String,

    classes: Vec<String>,
}

impl LabelEncoder {
    /// Create an encoder from a fitted vocabulary.
    ///
    /// # Errors
    /// Returns `InvalidVocabulary` if the classes are empty, unsorted or repeated.
    pub fn new(name: impl Into<String>, classes: Vec<String>) -> Result<Self, EncoderError> {
        let encoder = Self {
            name: name.into(),
            classes,
        };
        encoder.check()?;
        Ok(encoder)
    }

    /// Re-check invariants, e.g. after deserialization.
    ///
    /// # Errors
    /// Returns `InvalidVocabulary` if the classes are empty, unsorted or repeated.
    pub fn check(&self) -> Result<(), EncoderError> {
        let invalid = |reason: &str| EncoderError::InvalidVocabulary {
            encoder: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.classes.is_empty() {
            return Err(invalid("no classes"));
        }
        if self.classes.windows(2).any(|w| w[0] >= w[1]) {
            return Err(invalid("classes must be sorted and unique"));
        }
        Ok(())
    }

    /// Set the display name (artifacts may omit it).
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Encode a label.
    ///
    /// # Errors
    /// Returns `UnknownLabel` for any value outside the vocabulary.
    pub fn transform(&self, label: &str) -> Result<usize, EncoderError> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(label))
            .map_err(|_| EncoderError::UnknownLabel {
                encoder: self.name.clone(),
                label: label.to_string(),
            })
    }

    /// Decode a code back to its label.
    ///
    /// # Errors
    /// Returns `UnknownCode` if the code is out of range.
    pub fn inverse_transform(&self, code: usize) -> Result<&str, EncoderError> {
        self.classes
            .get(code)
            .map(String::as_str)
            .ok_or_else(|| EncoderError::UnknownCode {
                encoder: self.name.clone(),
                code,
            })
    }
}
