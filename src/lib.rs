//! # Glycodash
//!
//! Terminal health dashboard for diabetes risk.
//!
//! This crate provides:
//! - Risk prediction from a pre-trained classifier artifact
//! - A relay to a remote text-generation model for the chat panel
//! - Terminal UI with seven panels (home, check, profile, appointment,
//!   about, knowledge, chat)
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (ClinicalRecord, PredictionResult, LabelEncoder, ChatHistory)
//! - `ports`: Trait definitions for the classifier and the text generator
//! - `adapters`: Concrete implementations (JSON artifacts, HTTP generation, log redaction)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod content;
pub mod domain;
pub mod ports;
pub mod tui;

pub use config::Config;
pub use domain::{ClinicalRecord, PredictionResult};

/// Result type for Glycodash operations
pub type Result<T> = std::result::Result<T, GlycodashError>;

/// Main error type for Glycodash
#[derive(Debug, thiserror::Error)]
pub enum GlycodashError {
    #[error("Artifact loading failed: {0}")]
    Artifact(#[from] adapters::ArtifactError),

    #[error("Encoding failed: {0}")]
    Encoding(#[from] domain::EncoderError),

    #[error("Prediction failed: {0}")]
    Classifier(#[from] ports::ClassifierError),

    #[error("Chat relay failed: {0}")]
    Generation(#[from] ports::GenerationError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
