//! Adapters layer: Concrete implementations of ports.
//!
//! - `artifacts`: JSON classifier and label-encoder artifacts
//! - `textgen`: HTTP text-generation client
//! - `sanitize`: redaction for log output

pub mod artifacts;
pub mod sanitize;
pub mod textgen;

pub use artifacts::ArtifactError;
