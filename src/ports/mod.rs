//! Ports layer: Trait definitions for external collaborators.
//!
//! These traits keep the trained model artifact and the remote chat model
//! behind boundaries the application layer can be tested against.

mod classifier;
mod text_generator;

pub use classifier::{Classifier, ClassifierError};
pub use text_generator::{GenerationError, TextGenerator, MAX_LENGTH, PAD_TOKEN_ID};
