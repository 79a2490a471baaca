//! Text generation port: Trait for the external chat model.

/// Fixed generation cap passed with every request.
pub const MAX_LENGTH: u32 = 100;

/// End-of-text token id, used as the padding token.
pub const PAD_TOKEN_ID: u32 = 50256;

/// Errors from the generation service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("Generation request failed: {0}")]
    Transport(String),

    #[error("Generation service error ({status}): {message}")]
    Service { status: u16, message: String },

    #[error("Generation service returned no candidates")]
    EmptyResponse,

    #[error("Malformed generation response: {0}")]
    Malformed(String),
}

/// A stateless text continuation service.
///
/// Each call sees only the prompt it is given; no conversation state is kept
/// on either side.
pub trait TextGenerator: Send + Sync {
    /// Identifier of the model behind this generator.
    fn model_id(&self) -> &str;

    /// Generate a continuation of `prompt`.
    ///
    /// The returned text may echo the prompt at its start.
    ///
    /// # Errors
    /// Returns `GenerationError` if the service cannot be reached or answers
    /// with an error or an unexpected payload.
    fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
