//! Conversation relay: forwards one utterance to the text generator.
//!
//! Each call is stateless from the model's point of view. The transcript the
//! user sees lives in [`ChatSession`] and is never sent back to the model.

use std::sync::Arc;

use crate::domain::ChatHistory;
use crate::ports::{GenerationError, TextGenerator};

/// Remove the echoed prompt from the front of a generated continuation.
///
/// Plain substring removal, repeated while the text still starts with the
/// prompt, then whitespace trimming. Whitespace around the prompt is ignored
/// when matching.
#[must_use]
pub fn strip_echo(prompt: &str, generated: &str) -> String {
    let prompt = prompt.trim();
    let mut rest = generated;
    if !prompt.is_empty() {
        loop {
            rest = rest.trim_start();
            match rest.strip_prefix(prompt) {
                Some(stripped) => rest = stripped,
                None => break,
            }
        }
    }
    rest.trim().to_string()
}

/// Stateless relay to the generation service.
pub struct ConversationRelay {
    generator: Arc<dyn TextGenerator>,
}

impl ConversationRelay {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    #[must_use]
    pub fn model_id(&self) -> &str {
        self.generator.model_id()
    }

    /// Get the bot's reply to `utterance`.
    ///
    /// # Errors
    /// Propagates any `GenerationError` from the generator.
    pub fn reply(&self, utterance: &str) -> Result<String, GenerationError> {
        tracing::debug!(
            "Relaying {} chars to {}",
            utterance.chars().count(),
            self.generator.model_id()
        );
        let generated = self.generator.generate(utterance)?;
        Ok(strip_echo(utterance, &generated))
    }
}

/// Per-session chat state.
///
/// An exchange is two-phase: [`ChatSession::begin`] accepts the utterance and
/// marks it pending, the relay call runs elsewhere, and
/// [`ChatSession::complete`] or [`ChatSession::fail`] settles it. At most one
/// exchange is pending at a time.
#[derive(Debug, Default)]
pub struct ChatSession {
    history: ChatHistory,
    pending: Option<String>,
}

impl ChatSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    /// Utterance whose reply is still outstanding.
    #[must_use]
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Accept `utterance` for relaying and return it unchanged.
    ///
    /// Blank input, or any input while an exchange is pending, is ignored and
    /// returns `None`.
    pub fn begin(&mut self, utterance: &str) -> Option<String> {
        if self.pending.is_some() || utterance.trim().is_empty() {
            return None;
        }
        self.pending = Some(utterance.to_string());
        Some(utterance.to_string())
    }

    /// Record the pending exchange with its reply.
    pub fn complete(&mut self, reply: String) {
        if let Some(utterance) = self.pending.take() {
            self.history.record_exchange(utterance, reply);
        }
    }

    /// Drop the pending exchange without recording anything.
    pub fn fail(&mut self) {
        self.pending = None;
    }
}
