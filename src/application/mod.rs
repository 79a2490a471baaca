//! Application layer: Use cases and services.
//!
//! This module wires domain types to ports for the two use cases that reach
//! beyond the UI: risk prediction and the chat relay.

mod conversation;
mod prediction;

pub use conversation::{strip_echo, ChatSession, ConversationRelay};
pub use prediction::PredictionService;
