//! Chat transcript types.

use serde::{Deserialize, Serialize};

/// Who produced a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    You,
    Bot,
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::You => write!(f, "You"),
            Self::Bot => write!(f, "Bot"),
        }
    }
}

/// One line of the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub text: String,
}

/// Session transcript.
///
/// Append-only: the only mutation records a whole exchange, so the history
/// always holds `2 * exchanges()` turns alternating You/Bot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatHistory {
    turns: Vec<ChatTurn>,
}

impl ChatHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user utterance and the bot's reply.
    pub fn record_exchange(&mut self, utterance: impl Into<String>, reply: impl Into<String>) {
        self.turns.push(ChatTurn {
            speaker: Speaker::You,
            text: utterance.into(),
        });
        self.turns.push(ChatTurn {
            speaker: Speaker::Bot,
            text: reply.into(),
        });
    }

    #[must_use]
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of completed user/bot exchanges.
    #[must_use]
    pub fn exchanges(&self) -> usize {
        self.turns.len() / 2
    }
}
