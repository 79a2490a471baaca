//! Background chat worker.
//!
//! A relay call can take as long as the generation service does. Running it
//! off the UI thread keeps the dashboard drawing while the reply is pending.
//! There is no cancellation: once started, the call runs to completion.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::application::ConversationRelay;

/// Outcome reported by the chat worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatProgress {
    /// Reply with the echo already stripped
    Complete(String),
    /// The relay call failed
    Error(String),
}

/// Handle to a running chat request.
pub struct ChatWorkerHandle {
    progress_rx: Receiver<ChatProgress>,
    _handle: JoinHandle<()>,
}

impl ChatWorkerHandle {
    /// Try to receive the result (non-blocking).
    ///
    /// A worker that dies without reporting is surfaced as an error.
    #[must_use]
    pub fn try_recv(&self) -> Option<ChatProgress> {
        match self.progress_rx.try_recv() {
            Ok(progress) => Some(progress),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(ChatProgress::Error(
                "chat worker stopped unexpectedly".to_string(),
            )),
        }
    }
}

/// Runs one relay call on a background thread.
pub struct ChatWorker;

impl ChatWorker {
    /// Spawn a background relay call for `utterance`.
    pub fn spawn(relay: Arc<ConversationRelay>, utterance: String) -> ChatWorkerHandle {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            Self::run(&relay, &utterance, &tx);
        });

        ChatWorkerHandle {
            progress_rx: rx,
            _handle: handle,
        }
    }

    fn run(relay: &ConversationRelay, utterance: &str, tx: &Sender<ChatProgress>) {
        let progress = match relay.reply(utterance) {
            Ok(reply) => ChatProgress::Complete(reply),
            Err(e) => {
                tracing::warn!("Chat relay failed: {}", e);
                ChatProgress::Error(e.to_string())
            }
        };
        // Receiver gone means the app exited; nothing left to notify.
        let _ = tx.send(progress);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{GenerationError, TextGenerator};
    use std::time::{Duration, Instant};

    struct Canned(Result<String, GenerationError>);

    impl TextGenerator for Canned {
        fn model_id(&self) -> &str {
            "canned"
        }

        fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            self.0.clone()
        }
    }

    fn relay(result: Result<String, GenerationError>) -> Arc<ConversationRelay> {
        Arc::new(ConversationRelay::new(Arc::new(Canned(result))))
    }

    fn poll(handle: &ChatWorkerHandle) -> ChatProgress {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(progress) = handle.try_recv() {
                return progress;
            }
            assert!(Instant::now() < deadline, "worker did not report");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_worker_reports_stripped_reply() {
        let handle = ChatWorker::spawn(relay(Ok("hello there friend".into())), "hello".into());
        assert_eq!(poll(&handle), ChatProgress::Complete("there friend".into()));
    }

    #[test]
    fn test_worker_reports_error() {
        let handle = ChatWorker::spawn(relay(Err(GenerationError::EmptyResponse)), "hi".into());
        match poll(&handle) {
            ChatProgress::Error(message) => assert!(!message.is_empty()),
            other => panic!("expected error, got {other:?}"),
        }
    }
}
