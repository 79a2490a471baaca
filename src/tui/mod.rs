//! TUI module: Terminal User Interface using Ratatui.
//!
//! A sidebar selects one of seven panels:
//! - Home summary and news
//! - Diabetes risk check
//! - Profile and appointment forms
//! - About and knowledge pages
//! - Chatbot relayed to the text generation service

mod app;
mod panel;
mod styles;
mod ui;
mod worker;

pub use app::{App, Focus};
pub use panel::Panel;
pub use styles::Theme;
pub use worker::{ChatProgress, ChatWorker, ChatWorkerHandle};
