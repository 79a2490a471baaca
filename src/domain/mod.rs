//! Domain layer: Core types for the dashboard.
//!
//! Plain data and pure lookups; nothing here performs I/O.

mod chat;
mod encoder;
mod forms;
mod prediction;
mod record;

pub use chat::{ChatHistory, ChatTurn, Speaker};
pub use encoder::{EncoderError, LabelEncoder};
pub use forms::{AppointmentRequest, ProfileRecord, Specialist};
pub use prediction::{Outcome, PredictionResult};
pub use record::{ClinicalRecord, FEATURE_COUNT, FEATURE_NAMES};
