//! Profile and appointment form records.
//!
//! Captured for the current render only; nothing here is stored.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Basic contact details typed into the profile panel.
///
/// `Debug` does not print the values.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct ProfileRecord {
    pub full_name: String,
    #[zeroize(skip)]
    pub age: Option<u8>,
    pub email: String,
    pub phone: String,
}

impl std::fmt::Debug for ProfileRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileRecord")
            .field("full_name_len", &self.full_name.len())
            .field("age", &self.age)
            .field("email_len", &self.email.len())
            .field("phone_len", &self.phone.len())
            .finish()
    }
}

/// Kind of doctor an appointment is requested with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Specialist {
    Diabetologist,
    GeneralPhysician,
    Endocrinologist,
}

impl Specialist {
    pub const ALL: [Specialist; 3] = [
        Self::Diabetologist,
        Self::GeneralPhysician,
        Self::Endocrinologist,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Diabetologist => "Diabetologist",
            Self::GeneralPhysician => "General Physician",
            Self::Endocrinologist => "Endocrinologist",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl std::fmt::Display for Specialist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A request typed into the appointment panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentRequest {
    pub specialist: Specialist,
    pub preferred_date: NaiveDate,
    pub preferred_time: NaiveTime,
    pub symptoms: String,
}

impl AppointmentRequest {
    /// Confirmation shown once the request is accepted.
    pub const CONFIRMATION: &'static str =
        "Appointment request submitted! You will be contacted soon.";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specialist_labels_round_trip() {
        for specialist in Specialist::ALL {
            assert_eq!(Specialist::from_label(specialist.label()), Some(specialist));
        }
        assert_eq!(Specialist::from_label("Cardiologist"), None);
    }

    #[test]
    fn test_profile_debug_hides_values() {
        let profile = ProfileRecord {
            full_name: "Jane Roe".to_string(),
            age: Some(40),
            email: "jane@example.org".to_string(),
            phone: "555-010-0199".to_string(),
        };
        let debug = format!("{profile:?}");
        assert!(!debug.contains("Jane"));
        assert!(!debug.contains("example.org"));
        assert!(debug.contains("email_len"));
    }
}
