//! Doctor Appointment panel.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::form::{render_field_grid, render_form_footer, Form, FormField};
use super::render_panel_header;
use crate::domain::{AppointmentRequest, Specialist};
use crate::tui::styles::Theme;

const SPECIALIST: usize = 0;
const DATE: usize = 1;
const TIME: usize = 2;
const SYMPTOMS: usize = 3;

/// Appointment form state
#[derive(Debug, Clone)]
pub struct AppointmentState {
    pub form: Form,
    pub submitted: Option<AppointmentRequest>,
}

impl Default for AppointmentState {
    fn default() -> Self {
        Self::starting_at(Local::now().naive_local())
    }
}

impl AppointmentState {
    /// Form pre-filled with `now`, to the minute.
    pub fn starting_at(now: NaiveDateTime) -> Self {
        let time = now
            .time()
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or_else(|| now.time());
        Self::with_defaults(now.date(), time)
    }

    /// Form pre-filled with the given date and time.
    pub fn with_defaults(date: NaiveDate, time: NaiveTime) -> Self {
        let specialists = Specialist::ALL.iter().map(|s| s.label().to_string()).collect();
        Self {
            form: Form::new(vec![
                FormField::select("Select Specialist", specialists),
                FormField::date("Preferred Date", date),
                FormField::time("Preferred Time", time),
                FormField::text("Describe your symptoms (optional)", "", 500),
            ]),
            submitted: None,
        }
    }

    pub fn on_edit(&mut self, changed: bool) {
        if changed {
            self.submitted = None;
        }
    }

    /// # Errors
    /// Returns a message when the date or time does not parse.
    pub fn to_request(&self) -> Result<AppointmentRequest, String> {
        let specialist_field = self.form.field(SPECIALIST);
        let specialist = specialist_field
            .selected_option()
            .and_then(Specialist::from_label)
            .ok_or_else(|| format!("{}: Unknown specialist", specialist_field.label))?;

        Ok(AppointmentRequest {
            specialist,
            preferred_date: self.form.field(DATE).parse_date()?,
            preferred_time: self.form.field(TIME).parse_time()?,
            symptoms: self.form.field(SYMPTOMS).value.trim().to_string(),
        })
    }

    /// Validate and accept the request; nothing is sent or stored.
    pub fn submit(&mut self) {
        match self.to_request() {
            Ok(request) => {
                tracing::info!(
                    "Appointment request accepted: specialist={}, symptoms_len={}",
                    request.specialist,
                    request.symptoms.chars().count()
                );
                self.form.error_message = None;
                self.submitted = Some(request);
            }
            Err(message) => {
                self.form.error_message = Some(message);
                self.submitted = None;
            }
        }
    }
}

/// Render the appointment panel
pub fn render_appointment(f: &mut Frame, area: Rect, state: &AppointmentState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(6), // Specialist, date, time
            Constraint::Length(3), // Symptoms
            Constraint::Min(2),    // Confirmation
            Constraint::Length(2), // Footer
        ])
        .split(area);

    render_panel_header(f, chunks[0], "Doctor Appointment", "Book Doctor Appointment");
    render_field_grid(f, chunks[1], &state.form, &[SPECIALIST, DATE, TIME], 2);
    render_field_grid(f, chunks[2], &state.form, &[SYMPTOMS], 1);

    if let Some(request) = &state.submitted {
        let lines = vec![
            Line::from(Span::styled(AppointmentRequest::CONFIRMATION, Theme::success())),
            Line::from(Span::styled(
                format!(
                    "{} on {} at {}",
                    request.specialist,
                    request.preferred_date.format("%Y-%m-%d"),
                    request.preferred_time.format("%H:%M")
                ),
                Theme::text_secondary(),
            )),
        ];
        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[3]);
    }

    render_form_footer(
        f,
        chunks[4],
        &state.form,
        &[
            ("↑↓", "Navigate"),
            ("←→", "Change"),
            ("Enter", "Book Appointment"),
            ("Esc", "Sidebar"),
        ],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppointmentState {
        AppointmentState::with_defaults(
            NaiveDate::from_ymd_opt(2025, 10, 1).expect("date"),
            NaiveTime::from_hms_opt(14, 30, 0).expect("time"),
        )
    }

    #[test]
    fn test_defaults_submit() {
        let mut state = state();
        state.submit();
        let request = state.submitted.clone().expect("accepted");
        assert_eq!(request.specialist, Specialist::Diabetologist);
        assert_eq!(request.preferred_date.to_string(), "2025-10-01");
        assert_eq!(request.preferred_time.format("%H:%M").to_string(), "14:30");
        assert!(request.symptoms.is_empty());
        assert!(state.form.error_message.is_none());
    }

    #[test]
    fn test_specialist_and_symptoms() {
        let mut state = state();
        state.form.cycle(1);
        state.form.selected_field = SYMPTOMS;
        for c in "thirsty all day".chars() {
            state.form.input_char(c);
        }

        let request = state.to_request().expect("request");
        assert_eq!(request.specialist, Specialist::GeneralPhysician);
        assert_eq!(request.symptoms, "thirsty all day");
    }

    #[test]
    fn test_invalid_date_rejected() {
        let mut state = state();
        state.form.selected_field = DATE;
        state.form.clear_field();
        for c in "2025-13-01".chars() {
            state.form.input_char(c);
        }
        state.submit();
        assert!(state.submitted.is_none());
        assert!(state
            .form
            .error_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Preferred Date")));
    }

    #[test]
    fn test_edit_hides_confirmation() {
        let mut state = state();
        state.submit();
        assert!(state.submitted.is_some());
        state.form.selected_field = TIME;
        let changed = state.form.delete_char();
        state.on_edit(changed);
        assert!(state.submitted.is_none());
    }

    #[test]
    fn test_prefilled_from_current_moment() {
        let now = NaiveDate::from_ymd_opt(2026, 3, 9)
            .and_then(|d| d.and_hms_milli_opt(8, 5, 42, 250))
            .expect("datetime");
        let request = AppointmentState::starting_at(now)
            .to_request()
            .expect("defaults parse");
        assert_eq!(request.preferred_date.to_string(), "2026-03-09");
        assert_eq!(request.preferred_time.format("%H:%M:%S").to_string(), "08:05:00");
    }
}
