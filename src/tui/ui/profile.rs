//! Your Profile panel.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::form::{render_field_grid, render_form_footer, Form, FormField};
use super::render_panel_header;
use crate::content::PROFILE_NOTE;
use crate::domain::ProfileRecord;
use crate::tui::styles::Theme;

const NAME: usize = 0;
const AGE: usize = 1;
const EMAIL: usize = 2;
const PHONE: usize = 3;

/// Profile form state. Values live only as long as the panel is shown.
pub struct ProfileState {
    pub form: Form,
    pub checked: bool,
}

impl Default for ProfileState {
    fn default() -> Self {
        Self {
            form: Form::new(vec![
                FormField::text("Full Name", "", 80),
                FormField::integer("Age", "years (0-120)", 0.0, 120.0, ""),
                FormField::text("Email", "", 120),
                FormField::text("Phone Number", "", 32),
            ]),
            checked: false,
        }
    }
}

impl ProfileState {
    pub fn on_edit(&mut self, changed: bool) {
        if changed {
            self.checked = false;
        }
    }

    /// Read the typed values. An empty age is allowed.
    ///
    /// # Errors
    /// Returns a message when the age is not a number in range.
    pub fn to_record(&self) -> Result<ProfileRecord, String> {
        let age_field = self.form.field(AGE);
        let age = if age_field.value.trim().is_empty() {
            None
        } else {
            Some(age_field.parse_number()? as u8)
        };

        Ok(ProfileRecord {
            full_name: self.form.field(NAME).value.trim().to_string(),
            age,
            email: self.form.field(EMAIL).value.trim().to_string(),
            phone: self.form.field(PHONE).value.trim().to_string(),
        })
    }

    /// Check the typed values; nothing is kept.
    pub fn check(&mut self) {
        match self.to_record() {
            Ok(record) => {
                tracing::debug!("Profile form checked: {:?}", record);
                self.form.error_message = None;
                self.checked = true;
            }
            Err(message) => {
                self.form.error_message = Some(message);
                self.checked = false;
            }
        }
    }

    /// Zeroize every buffer.
    pub fn wipe(&mut self) {
        self.form.clear_sensitive();
        self.checked = false;
    }
}

impl Drop for ProfileState {
    fn drop(&mut self) {
        self.wipe();
    }
}

/// Render the profile panel
pub fn render_profile(f: &mut Frame, area: Rect, state: &ProfileState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(6), // Fields
            Constraint::Min(2),    // Note
            Constraint::Length(2), // Footer
        ])
        .split(area);

    render_panel_header(f, chunks[0], "Your Profile", "Basic contact details");
    render_field_grid(f, chunks[1], &state.form, &[NAME, AGE, EMAIL, PHONE], 2);

    let mut lines = vec![Line::from(Span::styled(PROFILE_NOTE, Theme::info()))];
    if state.checked {
        lines.push(Line::from(Span::styled(
            "Details look good. Nothing is stored.",
            Theme::success(),
        )));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[2]);

    render_form_footer(
        f,
        chunks[3],
        &state.form,
        &[("↑↓", "Navigate"), ("Enter", "Check"), ("Esc", "Sidebar")],
    );
}
