//! Form fields shared by the check, profile and appointment panels.

use chrono::{NaiveDate, NaiveTime};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::tui::styles::Theme;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// What a field accepts and how it is edited.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Decimal or integer number within `[min, max]`
    Number { min: f64, max: f64, integer: bool },
    /// Closed list cycled with Left/Right
    Select { options: Vec<String>, selected: usize },
    /// Free text up to `max_len` characters
    Text { max_len: usize },
    /// `YYYY-MM-DD`
    Date,
    /// `HH:MM`
    Time,
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub hint: &'static str,
    pub kind: FieldKind,
    pub value: String,
}

impl FormField {
    pub fn number(label: &'static str, hint: &'static str, min: f64, max: f64, default: &str) -> Self {
        Self {
            label,
            hint,
            kind: FieldKind::Number {
                min,
                max,
                integer: false,
            },
            value: default.to_string(),
        }
    }

    pub fn integer(label: &'static str, hint: &'static str, min: f64, max: f64, default: &str) -> Self {
        Self {
            label,
            hint,
            kind: FieldKind::Number {
                min,
                max,
                integer: true,
            },
            value: default.to_string(),
        }
    }

    /// Select field starting on the first option.
    pub fn select(label: &'static str, options: Vec<String>) -> Self {
        Self {
            label,
            hint: "←/→ to change",
            kind: FieldKind::Select {
                options,
                selected: 0,
            },
            value: String::new(),
        }
    }

    pub fn text(label: &'static str, hint: &'static str, max_len: usize) -> Self {
        Self {
            label,
            hint,
            kind: FieldKind::Text { max_len },
            value: String::new(),
        }
    }

    pub fn date(label: &'static str, default: NaiveDate) -> Self {
        Self {
            label,
            hint: "YYYY-MM-DD",
            kind: FieldKind::Date,
            value: default.format(DATE_FORMAT).to_string(),
        }
    }

    pub fn time(label: &'static str, default: NaiveTime) -> Self {
        Self {
            label,
            hint: "HH:MM",
            kind: FieldKind::Time,
            value: default.format(TIME_FORMAT).to_string(),
        }
    }

    fn accepts(&self, c: char) -> bool {
        match &self.kind {
            FieldKind::Number { integer: true, .. } => c.is_ascii_digit(),
            FieldKind::Number { integer: false, .. } => c.is_ascii_digit() || c == '.',
            FieldKind::Select { .. } => false,
            FieldKind::Text { max_len } => !c.is_control() && self.value.chars().count() < *max_len,
            FieldKind::Date => (c.is_ascii_digit() || c == '-') && self.value.len() < 10,
            FieldKind::Time => (c.is_ascii_digit() || c == ':') && self.value.len() < 5,
        }
    }

    /// Currently chosen option of a select field.
    #[must_use]
    pub fn selected_option(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Select { options, selected } => options.get(*selected).map(String::as_str),
            _ => None,
        }
    }

    /// Text shown in the field box.
    #[must_use]
    pub fn display(&self) -> String {
        match &self.kind {
            FieldKind::Select { .. } => format!("◂ {} ▸", self.selected_option().unwrap_or("")),
            _ => self.value.clone(),
        }
    }

    /// Parse a number field and check its range.
    ///
    /// # Errors
    /// Returns a message naming the field when the value is not a number or
    /// is out of range.
    pub fn parse_number(&self) -> Result<f64, String> {
        let FieldKind::Number { min, max, .. } = self.kind else {
            return Err(format!("{}: Not a number field", self.label));
        };
        let value: f64 = self
            .value
            .trim()
            .parse()
            .map_err(|_| format!("{}: Invalid number", self.label))?;
        if !(min..=max).contains(&value) {
            return Err(format!(
                "{}: Value must be between {} and {}",
                self.label, min, max
            ));
        }
        Ok(value)
    }

    /// # Errors
    /// Returns a message naming the field when the value is not `YYYY-MM-DD`.
    pub fn parse_date(&self) -> Result<NaiveDate, String> {
        NaiveDate::parse_from_str(self.value.trim(), DATE_FORMAT)
            .map_err(|_| format!("{}: Expected a date as YYYY-MM-DD", self.label))
    }

    /// # Errors
    /// Returns a message naming the field when the value is not `HH:MM`.
    pub fn parse_time(&self) -> Result<NaiveTime, String> {
        NaiveTime::parse_from_str(self.value.trim(), TIME_FORMAT)
            .map_err(|_| format!("{}: Expected a time as HH:MM", self.label))
    }
}

/// Editable list of fields with one selected.
#[derive(Debug, Clone)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self {
            fields,
            selected_field: 0,
            error_message: None,
        }
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.selected_field = (self.selected_field + 1) % self.fields.len();
        }
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len().saturating_sub(1);
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current field. Returns whether the value changed.
    pub fn input_char(&mut self, c: char) -> bool {
        let Some(field) = self.fields.get_mut(self.selected_field) else {
            return false;
        };
        if !field.accepts(c) {
            return false;
        }
        field.value.push(c);
        self.error_message = None;
        true
    }

    /// Delete the last character. Returns whether the value changed.
    pub fn delete_char(&mut self) -> bool {
        let changed = self
            .fields
            .get_mut(self.selected_field)
            .is_some_and(|f| f.value.pop().is_some());
        if changed {
            self.error_message = None;
        }
        changed
    }

    /// Clear the current field. Returns whether the value changed.
    pub fn clear_field(&mut self) -> bool {
        match self.fields.get_mut(self.selected_field) {
            Some(field) if !field.value.is_empty() => {
                field.value.zeroize();
                self.error_message = None;
                true
            }
            _ => false,
        }
    }

    /// Step a select field by `delta` options, wrapping. Returns whether the
    /// choice changed.
    pub fn cycle(&mut self, delta: isize) -> bool {
        let Some(FormField {
            kind: FieldKind::Select { options, selected },
            ..
        }) = self.fields.get_mut(self.selected_field)
        else {
            return false;
        };
        let len = options.len() as isize;
        if len < 2 {
            return false;
        }
        *selected = (*selected as isize + delta).rem_euclid(len) as usize;
        self.error_message = None;
        true
    }

    #[must_use]
    pub fn field(&self, index: usize) -> &FormField {
        &self.fields[index]
    }

    /// Wipe all field buffers from memory.
    pub fn clear_sensitive(&mut self) {
        for field in &mut self.fields {
            field.value.zeroize();
        }
        self.error_message = None;
        self.selected_field = 0;
    }
}

/// Render `fields` (indices into `form`) row by row across `columns` columns.
pub fn render_field_grid(f: &mut Frame, area: Rect, form: &Form, fields: &[usize], columns: usize) {
    let columns = columns.max(1);
    let rows = fields.len().div_ceil(columns);
    let constraints: Vec<Constraint> = (0..rows)
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (row, chunk) in fields.chunks(columns).enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(row_areas[row]);

        for (col, &index) in chunk.iter().enumerate() {
            render_field(f, cells[col], &form.fields[index], index == form.selected_field);
        }
    }
}

fn render_field(f: &mut Frame, area: Rect, field: &FormField, is_selected: bool) {
    let border_style = if is_selected {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    let title_style = if is_selected {
        Theme::focused()
    } else {
        Theme::text_secondary()
    };

    let block = Block::default()
        .title(Span::styled(format!(" {} ", field.label), title_style))
        .borders(Borders::ALL)
        .border_style(border_style);

    let shown = field.display();
    let value_display = if shown.is_empty() {
        Span::styled(field.hint, Theme::text_muted())
    } else {
        Span::styled(shown, Theme::text())
    };

    let editable = !matches!(field.kind, FieldKind::Select { .. });
    let content = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        value_display,
        if is_selected && editable {
            Span::styled("▌", Theme::cursor())
        } else {
            Span::raw("")
        },
    ]))
    .block(block);

    f.render_widget(content, area);
}

/// Footer showing the form error or the key hints.
pub fn render_form_footer(f: &mut Frame, area: Rect, form: &Form, hints: &[(&str, &str)]) {
    let content = if let Some(err) = &form.error_message {
        Line::from(vec![
            Span::styled("! ", Theme::danger()),
            Span::styled(err.clone(), Theme::danger()),
        ])
    } else {
        Line::from(
            hints
                .iter()
                .flat_map(|(key, desc)| {
                    [
                        Span::styled(format!("[{key}] "), Theme::key_hint()),
                        Span::styled(format!("{desc} "), Theme::key_desc()),
                    ]
                })
                .collect::<Vec<_>>(),
        )
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );

    f.render_widget(footer, area);
}
