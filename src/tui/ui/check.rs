//! Diabetes Check panel: clinical input form and prediction result.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::form::{render_field_grid, render_form_footer, Form, FormField};
use super::render_panel_header;
use crate::application::PredictionService;
use crate::domain::{ClinicalRecord, PredictionResult};
use crate::tui::styles::Theme;

// Field indices, row-major over the two-column grid.
const GENDER: usize = 0;
const SMOKING: usize = 1;
const AGE: usize = 2;
const BMI: usize = 3;
const HYPERTENSION: usize = 4;
const HBA1C: usize = 5;
const HEART_DISEASE: usize = 6;
const GLUCOSE: usize = 7;

const PERSONAL: [usize; 4] = [GENDER, SMOKING, AGE, BMI];
const MEDICAL: [usize; 4] = [HYPERTENSION, HBA1C, HEART_DISEASE, GLUCOSE];

/// Last submission result.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    Prediction(PredictionResult),
    Failure(String),
}

/// Diabetes Check form state
#[derive(Debug, Clone)]
pub struct CheckState {
    pub form: Form,
    pub outcome: Option<CheckOutcome>,
}

fn binary_options() -> Vec<String> {
    vec!["0".to_string(), "1".to_string()]
}

impl CheckState {
    /// Fresh form with default values; selectors start on the first
    /// vocabulary entry.
    pub fn new(gender_classes: &[String], smoking_classes: &[String]) -> Self {
        let fields = vec![
            FormField::select("Gender", gender_classes.to_vec()),
            FormField::select("Smoking History", smoking_classes.to_vec()),
            FormField::integer("Age", "years (0-120)", 0.0, 120.0, "30"),
            FormField::number("BMI", "kg/m² (10-70)", 10.0, 70.0, "25.0"),
            FormField::select("Hypertension", binary_options()),
            FormField::number("HbA1c Level", "% (3-15)", 3.0, 15.0, "5.5"),
            FormField::select("Heart Disease", binary_options()),
            FormField::integer("Blood Glucose Level", "mg/dL (50-300)", 50.0, 300.0, "100"),
        ];

        Self {
            form: Form::new(fields),
            outcome: None,
        }
    }

    /// Any edit invalidates the displayed result.
    pub fn on_edit(&mut self, changed: bool) {
        if changed {
            self.outcome = None;
        }
    }

    /// Validate the form and build a clinical record.
    ///
    /// # Errors
    /// Returns the first field that fails to parse, or every range violation.
    pub fn to_record(&self) -> Result<ClinicalRecord, String> {
        let select = |index: usize| -> Result<String, String> {
            let field = self.form.field(index);
            field
                .selected_option()
                .map(str::to_string)
                .ok_or_else(|| format!("{}: No option available", field.label))
        };
        let flag = |index: usize| -> Result<u8, String> {
            select(index)?
                .parse()
                .map_err(|_| format!("{}: Expected 0 or 1", self.form.field(index).label))
        };

        let record = ClinicalRecord {
            gender: select(GENDER)?,
            age: self.form.field(AGE).parse_number()?,
            hypertension: flag(HYPERTENSION)?,
            heart_disease: flag(HEART_DISEASE)?,
            smoking_history: select(SMOKING)?,
            bmi: self.form.field(BMI).parse_number()?,
            hba1c_level: self.form.field(HBA1C).parse_number()?,
            blood_glucose_level: self.form.field(GLUCOSE).parse_number()?,
        };

        record.validate().map_err(|errors| errors.join("; "))?;
        Ok(record)
    }

    /// Run a prediction and store the outcome.
    pub fn submit(&mut self, service: &PredictionService) {
        let outcome = match self.to_record() {
            Ok(record) => match service.predict(&record) {
                Ok(result) => CheckOutcome::Prediction(result),
                Err(e) => {
                    tracing::warn!("Prediction failed: {}", e);
                    CheckOutcome::Failure(e.to_string())
                }
            },
            Err(message) => CheckOutcome::Failure(message),
        };
        self.outcome = Some(outcome);
    }
}

/// Render the Diabetes Check panel
pub fn render_check(f: &mut Frame, area: Rect, state: &CheckState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(8), // Personal information
            Constraint::Length(8), // Medical history
            Constraint::Min(3),    // Result
            Constraint::Length(2), // Footer
        ])
        .split(area);

    render_panel_header(f, chunks[0], "Diabetes Check", "Enter the following details");
    render_section(f, chunks[1], state, "Personal Information", &PERSONAL);
    render_section(f, chunks[2], state, "Medical History", &MEDICAL);
    render_outcome(f, chunks[3], state.outcome.as_ref());
    render_form_footer(
        f,
        chunks[4],
        &state.form,
        &[
            ("↑↓", "Navigate"),
            ("←→", "Change"),
            ("Enter", "Predict"),
            ("Esc", "Sidebar"),
        ],
    );
}

fn render_section(f: &mut Frame, area: Rect, state: &CheckState, title: &str, fields: &[usize]) {
    let block = Block::default()
        .title(Span::styled(format!(" {title} "), Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());
    let inner = block.inner(area);
    f.render_widget(block, area);

    render_field_grid(f, inner, &state.form, fields, 2);
}

fn render_outcome(f: &mut Frame, area: Rect, outcome: Option<&CheckOutcome>) {
    let line = match outcome {
        None => Line::from(Span::styled(
            "Press Enter to predict diabetes risk.",
            Theme::text_muted(),
        )),
        Some(CheckOutcome::Prediction(result)) => Line::from(vec![
            Span::styled("● ", Theme::outcome(result.outcome())),
            Span::styled(result.summary(), Theme::outcome(result.outcome())),
        ]),
        Some(CheckOutcome::Failure(message)) => Line::from(vec![
            Span::styled("! ", Theme::danger()),
            Span::styled(format!("Something went wrong: {message}"), Theme::danger()),
        ]),
    };

    let p = Paragraph::new(line)
        .block(
            Block::default()
                .title(Span::styled(" Result ", Theme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::artifacts::Artifacts;
    use std::path::Path;
    use std::sync::Arc;

    fn classes(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn state() -> CheckState {
        CheckState::new(
            &classes(&["Female", "Male", "Other"]),
            &classes(&["No Info", "current", "ever", "former", "never", "not current"]),
        )
    }

    fn shipped_service() -> PredictionService {
        let artifacts = Artifacts::load(Path::new("models")).expect("artifacts");
        PredictionService::new(Arc::new(artifacts.classifier), artifacts.gender, artifacts.smoking)
    }

    fn set_value(state: &mut CheckState, index: usize, value: &str) {
        state.form.selected_field = index;
        state.form.clear_field();
        for c in value.chars() {
            state.form.input_char(c);
        }
    }

    #[test]
    fn test_defaults() {
        let record = state().to_record().expect("defaults are valid");
        assert_eq!(record.gender, "Female");
        assert_eq!(record.smoking_history, "No Info");
        assert!((record.age - 30.0).abs() < f64::EPSILON);
        assert!((record.bmi - 25.0).abs() < f64::EPSILON);
        assert_eq!(record.hypertension, 0);
        assert_eq!(record.heart_disease, 0);
        assert!((record.hba1c_level - 5.5).abs() < f64::EPSILON);
        assert!((record.blood_glucose_level - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_selectors_feed_record() {
        let mut state = state();
        state.form.selected_field = GENDER;
        state.form.cycle(1);
        state.form.selected_field = HYPERTENSION;
        state.form.cycle(1);
        state.form.selected_field = SMOKING;
        state.form.cycle(-2);

        let record = state.to_record().expect("record");
        assert_eq!(record.gender, "Male");
        assert_eq!(record.hypertension, 1);
        assert_eq!(record.smoking_history, "never");
    }

    #[test]
    fn test_out_of_range_is_reported() {
        let mut state = state();
        set_value(&mut state, BMI, "9");
        let err = state.to_record().expect_err("bmi below range");
        assert!(err.contains("BMI"));
    }

    #[test]
    fn test_submit_shows_prediction() {
        let mut state = state();
        state.submit(&shipped_service());
        match &state.outcome {
            Some(CheckOutcome::Prediction(result)) => {
                assert_eq!(result.label, 0);
                assert!(result.summary().starts_with("The person is unlikely"));
            }
            other => panic!("expected prediction, got {other:?}"),
        }
    }

    #[test]
    fn test_high_risk_submission() {
        let mut state = state();
        state.form.selected_field = GENDER;
        state.form.cycle(1);
        state.form.selected_field = SMOKING;
        state.form.cycle(3); // former
        state.form.selected_field = HYPERTENSION;
        state.form.cycle(1);
        state.form.selected_field = HEART_DISEASE;
        state.form.cycle(1);
        set_value(&mut state, AGE, "70");
        set_value(&mut state, BMI, "35");
        set_value(&mut state, HBA1C, "8.5");
        set_value(&mut state, GLUCOSE, "240");

        state.submit(&shipped_service());
        match &state.outcome {
            Some(CheckOutcome::Prediction(result)) => assert_eq!(result.label, 1),
            other => panic!("expected prediction, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_vocabulary_is_failure() {
        let mut state = CheckState::new(&classes(&["Unknown"]), &classes(&["never"]));
        state.submit(&shipped_service());
        assert!(matches!(state.outcome, Some(CheckOutcome::Failure(_))));
    }

    #[test]
    fn test_edit_hides_result() {
        let mut state = state();
        state.submit(&shipped_service());
        assert!(state.outcome.is_some());

        state.on_edit(false);
        assert!(state.outcome.is_some());

        state.form.selected_field = AGE;
        let changed = state.form.input_char('1');
        state.on_edit(changed);
        assert!(state.outcome.is_none());
    }
}
