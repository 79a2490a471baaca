//! Main TUI application state machine.
//!
//! Handles:
//! - Sidebar navigation between the seven panels
//! - Input event handling
//! - Service integration
//! - Chat replies via background worker

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use zeroize::Zeroize;

use crate::adapters::artifacts::Artifacts;
use crate::adapters::textgen::HttpTextGenerator;
use crate::application::{ChatSession, ConversationRelay, PredictionService};
use crate::content::{ABOUT_US, NEWS_ITEMS};
use crate::Config;

use super::panel::Panel;
use super::ui::{
    appointment::{render_appointment, AppointmentState},
    chat::{render_chat, ChatState},
    check::{render_check, CheckState},
    form::Form,
    info::{knowledge_lines, render_about, render_home, render_knowledge},
    profile::{render_profile, ProfileState},
    render_disclaimer, render_sidebar,
};
use super::worker::{ChatProgress, ChatWorker, ChatWorkerHandle};

/// Where key presses go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Panel,
}

/// Main application state
pub struct App {
    /// Current panel
    panel: Panel,

    focus: Focus,

    /// Whether the app should quit
    should_quit: bool,

    prediction: Arc<PredictionService>,

    relay: Arc<ConversationRelay>,

    /// Chat transcript for this session
    session: ChatSession,

    check_state: CheckState,

    profile_state: ProfileState,

    appointment_state: AppointmentState,

    chat_state: ChatState,

    /// Scroll offset of the static panels
    scroll: u16,

    /// Pending chat worker (if running)
    pending_worker: Option<ChatWorkerHandle>,
}

impl App {
    /// Create a new application instance from configuration.
    ///
    /// Loads the classifier and encoders and builds the generation client.
    /// For more control, use `with_dependencies()`.
    ///
    /// # Errors
    /// Returns error if the artifacts cannot be loaded or verified, or the
    /// HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let model_dir = config.model_dir.as_path();
        if !model_dir.exists() {
            return Err(anyhow!(
                "Model directory not found at {:?}. Set GLYCODASH_MODEL_DIR to a directory containing the model and encoder files.",
                model_dir
            ));
        }

        // Refuse to start without a loadable, verified classifier.
        let Artifacts {
            classifier,
            gender,
            smoking,
        } = Artifacts::load(model_dir)
            .map_err(|e| anyhow!("Failed to load artifacts from {:?}: {}", model_dir, e))?;
        let prediction = Arc::new(PredictionService::new(Arc::new(classifier), gender, smoking));

        let generator = HttpTextGenerator::new(
            &config.textgen_url,
            &config.textgen_model,
            config.textgen_token.clone(),
        )?;
        let relay = Arc::new(ConversationRelay::new(Arc::new(generator)));

        Ok(Self::with_dependencies(prediction, relay))
    }

    /// Create application with injected services (Composition Root pattern).
    pub fn with_dependencies(prediction: Arc<PredictionService>, relay: Arc<ConversationRelay>) -> Self {
        let check_state = CheckState::new(prediction.gender_classes(), prediction.smoking_classes());
        Self {
            panel: Panel::Home,
            focus: Focus::Sidebar,
            should_quit: false,
            prediction,
            relay,
            session: ChatSession::new(),
            check_state,
            profile_state: ProfileState::default(),
            appointment_state: AppointmentState::default(),
            chat_state: ChatState::default(),
            scroll: 0,
            pending_worker: None,
        }
    }

    #[must_use]
    pub fn panel(&self) -> Panel {
        self.panel
    }

    #[must_use]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    #[must_use]
    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main loop
        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        self.profile_state.wipe();
        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            // Pick up a finished chat reply, if any
            self.poll_worker();

            terminal.draw(|f| self.render(f))?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Release {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Draw the whole screen: sidebar, current panel and disclaimer.
    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(f.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(28), Constraint::Min(0)])
            .split(chunks[0]);

        render_sidebar(f, columns[0], self.panel, self.focus == Focus::Sidebar);

        let content_area = columns[1];
        match self.panel {
            Panel::Home => render_home(f, content_area, self.scroll),
            Panel::DiabetesCheck => render_check(f, content_area, &self.check_state),
            Panel::Profile => render_profile(f, content_area, &self.profile_state),
            Panel::Appointment => render_appointment(f, content_area, &self.appointment_state),
            Panel::AboutUs => render_about(f, content_area, self.scroll),
            Panel::Knowledge => render_knowledge(f, content_area, self.scroll),
            Panel::Chatbot => render_chat(
                f,
                content_area,
                &self.chat_state,
                &self.session,
                self.relay.model_id(),
            ),
        }

        render_disclaimer(f, chunks[1]);
    }

    /// Poll the background worker for a finished reply.
    pub fn poll_worker(&mut self) {
        let Some(progress) = self
            .pending_worker
            .as_ref()
            .and_then(ChatWorkerHandle::try_recv)
        else {
            return;
        };

        self.pending_worker = None;

        match progress {
            ChatProgress::Complete(reply) => {
                self.session.complete(reply);
                tracing::info!(
                    "Chat exchange recorded ({} exchanges this session)",
                    self.session.history().exchanges()
                );
            }
            ChatProgress::Error(message) => {
                self.session.fail();
                self.chat_state.error = Some(message);
            }
        }
    }

    /// Switch panels. The panel being entered starts from a fresh state; the
    /// chat transcript and any in-flight reply are kept.
    fn select_panel(&mut self, panel: Panel) {
        if panel == self.panel {
            return;
        }
        if self.panel == Panel::Profile {
            self.profile_state.wipe();
        }

        self.panel = panel;
        self.scroll = 0;
        match panel {
            Panel::DiabetesCheck => {
                self.check_state = CheckState::new(
                    self.prediction.gender_classes(),
                    self.prediction.smoking_classes(),
                );
            }
            Panel::Profile => self.profile_state = ProfileState::default(),
            Panel::Appointment => self.appointment_state = AppointmentState::default(),
            Panel::Chatbot => {
                self.chat_state.input.clear();
                self.chat_state.error = None;
            }
            Panel::Home | Panel::AboutUs | Panel::Knowledge => {}
        }
        tracing::debug!("Panel: {}", panel);
    }

    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.focus {
            Focus::Sidebar => self.handle_sidebar_key(key),
            Focus::Panel => {
                if key == KeyCode::Esc {
                    self.focus = Focus::Sidebar;
                    return;
                }
                match self.panel {
                    Panel::Home | Panel::AboutUs | Panel::Knowledge => self.handle_scroll_key(key),
                    Panel::DiabetesCheck => self.handle_check_key(key),
                    Panel::Profile => self.handle_profile_key(key),
                    Panel::Appointment => self.handle_appointment_key(key),
                    Panel::Chatbot => self.handle_chat_key(key),
                }
            }
        }
    }

    fn handle_sidebar_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => self.select_panel(self.panel.prev()),
            KeyCode::Down | KeyCode::Char('j') => self.select_panel(self.panel.next()),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(panel) = Panel::from_digit(c) {
                    self.select_panel(panel);
                }
            }
            KeyCode::Enter | KeyCode::Tab | KeyCode::Right => self.focus = Focus::Panel,
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            _ => {}
        }
    }

    fn scroll_limit(&self) -> u16 {
        let lines = match self.panel {
            Panel::Home => NEWS_ITEMS.len() * 2,
            Panel::AboutUs => ABOUT_US.len() * 2,
            Panel::Knowledge => knowledge_lines().len(),
            _ => 0,
        };
        u16::try_from(lines).unwrap_or(u16::MAX)
    }

    fn handle_scroll_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll = (self.scroll + 1).min(self.scroll_limit()),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll = (self.scroll + 10).min(self.scroll_limit()),
            KeyCode::Home => self.scroll = 0,
            _ => {}
        }
    }

    fn handle_check_key(&mut self, key: KeyCode) {
        if key == KeyCode::Enter {
            self.check_state.submit(&self.prediction);
            return;
        }
        let changed = edit_form(&mut self.check_state.form, key);
        self.check_state.on_edit(changed);
    }

    fn handle_profile_key(&mut self, key: KeyCode) {
        if key == KeyCode::Enter {
            self.profile_state.check();
            return;
        }
        let changed = edit_form(&mut self.profile_state.form, key);
        self.profile_state.on_edit(changed);
    }

    fn handle_appointment_key(&mut self, key: KeyCode) {
        if key == KeyCode::Enter {
            self.appointment_state.submit();
            return;
        }
        let changed = edit_form(&mut self.appointment_state.form, key);
        self.appointment_state.on_edit(changed);
    }

    fn handle_chat_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char(c) => self.chat_state.input_char(c),
            KeyCode::Backspace => self.chat_state.delete_char(),
            KeyCode::Enter => self.send_chat(),
            _ => {}
        }
    }

    fn send_chat(&mut self) {
        let Some(message) = self.session.begin(&self.chat_state.input) else {
            return;
        };
        self.chat_state.input.zeroize();
        self.chat_state.error = None;
        tracing::info!("Chat message sent ({} chars)", message.chars().count());
        self.pending_worker = Some(ChatWorker::spawn(self.relay.clone(), message));
    }
}

/// Shared field editing keys. Returns whether a value changed.
fn edit_form(form: &mut Form, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::BackTab => {
            form.prev_field();
            false
        }
        KeyCode::Down | KeyCode::Tab => {
            form.next_field();
            false
        }
        KeyCode::Left => form.cycle(-1),
        KeyCode::Right => form.cycle(1),
        KeyCode::Char(c) => form.input_char(c),
        KeyCode::Backspace => form.delete_char(),
        KeyCode::Delete => form.clear_field(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LabelEncoder, PredictionResult};
    use crate::ports::{Classifier, ClassifierError, GenerationError, TextGenerator};
    use crate::tui::ui::check::CheckOutcome;
    use ratatui::backend::TestBackend;

    struct FixedClassifier {
        names: Vec<String>,
        probability: f64,
    }

    impl Classifier for FixedClassifier {
        fn feature_names(&self) -> &[String] {
            &self.names
        }

        fn predict(&self, _features: &[f64]) -> Result<PredictionResult, ClassifierError> {
            Ok(PredictionResult::from_probability(self.probability))
        }
    }

    /// Echoes the prompt followed by a canned continuation.
    struct EchoGenerator;

    impl TextGenerator for EchoGenerator {
        fn model_id(&self) -> &str {
            "echo"
        }

        fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            Ok(format!("{prompt} nice to meet you"))
        }
    }

    struct DownGenerator;

    impl TextGenerator for DownGenerator {
        fn model_id(&self) -> &str {
            "down"
        }

        fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            Err(GenerationError::Service {
                status: 503,
                message: "model loading".into(),
            })
        }
    }

    fn classes(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn create_test_app(generator: Arc<dyn TextGenerator>) -> App {
        let classifier = FixedClassifier {
            names: classes(&crate::domain::FEATURE_NAMES),
            probability: 0.8,
        };
        let gender = LabelEncoder::new("gender", classes(&["Female", "Male", "Other"])).expect("gender");
        let smoking = LabelEncoder::new("smoking_history", classes(&["current", "never"])).expect("smoking");
        let prediction = Arc::new(PredictionService::new(Arc::new(classifier), gender, smoking));
        let relay = Arc::new(ConversationRelay::new(generator));
        App::with_dependencies(prediction, relay)
    }

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn open(app: &mut App, panel: Panel) {
        press(app, KeyCode::Esc);
        let digit = char::from_digit(panel.index() as u32 + 1, 10).expect("digit");
        press(app, KeyCode::Char(digit));
        press(app, KeyCode::Enter);
    }

    fn wait_for_reply(app: &mut App) {
        for _ in 0..500 {
            app.poll_worker();
            if app.session().pending().is_none() {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("chat worker did not finish");
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).expect("terminal");
        terminal.draw(|f| app.render(f)).expect("draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_starts_on_home_with_sidebar_focus() {
        let app = create_test_app(Arc::new(EchoGenerator));
        assert_eq!(app.panel(), Panel::Home);
        assert_eq!(app.focus(), Focus::Sidebar);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_sidebar_navigation() {
        let mut app = create_test_app(Arc::new(EchoGenerator));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.panel(), Panel::DiabetesCheck);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.panel(), Panel::Chatbot);
        press(&mut app, KeyCode::Char('6'));
        assert_eq!(app.panel(), Panel::Knowledge);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focus(), Focus::Panel);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus(), Focus::Sidebar);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = create_test_app(Arc::new(EchoGenerator));
        open(&mut app, Panel::Chatbot);
        type_text(&mut app, "q");
        assert!(!app.should_quit());
        assert_eq!(app.chat_state.input, "q");

        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit());

        let mut app = create_test_app(Arc::new(EchoGenerator));
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_check_submit_and_edit() {
        let mut app = create_test_app(Arc::new(EchoGenerator));
        open(&mut app, Panel::DiabetesCheck);
        press(&mut app, KeyCode::Enter);
        match &app.check_state.outcome {
            Some(CheckOutcome::Prediction(result)) => assert_eq!(result.label, 1),
            other => panic!("expected prediction, got {other:?}"),
        }
        assert!(screen_text(&app).contains("The person is likely to have diabetes"));

        // Cycling a selector counts as an edit
        press(&mut app, KeyCode::Right);
        assert!(app.check_state.outcome.is_none());
    }

    #[test]
    fn test_check_state_resets_on_reentry() {
        let mut app = create_test_app(Arc::new(EchoGenerator));
        open(&mut app, Panel::DiabetesCheck);
        press(&mut app, KeyCode::Enter);
        assert!(app.check_state.outcome.is_some());

        open(&mut app, Panel::Home);
        open(&mut app, Panel::DiabetesCheck);
        assert!(app.check_state.outcome.is_none());
    }

    #[test]
    fn test_profile_wiped_on_leave() {
        let mut app = create_test_app(Arc::new(EchoGenerator));
        open(&mut app, Panel::Profile);
        type_text(&mut app, "Jordan");
        assert_eq!(app.profile_state.form.fields[0].value, "Jordan");

        open(&mut app, Panel::AboutUs);
        assert!(app.profile_state.form.fields.iter().all(|f| f.value.is_empty()));
    }

    #[test]
    fn test_appointment_confirmation() {
        let mut app = create_test_app(Arc::new(EchoGenerator));
        open(&mut app, Panel::Appointment);
        press(&mut app, KeyCode::Enter);
        assert!(app.appointment_state.submitted.is_some());
        assert!(screen_text(&app).contains("Appointment request submitted!"));
    }

    #[test]
    fn test_chat_exchange_recorded() {
        let mut app = create_test_app(Arc::new(EchoGenerator));
        open(&mut app, Panel::Chatbot);
        type_text(&mut app, "hello");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().pending(), Some("hello"));
        assert!(app.chat_state.input.is_empty());
        assert!(screen_text(&app).contains("Bot is thinking"));

        // A second send while one is in flight is ignored
        type_text(&mut app, "again");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.chat_state.input, "again");

        wait_for_reply(&mut app);
        let turns = app.session().history().turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].text, "hello");
        assert_eq!(turns[1].text, "nice to meet you");
        assert!(screen_text(&app).contains("Bot: nice to meet you"));
    }

    #[test]
    fn test_blank_chat_ignored() {
        let mut app = create_test_app(Arc::new(EchoGenerator));
        open(&mut app, Panel::Chatbot);
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert!(app.session().pending().is_none());
        assert!(app.pending_worker.is_none());
    }

    #[test]
    fn test_chat_failure_records_nothing() {
        let mut app = create_test_app(Arc::new(DownGenerator));
        open(&mut app, Panel::Chatbot);
        type_text(&mut app, "hi");
        press(&mut app, KeyCode::Enter);
        wait_for_reply(&mut app);

        assert!(app.session().history().is_empty());
        assert!(app.chat_state.error.is_some());
        assert!(screen_text(&app).contains("Something went wrong"));
    }

    #[test]
    fn test_history_survives_panel_switch() {
        let mut app = create_test_app(Arc::new(EchoGenerator));
        open(&mut app, Panel::Chatbot);
        type_text(&mut app, "hello");
        press(&mut app, KeyCode::Enter);
        open(&mut app, Panel::Home);
        wait_for_reply(&mut app);
        open(&mut app, Panel::Chatbot);
        assert_eq!(app.session().history().exchanges(), 1);
    }

    #[test]
    fn test_scroll_is_bounded() {
        let mut app = create_test_app(Arc::new(EchoGenerator));
        open(&mut app, Panel::Knowledge);
        for _ in 0..200 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.scroll, app.scroll_limit());
        press(&mut app, KeyCode::Home);
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn test_every_panel_renders() {
        let body = [
            (Panel::Home, "Your Last Checkup Summary"),
            (Panel::DiabetesCheck, "Personal Information"),
            (Panel::Profile, "You can use this section"),
            (Panel::Appointment, "Select Specialist"),
            (Panel::AboutUs, "Our mission"),
            (Panel::Knowledge, "What is Diabetes?"),
            (Panel::Chatbot, "Type your message"),
        ];
        let mut app = create_test_app(Arc::new(EchoGenerator));
        for (panel, expected) in body {
            open(&mut app, panel);
            assert_eq!(app.panel(), panel);
            let text = screen_text(&app);
            assert!(text.contains(expected), "{panel} body missing {expected:?}");
        }
        assert_eq!(body.len(), Panel::ALL.len());
    }

    #[test]
    fn test_chat_sends_raw_input() {
        let mut app = create_test_app(Arc::new(EchoGenerator));
        open(&mut app, Panel::Chatbot);
        type_text(&mut app, "  hello  ");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().pending(), Some("  hello  "));

        wait_for_reply(&mut app);
        let turns = app.session().history().turns();
        assert_eq!(turns[0].text, "  hello  ");
        assert_eq!(turns[1].text, "nice to meet you");
    }
}
