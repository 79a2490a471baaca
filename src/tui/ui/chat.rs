//! AI Chatbot panel.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::render_panel_header;
use crate::application::ChatSession;
use crate::domain::{ChatHistory, Speaker};
use crate::tui::styles::Theme;

const MAX_INPUT: usize = 500;

/// Chat input state. The transcript lives in the session, not here.
#[derive(Default)]
pub struct ChatState {
    pub input: String,
    pub error: Option<String>,
}

impl ChatState {
    pub fn input_char(&mut self, c: char) {
        if !c.is_control() && self.input.chars().count() < MAX_INPUT {
            self.input.push(c);
        }
    }

    pub fn delete_char(&mut self) {
        self.input.pop();
    }
}

/// Transcript as `You: …` / `Bot: …` lines.
#[must_use]
pub fn transcript_lines(history: &ChatHistory) -> Vec<Line<'_>> {
    history
        .turns()
        .iter()
        .map(|turn| {
            let style = match turn.speaker {
                Speaker::You => Theme::focused(),
                Speaker::Bot => Theme::success(),
            };
            Line::from(vec![
                Span::styled(format!("{}: ", turn.speaker), style),
                Span::styled(turn.text.as_str(), Theme::text()),
            ])
        })
        .collect()
}

/// Render the chatbot panel
pub fn render_chat(f: &mut Frame, area: Rect, state: &ChatState, session: &ChatSession, model_id: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(3),    // Transcript
            Constraint::Length(1), // Status
            Constraint::Length(3), // Input
        ])
        .split(area);

    render_panel_header(f, chunks[0], "AI Chatbot", model_id);

    let transcript_block = Block::default()
        .title(Span::styled(" Conversation ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());
    let inner = transcript_block.inner(chunks[1]);
    f.render_widget(transcript_block, chunks[1]);

    let mut lines = transcript_lines(session.history());
    if let Some(pending) = session.pending() {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", Speaker::You), Theme::focused()),
            Span::styled(pending, Theme::text()),
        ]));
    }
    let transcript = Paragraph::new(lines).wrap(Wrap { trim: false });
    // Keep the newest rows in view, counted after wrapping.
    let overflow = transcript
        .line_count(inner.width)
        .saturating_sub(usize::from(inner.height));
    f.render_widget(
        transcript.scroll((u16::try_from(overflow).unwrap_or(u16::MAX), 0)),
        inner,
    );

    let status = if session.pending().is_some() {
        Line::from(Span::styled("Bot is thinking…", Theme::warning()))
    } else if let Some(err) = &state.error {
        Line::from(Span::styled(
            format!("Something went wrong: {err}"),
            Theme::danger(),
        ))
    } else {
        Line::from(vec![
            Span::styled("[Enter] ", Theme::key_hint()),
            Span::styled("Send ", Theme::key_desc()),
            Span::styled("[Esc] ", Theme::key_hint()),
            Span::styled("Sidebar", Theme::key_desc()),
        ])
    };
    f.render_widget(Paragraph::new(status), chunks[2]);

    let input = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(state.input.as_str(), Theme::text()),
        Span::styled("▌", Theme::cursor()),
    ]))
    .block(
        Block::default()
            .title(Span::styled(" Type your message ", Theme::text_secondary()))
            .borders(Borders::ALL)
            .border_style(Theme::border_focused()),
    );
    f.render_widget(input, chunks[3]);
}
