//! UI module: View components for the TUI.

pub mod appointment;
pub mod chat;
pub mod check;
pub mod form;
pub mod info;
pub mod profile;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::panel::Panel;
use crate::tui::styles::Theme;

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![Span::styled(
            "DISCLAIMER: Predictions are indicative estimates and do not replace professional medical evaluation.",
            Theme::text_muted(),
        )]),
        Line::from(vec![
            Span::styled("[Ctrl+Q] ", Theme::key_hint()),
            Span::styled("Quit", Theme::key_desc()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Theme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

/// Title line with an optional secondary caption.
pub fn render_panel_header(f: &mut Frame, area: Rect, title: &str, caption: &str) {
    let mut spans = vec![
        Span::styled(" ", Theme::text()),
        Span::styled(title.to_string(), Theme::title()),
    ];
    if !caption.is_empty() {
        spans.push(Span::styled(format!(" │ {caption}"), Theme::text_secondary()));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );

    f.render_widget(header, area);
}

/// Sidebar menu; `focused` when keys go to the sidebar.
pub fn render_sidebar(f: &mut Frame, area: Rect, current: Panel, focused: bool) {
    let mut lines: Vec<Line> = Panel::ALL
        .iter()
        .enumerate()
        .map(|(i, panel)| {
            let label = format!(" {} {:<20}", i + 1, panel.title());
            if *panel == current {
                Line::from(Span::styled(label, Theme::selected()))
            } else {
                Line::from(Span::styled(label, Theme::text_secondary()))
            }
        })
        .collect();

    lines.push(Line::from(""));
    let hint = if focused {
        "[↑↓] Move  [Enter] Open"
    } else {
        "[Esc] Back to menu"
    };
    lines.push(Line::from(Span::styled(hint, Theme::text_muted())));

    let block = Block::default()
        .title(Span::styled(" Navigation ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        });

    f.render_widget(Paragraph::new(lines).block(block), area);
}
