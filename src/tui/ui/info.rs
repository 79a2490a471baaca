//! Static panels: Home, About Us and Diabetes Knowledge.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use super::render_panel_header;
use crate::content::{ABOUT_US, HOME_HINT, KNOWLEDGE, LAST_CHECKUP, NEWS_ITEMS};
use crate::tui::styles::Theme;

/// Render the home panel
pub fn render_home(f: &mut Frame, area: Rect, scroll: u16) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(5), // Last checkup
            Constraint::Min(4),    // News
            Constraint::Length(2), // Hint
        ])
        .split(area);

    render_panel_header(f, chunks[0], "Diabetes Health Dashboard", "Welcome!");
    render_last_checkup(f, chunks[1]);

    let news: Vec<Line> = NEWS_ITEMS
        .iter()
        .flat_map(|item| {
            [
                Line::from(vec![
                    Span::styled("• ", Theme::text_secondary()),
                    Span::styled(item.title, Theme::link()),
                ]),
                Line::from(Span::styled(format!("  {}", item.url), Theme::text_muted())),
            ]
        })
        .collect();

    let p = Paragraph::new(news)
        .block(
            Block::default()
                .title(Span::styled(" Latest Health News ", Theme::subtitle()))
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(p, chunks[2]);

    f.render_widget(
        Paragraph::new(Span::styled(HOME_HINT, Theme::info())),
        chunks[3],
    );
}

fn render_last_checkup(f: &mut Frame, area: Rect) {
    let header = Row::new(LAST_CHECKUP.iter().map(|(column, _)| Cell::from(*column)))
        .style(Theme::table_header());
    let values = Row::new(LAST_CHECKUP.iter().map(|(_, value)| Cell::from(*value))).style(Theme::text());

    let widths = vec![Constraint::Ratio(1, LAST_CHECKUP.len() as u32); LAST_CHECKUP.len()];
    let table = Table::new(vec![values], widths).header(header).block(
        Block::default()
            .title(Span::styled(" Your Last Checkup Summary ", Theme::subtitle()))
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );

    f.render_widget(table, area);
}

/// Render the About Us panel
pub fn render_about(f: &mut Frame, area: Rect, scroll: u16) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_panel_header(f, chunks[0], "About Us", "");

    let mut lines = Vec::with_capacity(ABOUT_US.len() * 2);
    for (i, paragraph) in ABOUT_US.iter().enumerate() {
        let style = if i == 0 { Theme::title() } else { Theme::text() };
        lines.push(Line::from(Span::styled(*paragraph, style)));
        lines.push(Line::from(""));
    }

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .scroll((scroll, 0)),
        chunks[1],
    );
}

/// Knowledge panel text, one line per heading, intro and bullet.
#[must_use]
pub fn knowledge_lines() -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for section in &KNOWLEDGE {
        lines.push(Line::from(Span::styled(section.heading, Theme::subtitle())));
        if let Some(intro) = section.intro {
            lines.push(Line::from(Span::styled(intro, Theme::text())));
        }
        for bullet in section.bullets {
            lines.push(Line::from(vec![
                Span::styled("  • ", Theme::text_secondary()),
                Span::styled(*bullet, Theme::text()),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines
}

/// Render the Diabetes Knowledge panel
pub fn render_knowledge(f: &mut Frame, area: Rect, scroll: u16) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    render_panel_header(f, chunks[0], "Diabetes Knowledge", "Learn the basics");

    f.render_widget(
        Paragraph::new(knowledge_lines())
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        chunks[1],
    );

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("[↑↓] ", Theme::key_hint()),
            Span::styled("Scroll ", Theme::key_desc()),
            Span::styled("[Esc] ", Theme::key_hint()),
            Span::styled("Sidebar", Theme::key_desc()),
        ])),
        chunks[2],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knowledge_covers_every_section() {
        let text: String = knowledge_lines()
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        assert!(text.contains("What is Diabetes?"));
        assert!(text.contains("Gestational Diabetes"));
        assert!(text.contains("Common Symptoms"));
        assert!(text.contains("Monitor blood sugar levels"));
    }
}
