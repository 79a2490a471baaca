//! Dashboard color palette and styles.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::Outcome;

/// Dashboard theme.
pub struct Theme;

impl Theme {
    // === Primary Colors ===

    /// Slate navy, headings
    pub const PRIMARY: Color = Color::Rgb(44, 62, 80); // #2C3E50

    /// Sky blue, highlights and focus
    pub const ACCENT: Color = Color::Rgb(56, 189, 248); // #38BDF8

    pub const ACCENT_DARK: Color = Color::Rgb(3, 105, 161); // #0369A1

    // === Semantic Colors ===

    pub const SUCCESS: Color = Color::Rgb(16, 185, 129); // #10B981
    pub const WARNING: Color = Color::Rgb(251, 191, 36); // #FBBF24
    pub const DANGER: Color = Color::Rgb(244, 63, 94); // #F43F5E
    pub const INFO: Color = Color::Rgb(59, 130, 246); // #3B82F6

    // === Text Colors ===

    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    pub const BORDER: Color = Color::Rgb(71, 85, 105); // #475569

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    #[must_use]
    pub fn info() -> Style {
        Style::default().fg(Self::INFO)
    }

    /// Link text (news headlines)
    #[must_use]
    pub fn link() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Highlighted sidebar entry
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::ACCENT_DARK)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    #[must_use]
    pub fn table_header() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    /// Prediction outcome style: success when unlikely, danger when likely.
    #[must_use]
    pub fn outcome(outcome: Outcome) -> Style {
        match outcome {
            Outcome::Unlikely => Self::success(),
            Outcome::Likely => Self::danger(),
        }
    }
}
