//! Panel identifiers for the sidebar router.

/// The seven mutually exclusive views, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Home,
    DiabetesCheck,
    Profile,
    Appointment,
    AboutUs,
    Knowledge,
    Chatbot,
}

impl Panel {
    pub const ALL: [Panel; 7] = [
        Self::Home,
        Self::DiabetesCheck,
        Self::Profile,
        Self::Appointment,
        Self::AboutUs,
        Self::Knowledge,
        Self::Chatbot,
    ];

    /// Sidebar label.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::DiabetesCheck => "Diabetes Check",
            Self::Profile => "Your Profile",
            Self::Appointment => "Doctor Appointment",
            Self::AboutUs => "About Us",
            Self::Knowledge => "Diabetes Knowledge",
            Self::Chatbot => "AI Chatbot",
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|p| *p == self)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Panel for a sidebar shortcut digit ('1'..='7').
    #[must_use]
    pub fn from_digit(c: char) -> Option<Self> {
        let n = c.to_digit(10)? as usize;
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl std::fmt::Display for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_wraps() {
        assert_eq!(Panel::Home.prev(), Panel::Chatbot);
        assert_eq!(Panel::Chatbot.next(), Panel::Home);
        assert_eq!(Panel::Home.next(), Panel::DiabetesCheck);
    }

    #[test]
    fn test_every_panel_reachable_by_next() {
        let mut panel = Panel::Home;
        let mut seen = vec![panel];
        for _ in 1..Panel::ALL.len() {
            panel = panel.next();
            seen.push(panel);
        }
        assert_eq!(seen, Panel::ALL.to_vec());
    }

    #[test]
    fn test_digit_shortcuts() {
        assert_eq!(Panel::from_digit('1'), Some(Panel::Home));
        assert_eq!(Panel::from_digit('7'), Some(Panel::Chatbot));
        assert_eq!(Panel::from_digit('0'), None);
        assert_eq!(Panel::from_digit('8'), None);
        assert_eq!(Panel::from_digit('x'), None);
    }

    #[test]
    fn test_titles_match_sidebar() {
        let titles: Vec<&str> = Panel::ALL.iter().map(|p| p.title()).collect();
        assert_eq!(
            titles,
            vec![
                "Home",
                "Diabetes Check",
                "Your Profile",
                "Doctor Appointment",
                "About Us",
                "Diabetes Knowledge",
                "AI Chatbot"
            ]
        );
    }
}
