use ratatui::style::Color;

/// The two visual variants of the original app, collapsed into one
/// palette the rest of the UI reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    /// Focused pane border.
    pub accent: Color,
    /// Unfocused pane border.
    pub border: Color,
    pub heading: Color,
    pub dim: Color,
    pub user: Color,
    pub assistant: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub bar_bg: Color,
    pub bar_fg: Color,
}

pub const MIDNIGHT: Theme = Theme {
    name: "midnight",
    accent: Color::Cyan,
    border: Color::DarkGray,
    heading: Color::Yellow,
    dim: Color::DarkGray,
    user: Color::Cyan,
    assistant: Color::Magenta,
    highlight_bg: Color::Blue,
    highlight_fg: Color::White,
    bar_bg: Color::DarkGray,
    bar_fg: Color::White,
};

pub const PAPER: Theme = Theme {
    name: "paper",
    accent: Color::Blue,
    border: Color::Gray,
    heading: Color::Red,
    dim: Color::Gray,
    user: Color::Blue,
    assistant: Color::Green,
    highlight_bg: Color::LightBlue,
    highlight_fg: Color::Black,
    bar_bg: Color::Gray,
    bar_fg: Color::Black,
};

impl Theme {
    pub fn by_name(name: &str) -> Option<Theme> {
        match name {
            "midnight" => Some(MIDNIGHT),
            "paper" => Some(PAPER),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        MIDNIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        assert_eq!(Theme::by_name("midnight"), Some(MIDNIGHT));
        assert_eq!(Theme::by_name("paper"), Some(PAPER));
        assert_eq!(Theme::by_name("neon"), None);
    }
}
