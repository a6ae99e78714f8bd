use ratatui::style::{Color, Modifier, Style};

/// Dark theme with a blue accent.
///
/// Base aesthetic:
/// - soft white foreground on near-black
/// - blue for titles and focus
/// - green for estimates, red for errors
pub struct Theme;

impl Theme {
    // Core palette
    pub const BG: Color = Color::Rgb(10, 12, 16);
    pub const FG: Color = Color::Rgb(220, 224, 230);
    pub const FG_DIM: Color = Color::Rgb(150, 156, 166);
    pub const FG_MUTED: Color = Color::Rgb(90, 96, 106);

    // Accents
    pub const ACCENT_BLUE: Color = Color::Rgb(66, 135, 245);
    pub const ACCENT_GREEN: Color = Color::Rgb(80, 220, 120);
    pub const ACCENT_RED: Color = Color::Rgb(255, 85, 85);

    /// Default full-screen style.
    pub fn base() -> Style {
        Style::default().fg(Self::FG).bg(Self::BG)
    }

    /// Borders of unfocused inputs and panels.
    pub fn border() -> Style {
        Style::default().fg(Self::FG_MUTED)
    }

    /// Border of the focused input.
    pub fn focus() -> Style {
        Style::default()
            .fg(Self::ACCENT_BLUE)
            .add_modifier(Modifier::BOLD)
    }

    /// Titles.
    pub fn title() -> Style {
        Style::default().fg(Self::FG).add_modifier(Modifier::BOLD)
    }

    /// The blue half of the app title.
    pub fn brand() -> Style {
        Style::default()
            .fg(Self::ACCENT_BLUE)
            .add_modifier(Modifier::BOLD)
    }

    /// Regular text.
    pub fn text() -> Style {
        Style::default().fg(Self::FG)
    }

    /// Secondary text.
    pub fn dim() -> Style {
        Style::default().fg(Self::FG_DIM)
    }

    /// Placeholders and disabled inputs.
    pub fn muted() -> Style {
        Style::default().fg(Self::FG_MUTED)
    }

    pub fn ok() -> Style {
        Style::default()
            .fg(Self::ACCENT_GREEN)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ACCENT_RED)
            .add_modifier(Modifier::BOLD)
    }
}
