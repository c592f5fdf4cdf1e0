use std::sync::OnceLock;

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;

/// Chrome styles for code blocks: container, header row, gutter and language tag.
///
/// Token colors come from the highlighter; this only covers what the widget draws itself.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    pub border: Style,
    pub title: Style,
    pub code_background: Option<Color>,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            accent: Style::default().cyan(),
            border: Style::default().dark_gray(),
            title: Style::default().bold(),
            code_background: None,
        }
    }
}

impl Theme {
    /// The bundled dark theme (Tomorrow Night palette).
    pub fn dark() -> Self {
        let bg = Color::Rgb(0x2d, 0x2d, 0x2d);
        Self {
            text_primary: Style::default().fg(Color::Rgb(0xcc, 0xcc, 0xcc)).bg(bg),
            text_muted: Style::default().fg(Color::Rgb(0x99, 0x99, 0x99)).bg(bg),
            accent: Style::default().fg(Color::Rgb(0x66, 0x99, 0xcc)).bg(bg),
            border: Style::default().fg(Color::Rgb(0x51, 0x51, 0x51)).bg(bg),
            title: Style::default()
                .fg(Color::Rgb(0xf8, 0xf8, 0xf2))
                .bg(Color::Rgb(0x1d, 0x1f, 0x21))
                .add_modifier(Modifier::BOLD),
            code_background: Some(bg),
        }
    }
}

static GLOBAL_THEME: OnceLock<Theme> = OnceLock::new();

/// Installs the process-wide theme. Must happen before the first call to [`global`].
///
/// Returns the rejected theme if one is already in place.
pub fn install_global(theme: Theme) -> Result<(), Theme> {
    GLOBAL_THEME.set(theme)
}

/// The process-wide theme, falling back to [`Theme::dark`] when none was installed.
pub fn global() -> &'static Theme {
    GLOBAL_THEME.get_or_init(Theme::dark)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_theme_is_read_only_after_first_use() {
        let first = global().clone();
        assert!(install_global(Theme::default()).is_err());
        assert_eq!(global(), &first);
    }

    #[test]
    fn dark_theme_paints_a_background() {
        let t = Theme::dark();
        assert!(t.code_background.is_some());
        assert_eq!(t.text_primary.bg, t.code_background);
    }
}
