use std::path::Path;

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui_code_block_core::text::CodeHighlighter;
use ratatui_code_block_core::text::plain_lines;
use syntect::easy::HighlightLines;
use syntect::highlighting::FontStyle;
use syntect::highlighting::Style as SynStyle;
use syntect::highlighting::Theme;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxReference;
use syntect::parsing::SyntaxSet;

use crate::error::HighlightError;
use crate::language::Language;

/// The bundled dark theme.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl SyntectHighlighter {
    pub fn new() -> Self {
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let theme_set = ThemeSet::load_defaults();
        let theme = theme_set
            .themes
            .get(DEFAULT_THEME)
            .cloned()
            .or_else(|| theme_set.themes.values().next().cloned())
            .unwrap_or_default();
        Self { syntax_set, theme }
    }

    /// Uses one of syntect's bundled themes, e.g. `"Solarized (dark)"`.
    pub fn with_theme_name(name: &str) -> Result<Self, HighlightError> {
        let mut theme_set = ThemeSet::load_defaults();
        let theme = theme_set
            .themes
            .remove(name)
            .ok_or_else(|| HighlightError::UnknownTheme(name.to_string()))?;
        Ok(Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }

    /// Loads a `.tmTheme` file.
    pub fn from_theme_file(path: impl AsRef<Path>) -> Result<Self, HighlightError> {
        let path = path.as_ref();
        let theme = ThemeSet::get_theme(path).map_err(|source| HighlightError::ThemeLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }

    fn syntax_for(&self, language: &str) -> Option<&SyntaxReference> {
        match Language::from_tag(language) {
            // No bundled TypeScript/JSX grammar; the JavaScript one covers most tokens.
            Some(Language::TypeScript | Language::Tsx | Language::JavaScript | Language::Jsx) => {
                self.syntax_set
                    .find_syntax_by_name("JavaScript")
                    .or_else(|| self.syntax_set.find_syntax_by_extension("js"))
            }
            Some(Language::Bash) => self.syntax_set.find_syntax_by_extension("sh"),
            Some(Language::Json) => self.syntax_set.find_syntax_by_extension("json"),
            None => {
                let plain = self.syntax_set.find_syntax_plain_text();
                self.syntax_set
                    .find_syntax_by_token(language)
                    .filter(|s| s.name != plain.name)
            }
        }
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeHighlighter for SyntectHighlighter {
    fn highlight_lines(&self, language: Option<&str>, lines: &[&str]) -> Vec<Vec<Span<'static>>> {
        let Some(syntax) = language.and_then(|l| self.syntax_for(l)) else {
            return plain_lines(lines);
        };
        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        let mut out: Vec<Vec<Span<'static>>> = Vec::with_capacity(lines.len());
        for line in lines {
            let with_newline = format!("{line}\n");
            let mut spans: Vec<Span<'static>> = Vec::new();
            match highlighter.highlight_line(&with_newline, &self.syntax_set) {
                Ok(regions) => {
                    for (style, s) in regions {
                        let s = s.strip_suffix('\n').unwrap_or(s);
                        if s.is_empty() {
                            continue;
                        }
                        spans.push(Span::styled(s.to_string(), syn_style_to_ratatui(style)));
                    }
                }
                Err(err) => {
                    tracing::debug!(%err, "syntect.highlight_line.failed");
                }
            }
            if spans.is_empty() {
                spans.push(Span::raw((*line).to_string()));
            }
            out.push(spans);
        }
        out
    }

    fn supports_language(&self, language: &str) -> bool {
        self.syntax_for(language).is_some()
    }

    fn background_color(&self) -> Option<Color> {
        self.theme
            .settings
            .background
            .map(|c| Color::Rgb(c.r, c.g, c.b))
    }
}

fn syn_style_to_ratatui(s: SynStyle) -> Style {
    let mut out = Style::default().fg(Color::Rgb(s.foreground.r, s.foreground.g, s.foreground.b));

    if s.font_style.contains(FontStyle::BOLD) {
        out = out.add_modifier(Modifier::BOLD);
    }
    if s.font_style.contains(FontStyle::ITALIC) {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if s.font_style.contains(FontStyle::UNDERLINE) {
        out = out.add_modifier(Modifier::UNDERLINED);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(spans: &[Span<'static>]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn supports_required_languages() {
        let h = SyntectHighlighter::new();
        for tag in ["typescript", "javascript", "jsx", "tsx", "bash", "sh", "json"] {
            assert!(h.supports_language(tag), "{tag}");
        }
        assert!(!h.supports_language("cobol"));
    }

    #[test]
    fn highlights_typescript_with_colors() {
        let h = SyntectHighlighter::new();
        let out = h.highlight_lines(Some("typescript"), &["const x = 1;"]);
        assert_eq!(out.len(), 1);
        assert_eq!(joined(&out[0]), "const x = 1;");
        assert!(out[0].iter().any(|s| s.style.fg.is_some()));
    }

    #[test]
    fn unknown_language_is_unstyled() {
        let h = SyntectHighlighter::new();
        let out = h.highlight_lines(Some("cobol"), &["MOVE 1 TO X."]);
        assert_eq!(out, vec![vec![Span::styled("MOVE 1 TO X.", Style::default())]]);
    }

    #[test]
    fn keeps_line_count_and_text() {
        let h = SyntectHighlighter::new();
        let out = h.highlight_text(Some("json"), "{\n  \"a\": 1\n}");
        assert_eq!(out.len(), 3);
        assert_eq!(joined(&out[1]), "  \"a\": 1");
    }

    #[test]
    fn unknown_theme_is_an_error() {
        assert!(matches!(
            SyntectHighlighter::with_theme_name("no-such-theme"),
            Err(HighlightError::UnknownTheme(_))
        ));
        assert!(SyntectHighlighter::with_theme_name(DEFAULT_THEME).is_ok());
    }

    #[test]
    fn missing_theme_file_is_an_error() {
        let err = SyntectHighlighter::from_theme_file("/definitely/not/here.tmTheme")
            .err()
            .expect("load fails");
        assert!(err.to_string().contains("here.tmTheme"));
    }

    #[test]
    fn dark_theme_has_background() {
        assert!(SyntectHighlighter::new().background_color().is_some());
    }
}
