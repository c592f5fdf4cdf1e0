use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

/// A syntax highlighting backend.
///
/// Implementations must degrade gracefully: a language they do not know yields one unstyled span
/// per line, never an error.
pub trait CodeHighlighter {
    fn highlight_lines(&self, language: Option<&str>, lines: &[&str]) -> Vec<Vec<Span<'static>>>;

    fn highlight_text(&self, language: Option<&str>, text: &str) -> Vec<Vec<Span<'static>>> {
        let mut lines: Vec<&str> = text.split('\n').collect();
        if lines.is_empty() {
            lines.push("");
        }
        self.highlight_lines(language, &lines)
    }

    /// Whether a grammar is registered for `language`. Blocks in other languages are left
    /// unstyled without calling the highlighter.
    fn supports_language(&self, _language: &str) -> bool {
        true
    }

    fn background_color(&self) -> Option<Color> {
        None
    }

    fn highlight_line(&self, language: Option<&str>, line: &str) -> Vec<Span<'static>> {
        self.highlight_lines(language, &[line])
            .into_iter()
            .next()
            .unwrap_or_default()
    }
}

pub struct NoHighlight;

impl CodeHighlighter for NoHighlight {
    fn highlight_lines(&self, _language: Option<&str>, lines: &[&str]) -> Vec<Vec<Span<'static>>> {
        plain_lines(lines)
    }

    fn supports_language(&self, _language: &str) -> bool {
        false
    }
}

/// One unstyled span per line.
pub fn plain_lines(lines: &[&str]) -> Vec<Vec<Span<'static>>> {
    lines
        .iter()
        .map(|l| vec![Span::styled((*l).to_string(), Style::default())])
        .collect()
}

/// Concatenates the span contents of a line.
pub fn line_to_plain(line: &Line<'_>) -> String {
    line.spans
        .iter()
        .map(|s| s.content.as_ref())
        .collect::<Vec<_>>()
        .join("")
}
