use ratatui::text::Line;
use ratatui::text::Span;

use crate::code_block::CodeBlockOptions;
use crate::code_render::CodeRenderOptions;
use crate::code_render::CodeRenderStyles;
use crate::code_render::RenderedCode;
use crate::code_render::render_code_lines;
use crate::request::RenderRequest;
use crate::text::CodeHighlighter;
use crate::text::plain_lines;
use crate::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HighlightStatus {
    /// Rendered (or code changed) and not yet covered by a highlighting pass.
    Pending,
    Highlighted,
}

/// The committed display element of one code block.
///
/// Holds what a [`RenderRequest`] turned into (header, trimmed lines, language tag, gutter flag)
/// plus the coloring written by the most recent highlighting pass.
#[derive(Clone, Debug, PartialEq)]
pub struct CodeBlockMarkup {
    header: Option<String>,
    code: String,
    lines: Vec<String>,
    language: String,
    show_line_numbers: bool,
    coloring: Option<Vec<Vec<Span<'static>>>>,
}

impl CodeBlockMarkup {
    pub fn new(request: &RenderRequest) -> Self {
        let code = request.display_code().to_string();
        let mut lines: Vec<String> = code.lines().map(str::to_string).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            header: request.header().map(str::to_string),
            code,
            lines,
            language: request.language.clone(),
            show_line_numbers: request.show_line_numbers,
            coloring: None,
        }
    }

    /// Updates header, language tag and gutter flag, keeping the code and its coloring.
    pub fn apply_attributes(&mut self, request: &RenderRequest) {
        self.header = request.header().map(str::to_string);
        self.language.clone_from(&request.language);
        self.show_line_numbers = request.show_line_numbers;
    }

    /// Re-colors the element in place.
    ///
    /// Running this twice on the same element produces the same coloring. Languages the
    /// highlighter has no grammar for are left unstyled.
    pub fn apply_highlight(&mut self, highlighter: Option<&dyn CodeHighlighter>) {
        let lines: Vec<&str> = self.lines.iter().map(String::as_str).collect();
        let coloring = match highlighter {
            Some(hi) if hi.supports_language(&self.language) => {
                hi.highlight_text(Some(&self.language), &lines.join("\n"))
            }
            _ => {
                tracing::debug!(
                    language = %self.language,
                    "code_block.highlight.plain_fallback"
                );
                plain_lines(&lines)
            }
        };
        self.coloring = Some(coloring);
    }

    pub fn status(&self) -> HighlightStatus {
        if self.coloring.is_some() {
            HighlightStatus::Highlighted
        } else {
            HighlightStatus::Pending
        }
    }

    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// The displayed (trimmed) code.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn show_line_numbers(&self) -> bool {
        self.show_line_numbers
    }

    pub fn coloring(&self) -> Option<&[Vec<Span<'static>>]> {
        self.coloring.as_deref()
    }

    /// Renders the code region (gutter + code) without the header.
    pub fn render_code(&self, theme: &Theme, options: &CodeBlockOptions) -> RenderedCode {
        render_code_lines(
            &self.lines,
            self.coloring(),
            CodeRenderStyles {
                base: theme.text_primary,
                gutter: theme.text_muted,
            },
            &CodeRenderOptions {
                show_line_numbers: self.show_line_numbers,
                line_number_start: 1,
                line_number_separator: options.line_number_separator,
            },
        )
    }

    /// Header line (when present) followed by the code lines.
    pub fn to_lines(&self, theme: &Theme, options: &CodeBlockOptions) -> Vec<Line<'static>> {
        let rendered = self.render_code(theme, options);
        let mut out = Vec::with_capacity(rendered.lines.len() + 1);
        if let Some(header) = self.header() {
            out.push(Line::styled(header.to_string(), theme.title));
        }
        out.extend(rendered.lines);
        out
    }
}
