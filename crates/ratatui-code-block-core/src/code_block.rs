use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Widget;

use crate::markup::CodeBlockMarkup;
use crate::render::render_spans_clipped;
use crate::theme;
use crate::theme::Theme;

#[derive(Clone, Debug)]
pub struct CodeBlockOptions {
    /// Draw a border around the block.
    pub borders: bool,
    /// Show the language tag in the top border (requires `borders`).
    pub show_language_tag: bool,
    /// Separator between the line number gutter and the code.
    pub line_number_separator: &'static str,
}

impl Default for CodeBlockOptions {
    fn default() -> Self {
        Self {
            borders: true,
            show_language_tag: true,
            line_number_separator: " │ ",
        }
    }
}

/// Draws a [`CodeBlockMarkup`]: container, optional header row, gutter and code.
///
/// The widget never highlights on its own; it paints whatever coloring the last pass left on the
/// markup, or plain text while the block is still pending.
#[derive(Clone, Debug)]
pub struct CodeBlock<'a> {
    markup: &'a CodeBlockMarkup,
    theme: &'a Theme,
    options: CodeBlockOptions,
}

impl<'a> CodeBlock<'a> {
    /// Uses the process-wide theme; see [`theme::global`].
    pub fn new(markup: &'a CodeBlockMarkup) -> Self {
        Self {
            markup,
            theme: theme::global(),
            options: CodeBlockOptions::default(),
        }
    }

    #[must_use]
    pub fn theme(mut self, theme: &'a Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn options(mut self, options: CodeBlockOptions) -> Self {
        self.options = options;
        self
    }

    /// Rows needed to draw the block without clipping.
    pub fn height(&self) -> u16 {
        let header = u16::from(self.markup.header().is_some());
        let borders = if self.options.borders { 2 } else { 0 };
        let code = u16::try_from(self.markup.lines().len()).unwrap_or(u16::MAX);
        code.saturating_add(header).saturating_add(borders)
    }

    fn container(&self) -> Block<'a> {
        let mut block = Block::bordered()
            .border_style(self.theme.border)
            .style(self.theme.text_primary);
        let language = self.markup.language();
        if self.options.show_language_tag && !language.is_empty() {
            block = block.title_top(
                Line::styled(format!(" {language} "), self.theme.accent).right_aligned(),
            );
        }
        block
    }
}

impl Widget for CodeBlock<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        buf.set_style(area, self.theme.text_primary);

        let inner = if self.options.borders {
            let block = self.container();
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let mut y = inner.y;
        if let Some(header) = self.markup.header() {
            buf.set_style(Rect::new(inner.x, y, inner.width, 1), self.theme.title);
            render_spans_clipped(
                inner.x,
                y,
                inner.width,
                buf,
                &[Span::raw(header)],
                self.theme.title,
            );
            y += 1;
        }

        let rendered = self.markup.render_code(self.theme, &self.options);
        for line in &rendered.lines {
            if y >= inner.bottom() {
                break;
            }
            render_spans_clipped(
                inner.x,
                y,
                inner.width,
                buf,
                &line.spans,
                self.theme.text_primary,
            );
            y += 1;
        }
    }
}
