use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::text::Text;
use unicode_width::UnicodeWidthStr;

/// Layout options for the `render_code_lines` render core.
#[derive(Clone, Debug)]
pub struct CodeRenderOptions {
    /// Whether to show 1-based line numbers.
    pub show_line_numbers: bool,
    /// The line number of the first rendered line (1-based).
    pub line_number_start: usize,
    /// Separator after the line number gutter (e.g. `" │ "`).
    pub line_number_separator: &'static str,
}

impl Default for CodeRenderOptions {
    fn default() -> Self {
        Self {
            show_line_numbers: true,
            line_number_start: 1,
            line_number_separator: " │ ",
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CodeRenderStyles {
    /// Base style applied to code spans (patched onto highlight styles).
    pub base: Style,
    /// Style used for the line number gutter.
    pub gutter: Style,
}

#[derive(Clone, Debug)]
pub struct RenderedCode {
    /// Fully materialized lines ready for drawing.
    pub lines: Vec<Line<'static>>,
    /// Width of the line number gutter (separator included), 0 when hidden.
    pub gutter_width: u16,
    /// Maximum display width (in terminal cell units) across all rendered lines.
    pub content_width: u32,
    /// Total number of rendered lines.
    pub content_height: u32,
}

impl RenderedCode {
    pub fn into_text(self) -> Text<'static> {
        Text::from(self.lines)
    }
}

/// Renders code lines into styled [`Line`]s, prefixing a line number gutter when enabled.
///
/// `highlighted` holds the spans produced by the last highlighting pass, one entry per line.
/// Lines without an entry (or all lines when `None`) are drawn as plain text in `styles.base`.
pub fn render_code_lines<S: AsRef<str>>(
    lines: &[S],
    highlighted: Option<&[Vec<Span<'static>>]>,
    styles: CodeRenderStyles,
    options: &CodeRenderOptions,
) -> RenderedCode {
    let line_number_w = if options.show_line_numbers {
        digits(
            options
                .line_number_start
                .saturating_add(lines.len().saturating_sub(1)),
        )
        .max(1)
    } else {
        0
    };
    let gutter_width = if options.show_line_numbers {
        (line_number_w + UnicodeWidthStr::width(options.line_number_separator)) as u16
    } else {
        0
    };

    let mut out: Vec<Line<'static>> = Vec::with_capacity(lines.len().max(1));
    let mut max_w = 0u32;

    if lines.is_empty() {
        out.push(Line::from(vec![Span::styled(String::new(), styles.base)]));
        return RenderedCode {
            lines: out,
            gutter_width,
            content_width: 0,
            content_height: 1,
        };
    }

    for (idx, raw) in lines.iter().enumerate() {
        let mut spans: Vec<Span<'static>> = Vec::new();

        if options.show_line_numbers {
            let n = options.line_number_start.saturating_add(idx);
            let gutter = format!(
                "{n:>width$}{}",
                options.line_number_separator,
                width = line_number_w
            );
            spans.push(Span::styled(gutter, styles.gutter));
        }

        let mut code_spans = highlighted
            .and_then(|h| h.get(idx).cloned())
            .unwrap_or_else(|| vec![Span::styled(raw.as_ref().to_string(), Style::default())]);

        for s in &mut code_spans {
            s.style = styles.base.patch(s.style);
        }
        spans.extend(code_spans);

        let w: usize = spans.iter().map(|s| s.width()).sum();
        max_w = max_w.max(w as u32);
        out.push(Line::from(spans));
    }

    RenderedCode {
        gutter_width,
        content_width: max_w,
        content_height: out.len() as u32,
        lines: out,
    }
}

fn digits(mut n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    let mut d = 0;
    while n > 0 {
        n /= 10;
        d += 1;
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;
    use ratatui::style::Style;

    #[test]
    fn renders_line_numbers_with_separator() {
        let rendered = render_code_lines(
            &["a", "b"],
            None,
            CodeRenderStyles {
                base: Style::default(),
                gutter: Style::default().fg(Color::Red),
            },
            &CodeRenderOptions {
                show_line_numbers: true,
                line_number_start: 10,
                line_number_separator: " | ",
            },
        );

        assert_eq!(rendered.content_height, 2);
        assert_eq!(rendered.gutter_width, 5);
        let first = rendered
            .lines
            .first()
            .expect("line exists")
            .spans
            .first()
            .expect("span exists");
        assert_eq!(first.content.as_ref(), "10 | ");
        assert_eq!(first.style.fg, Some(Color::Red));
    }

    #[test]
    fn gutter_widens_with_line_count() {
        let lines: Vec<String> = (0..12).map(|i| i.to_string()).collect();
        let rendered = render_code_lines(
            &lines,
            None,
            CodeRenderStyles::default(),
            &CodeRenderOptions::default(),
        );
        assert_eq!(rendered.lines[0].spans[0].content.as_ref(), " 1 │ ");
        assert_eq!(rendered.lines[11].spans[0].content.as_ref(), "12 │ ");
    }

    #[test]
    fn hidden_gutter_emits_only_code() {
        let rendered = render_code_lines(
            &["{}"],
            None,
            CodeRenderStyles::default(),
            &CodeRenderOptions {
                show_line_numbers: false,
                ..CodeRenderOptions::default()
            },
        );
        assert_eq!(rendered.gutter_width, 0);
        assert_eq!(rendered.lines[0].spans.len(), 1);
        assert_eq!(rendered.content_width, 2);
    }

    #[test]
    fn highlighted_spans_are_patched_onto_base() {
        let base = Style::default().bg(Color::Black);
        let highlighted = vec![vec![Span::styled("x", Style::default().fg(Color::Green))]];
        let rendered = render_code_lines(
            &["x"],
            Some(&highlighted),
            CodeRenderStyles {
                base,
                gutter: Style::default(),
            },
            &CodeRenderOptions {
                show_line_numbers: false,
                ..CodeRenderOptions::default()
            },
        );
        let span = &rendered.lines[0].spans[0];
        assert_eq!(span.style.fg, Some(Color::Green));
        assert_eq!(span.style.bg, Some(Color::Black));
    }
}
