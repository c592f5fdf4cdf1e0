use ratatui::buffer::Buffer;
use ratatui::style::Style;
use ratatui::text::Span;
use unicode_width::UnicodeWidthChar;

/// Width of a tab stop when drawing code.
pub const TAB_WIDTH: usize = 4;

/// Draws `spans` on row `y` starting at column `x`, clipped to `max_cols` cells.
///
/// Spans without a style of their own are drawn with `fallback_style`; styled spans are patched
/// onto it so the block background survives token colors. Tabs expand to [`TAB_WIDTH`] spaces.
/// Returns the number of cells written.
pub fn render_spans_clipped(
    x: u16,
    y: u16,
    max_cols: u16,
    buf: &mut Buffer,
    spans: &[Span<'_>],
    fallback_style: Style,
) -> u16 {
    if max_cols == 0 {
        return 0;
    }

    let max_cols = max_cols as usize;
    let mut out_cols = 0usize;
    let mut dx = 0u16;
    let mut tmp = [0u8; 4];

    for span in spans {
        let style = fallback_style.patch(span.style);
        for ch in span.content.chars() {
            if ch == '\t' {
                for _ in 0..TAB_WIDTH {
                    if out_cols + 1 > max_cols {
                        return dx;
                    }
                    if let Some(cell) = buf.cell_mut((x + dx, y)) {
                        cell.set_style(style);
                        cell.set_symbol(" ");
                    }
                    dx += 1;
                    out_cols += 1;
                }
                continue;
            }

            let w = UnicodeWidthChar::width(ch).unwrap_or(0);
            if w == 0 {
                continue;
            }
            if out_cols + w > max_cols {
                return dx;
            }

            let s = ch.encode_utf8(&mut tmp);
            if let Some(cell) = buf.cell_mut((x + dx, y)) {
                cell.set_style(style);
                cell.set_symbol(s);
            }
            dx += 1;
            out_cols += 1;

            if w == 2 {
                if let Some(cell) = buf.cell_mut((x + dx, y)) {
                    cell.set_style(style);
                    cell.set_symbol("");
                }
                dx += 1;
                out_cols += 1;
            }
        }
    }
    dx
}

/// Reads row `y` of `buf` back as a string, one symbol per cell.
pub fn buffer_row(buf: &Buffer, y: u16) -> String {
    let area = buf.area;
    let mut out = String::new();
    for x in area.x..area.x + area.width {
        if let Some(cell) = buf.cell((x, y)) {
            out.push_str(cell.symbol());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;
    use ratatui::style::Color;

    #[test]
    fn clips_at_max_cols() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 1));
        let written = render_spans_clipped(
            1,
            0,
            4,
            &mut buf,
            &[Span::raw("abc"), Span::raw("def")],
            Style::default(),
        );
        assert_eq!(written, 4);
        assert_eq!(buffer_row(&buf, 0), " abcd     ");
    }

    #[test]
    fn expands_tabs_and_patches_styles() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 8, 1));
        let base = Style::default().bg(Color::Black);
        render_spans_clipped(
            0,
            0,
            8,
            &mut buf,
            &[Span::styled("\tx", Style::default().fg(Color::Red))],
            base,
        );
        assert_eq!(buffer_row(&buf, 0), "    x   ");
        let cell = buf.cell((4, 0)).expect("cell exists");
        assert_eq!(cell.fg, Color::Red);
        assert_eq!(cell.bg, Color::Black);
    }
}
