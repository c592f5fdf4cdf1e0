use pretty_assertions::assert_eq;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;
use ratatui_code_block::render::buffer_row;
use ratatui_code_block::text::line_to_plain;
use ratatui_code_block::{
    CodeBlock, CodeBlockOptions, CodeSurface, HighlightStatus, RenderRequest, Theme,
    default_highlighter,
};

fn draw(surface: &CodeSurface, id: ratatui_code_block::BlockId, w: u16, h: u16) -> Vec<String> {
    let theme = Theme::default();
    let area = Rect::new(0, 0, w, h);
    let mut buf = Buffer::empty(area);
    let markup = surface.get(id).expect("block is mounted");
    CodeBlock::new(markup).theme(&theme).render(area, &mut buf);
    (0..h).map(|y| buffer_row(&buf, y)).collect()
}

fn plain_lines(surface: &CodeSurface, id: ratatui_code_block::BlockId) -> Vec<String> {
    surface
        .get(id)
        .expect("block is mounted")
        .to_lines(&Theme::default(), &CodeBlockOptions::default())
        .iter()
        .map(line_to_plain)
        .collect()
}

#[test]
fn typescript_without_title() {
    let mut surface = CodeSurface::with_highlighter(default_highlighter());
    let id = surface.mount(RenderRequest::new("const x = 1;", "typescript"));
    assert_eq!(surface.commit(), 1);

    let markup = surface.get(id).expect("mounted");
    assert_eq!(markup.code(), "const x = 1;");
    assert_eq!(markup.language(), "typescript");
    assert_eq!(markup.header(), None);
    assert!(markup.show_line_numbers());
    assert_eq!(markup.status(), HighlightStatus::Highlighted);

    let rows = draw(&surface, id, 24, 3);
    assert!(rows[0].contains(" typescript "));
    assert_eq!(rows[1], "│1 │ const x = 1;      │");
}

#[test]
fn bash_with_title_is_trimmed() {
    let mut surface = CodeSurface::with_highlighter(default_highlighter());
    let id = surface.mount(RenderRequest::new("  echo hi  ", "bash").title("install.sh"));
    surface.commit();

    assert_eq!(
        plain_lines(&surface, id),
        vec!["install.sh".to_string(), "1 │ echo hi".to_string()]
    );

    let rows = draw(&surface, id, 16, 4);
    assert!(rows[0].contains(" bash "));
    assert_eq!(rows[1], "│install.sh    │");
    assert_eq!(rows[2], "│1 │ echo hi   │");
}

#[test]
fn json_without_line_numbers() {
    let mut surface = CodeSurface::with_highlighter(default_highlighter());
    let id = surface.mount(RenderRequest::new("{}", "json").show_line_numbers(false));
    surface.commit();

    assert_eq!(plain_lines(&surface, id), vec!["{}".to_string()]);
    let rows = draw(&surface, id, 8, 3);
    assert_eq!(rows[1], "│{}    │");
}

#[test]
fn unsupported_language_renders_verbatim_and_unstyled() {
    let mut surface = CodeSurface::with_highlighter(default_highlighter());
    let id = surface.mount(RenderRequest::new("\n  DISPLAY 'HELLO'.\n", "cobol"));
    assert_eq!(surface.commit(), 1);

    let markup = surface.get(id).expect("mounted");
    assert_eq!(markup.code(), "DISPLAY 'HELLO'.");
    assert_eq!(markup.status(), HighlightStatus::Highlighted);
    let coloring = markup.coloring().expect("pass ran");
    assert!(coloring.iter().flatten().all(|s| s.style == Style::default()));
}

#[test]
fn trimming_holds_for_every_language_and_title() {
    let mut surface = CodeSurface::with_highlighter(default_highlighter());
    let code = "\t\n  let a = 1;\n  let b = 2;\n\n ";
    for language in ["typescript", "tsx", "jsx", "javascript", "bash", "json", "cobol", ""] {
        for title in [None, Some(""), Some("file")] {
            let mut req = RenderRequest::new(code, language);
            req.title = title.map(str::to_string);
            let id = surface.mount(req);
            surface.commit();
            let markup = surface.get(id).expect("mounted");
            assert_eq!(markup.code(), code.trim());
            assert_eq!(markup.header().is_some(), title.is_some_and(|t| !t.is_empty()));
            surface.unmount(id);
        }
    }
}

#[test]
fn repeated_passes_do_not_change_output() {
    let mut surface = CodeSurface::with_highlighter(default_highlighter());
    let id = surface.mount(RenderRequest::new("const a = [1, 2];", "typescript"));
    surface.commit();
    let once = surface.get(id).cloned();
    surface.highlight_all();
    surface.highlight_all();
    assert_eq!(surface.get(id).cloned(), once);
    assert_eq!(surface.passes(), 3);
}

#[test]
fn only_code_changes_retrigger_highlighting() {
    let mut surface = CodeSurface::with_highlighter(default_highlighter());
    let id = surface.mount(RenderRequest::new("a", "json"));
    surface.commit();

    surface.update(id, RenderRequest::new("a", "bash").title("t").show_line_numbers(false));
    assert_eq!(surface.commit(), 0);

    surface.update(id, RenderRequest::new("b", "bash"));
    surface.update(id, RenderRequest::new("c", "bash"));
    // Both edits land before the commit: the effect sees only the latest value.
    assert_eq!(surface.commit(), 1);
    assert_eq!(surface.get(id).map(|m| m.code()), Some("c"));
}

#[cfg(feature = "syntect")]
#[test]
fn syntect_colors_supported_languages() {
    let mut surface = CodeSurface::with_highlighter(default_highlighter());
    let ts = surface.mount(RenderRequest::new("const x = 1;", "typescript"));
    let sh = surface.mount(RenderRequest::new("echo hi", "bash"));
    surface.commit();
    for id in [ts, sh] {
        let coloring = surface
            .get(id)
            .and_then(|m| m.coloring())
            .expect("highlighted");
        assert!(coloring.iter().flatten().any(|s| s.style != Style::default()));
    }
}
