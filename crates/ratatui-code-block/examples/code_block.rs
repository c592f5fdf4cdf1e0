use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui_code_block::syntax::auto::AutoHighlighter;
use ratatui_code_block::syntax::auto::AutoHighlighterPreference;
use ratatui_code_block::theme;
use ratatui_code_block::{BlockId, CodeBlock, CodeSurface, RenderRequest, Theme};
use std::io;
use std::sync::Arc;
use std::time::Duration;

const SAMPLE_TS: &str = r#"
interface User {
  id: number;
  name: string;
}

export function greet(user: User): string {
  return `hello, ${user.name}`;
}
"#;

const SAMPLE_SH: &str = "  cargo add ratatui-code-block --features syntect  ";

const SAMPLE_JSON: &str = r#"{ "name": "demo", "private": true }"#;

struct App {
    surface: CodeSurface,
    ts: BlockId,
    sh: BlockId,
    json: BlockId,
    edits: usize,
    preference: AutoHighlighterPreference,
}

impl App {
    fn new() -> Self {
        let highlighter = AutoHighlighter::new();
        let preference = highlighter.preference();
        let mut surface = CodeSurface::with_highlighter(Arc::new(highlighter));
        let ts = surface.mount(RenderRequest::new(SAMPLE_TS, "typescript").title("greet.ts"));
        let sh = surface.mount(RenderRequest::new(SAMPLE_SH, "bash").title("install.sh"));
        let json = surface.mount(RenderRequest::new(SAMPLE_JSON, "json").show_line_numbers(false));
        Self {
            surface,
            ts,
            sh,
            json,
            edits: 0,
            preference,
        }
    }

    /// Swaps backends and re-colors what is on screen without touching any code.
    fn toggle_backend(&mut self) {
        self.preference = match self.preference {
            AutoHighlighterPreference::TreeSitter => AutoHighlighterPreference::Syntect,
            AutoHighlighterPreference::Syntect => AutoHighlighterPreference::TreeSitter,
        };
        let mut highlighter = AutoHighlighter::new();
        highlighter.set_preference(self.preference);
        self.surface.set_highlighter(Some(Arc::new(highlighter)));
        self.surface.highlight_all();
    }

    fn edit_code(&mut self) {
        self.edits += 1;
        let n = self.edits;
        let code = format!("{SAMPLE_TS}\n// edit #{n}\ngreet({{ id: {n}, name: \"x\" }});");
        self.surface
            .update(self.ts, RenderRequest::new(code, "typescript").title("greet.ts"));
    }

    fn toggle_line_numbers(&mut self) {
        let Some(req) = self.surface.request(self.json).cloned() else {
            return;
        };
        let show = !req.show_line_numbers;
        self.surface.update(self.json, req.show_line_numbers(show));
    }

    fn toggle_title(&mut self) {
        let Some(mut req) = self.surface.request(self.sh).cloned() else {
            return;
        };
        req.title = match req.title {
            Some(_) => None,
            None => Some("install.sh".to_string()),
        };
        self.surface.update(self.sh, req);
    }
}

fn main() -> io::Result<()> {
    let _ = theme::install_global(Theme::dark());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal);

    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    let mut app = App::new();

    loop {
        terminal.draw(|f| {
            let blocks: Vec<_> = app
                .surface
                .iter()
                .map(|(_, markup)| CodeBlock::new(markup))
                .collect();

            let mut constraints: Vec<Constraint> =
                blocks.iter().map(|b| Constraint::Length(b.height())).collect();
            constraints.push(Constraint::Min(1));
            let areas = Layout::vertical(constraints).split(f.area());

            for (block, area) in blocks.into_iter().zip(areas.iter()) {
                f.render_widget(block, *area);
            }

            let status = Line::from(format!(
                "passes: {}  prefer: {:?}  |  e: edit  n: gutter  t: title  b: backend  q: quit",
                app.surface.passes(),
                app.preference,
            ));
            if let Some(area) = areas.last() {
                f.render_widget(Paragraph::new(status), *area);
            }
        })?;

        // Effects run after the frame is on screen.
        app.surface.commit();

        if !crossterm::event::poll(Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = crossterm::event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Char('e') => app.edit_code(),
            KeyCode::Char('n') => app.toggle_line_numbers(),
            KeyCode::Char('t') => app.toggle_title(),
            KeyCode::Char('b') => app.toggle_backend(),
            _ => {}
        }
    }
}
