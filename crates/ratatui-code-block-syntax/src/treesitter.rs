use std::collections::HashMap;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui_code_block_core::text::CodeHighlighter;
use ratatui_code_block_core::text::plain_lines;
use tree_sitter::Language as TsLanguage;
use tree_sitter_highlight::{Highlight, HighlightConfiguration, HighlightEvent, Highlighter};

use crate::error::HighlightError;
use crate::language::Language;

pub mod langs {
    #[cfg(feature = "treesitter-lang-bash")]
    pub use tree_sitter_bash as lang_bash;
    #[cfg(feature = "treesitter-lang-javascript")]
    pub use tree_sitter_javascript as lang_javascript;
    #[cfg(feature = "treesitter-lang-json")]
    pub use tree_sitter_json as lang_json;
    #[cfg(feature = "treesitter-lang-typescript")]
    pub use tree_sitter_typescript as lang_typescript;
}

#[derive(Clone, Debug)]
pub struct TreeSitterTheme {
    pub background: Option<Color>,
    pub keyword: Style,
    pub r#type: Style,
    pub function: Style,
    pub string: Style,
    pub number: Style,
    pub constant: Style,
    pub comment: Style,
    pub property: Style,
    pub variable: Style,
    pub punctuation: Style,
    pub operator: Style,
    pub tag: Style,
}

impl Default for TreeSitterTheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl TreeSitterTheme {
    /// Tomorrow Night token colors.
    pub fn dark() -> Self {
        Self {
            background: None,
            keyword: Style::default().fg(Color::Rgb(0xcc, 0x99, 0xcd)),
            r#type: Style::default().fg(Color::Rgb(0xf8, 0xc5, 0x55)),
            function: Style::default().fg(Color::Rgb(0xf0, 0x8d, 0x49)),
            string: Style::default().fg(Color::Rgb(0x7e, 0xc6, 0x99)),
            number: Style::default().fg(Color::Rgb(0xf0, 0x8d, 0x49)),
            constant: Style::default().fg(Color::Rgb(0xf0, 0x8d, 0x49)),
            comment: Style::default()
                .fg(Color::Rgb(0x99, 0x99, 0x99))
                .add_modifier(Modifier::ITALIC),
            property: Style::default().fg(Color::Rgb(0xf8, 0xc5, 0x55)),
            variable: Style::default().fg(Color::Rgb(0xcc, 0xcc, 0xcc)),
            punctuation: Style::default().fg(Color::Rgb(0xcc, 0xcc, 0xcc)),
            operator: Style::default().fg(Color::Rgb(0x67, 0xcd, 0xcc)),
            tag: Style::default().fg(Color::Rgb(0xe2, 0x77, 0x7a)),
        }
    }

    fn style_for_capture(&self, capture: &str) -> Style {
        let capture = capture.trim_start_matches('_');
        let mut style = if capture.contains("comment") {
            self.comment
        } else if capture.contains("string") || capture.contains("escape") {
            self.string
        } else if capture.contains("number") {
            self.number
        } else if capture.contains("keyword") {
            self.keyword
        } else if capture.contains("tag") {
            self.tag
        } else if capture.contains("type") {
            self.r#type
        } else if capture.contains("function") || capture.contains("method") {
            self.function
        } else if capture.contains("constant")
            || capture.contains("boolean")
            || capture.contains("builtin")
        {
            self.constant
        } else if capture.contains("property")
            || capture.contains("field")
            || capture.contains("attribute")
        {
            self.property
        } else if capture.contains("variable") || capture.contains("parameter") {
            self.variable
        } else if capture.contains("operator") {
            self.operator
        } else if capture.contains("punctuation") {
            self.punctuation
        } else {
            Style::default()
        };

        if let Some(bg) = self.background {
            style = style.bg(bg);
        }
        style
    }
}

struct LanguageEntry {
    config: HighlightConfiguration,
    styles: Vec<Style>,
}

pub struct TreeSitterHighlighter {
    theme: TreeSitterTheme,
    languages: Vec<LanguageEntry>,
    keys: HashMap<&'static str, usize>,
}

impl Default for TreeSitterHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeSitterHighlighter {
    /// Registers every grammar enabled through `treesitter-lang-*` features.
    pub fn new() -> Self {
        Self::with_theme(TreeSitterTheme::default())
    }

    pub fn with_theme(theme: TreeSitterTheme) -> Self {
        let mut this = Self {
            theme,
            languages: Vec::new(),
            keys: HashMap::new(),
        };
        this.register_builtin();
        this
    }

    pub fn theme(&self) -> &TreeSitterTheme {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut TreeSitterTheme {
        &mut self.theme
    }

    pub fn set_background(&mut self, background: Option<Color>) {
        self.theme.background = background;
        self.refresh_styles();
    }

    /// Recomputes capture styles after the theme changed.
    pub fn refresh_styles(&mut self) {
        for entry in &mut self.languages {
            entry.styles = entry
                .config
                .names()
                .iter()
                .map(|name| self.theme.style_for_capture(name))
                .collect();
        }
    }

    pub fn register(
        &mut self,
        language_name: impl Into<String>,
        language: TsLanguage,
        highlights_query: &str,
        injections_query: &str,
        locals_query: &str,
        keys: impl IntoIterator<Item = &'static str>,
    ) -> Result<(), HighlightError> {
        let language_name = language_name.into();
        let mut config = HighlightConfiguration::new(
            language,
            language_name.clone(),
            highlights_query,
            injections_query,
            locals_query,
        )
        .map_err(|source| HighlightError::Query {
            language: language_name,
            source,
        })?;

        let capture_names: Vec<String> = config.names().iter().map(|s| (*s).to_string()).collect();
        config.configure(&capture_names);

        let styles = config
            .names()
            .iter()
            .map(|name| self.theme.style_for_capture(name))
            .collect();

        let idx = self.languages.len();
        self.languages.push(LanguageEntry { config, styles });
        for k in keys {
            self.keys.insert(k, idx);
        }
        Ok(())
    }

    fn register_builtin(&mut self) {
        #[cfg(feature = "treesitter-lang-javascript")]
        {
            use langs::lang_javascript as js;
            let jsx_highlights = format!("{}\n{}", js::HIGHLIGHT_QUERY, js::JSX_HIGHLIGHT_QUERY);
            self.register_logged(
                Language::JavaScript,
                js::LANGUAGE.into(),
                js::HIGHLIGHT_QUERY,
                js::INJECTIONS_QUERY,
                js::LOCALS_QUERY,
            );
            self.register_logged(
                Language::Jsx,
                js::LANGUAGE.into(),
                &jsx_highlights,
                js::INJECTIONS_QUERY,
                js::LOCALS_QUERY,
            );
        }

        #[cfg(feature = "treesitter-lang-typescript")]
        {
            use langs::lang_javascript as js;
            use langs::lang_typescript as ts;
            let ts_highlights = format!("{}\n{}", js::HIGHLIGHT_QUERY, ts::HIGHLIGHTS_QUERY);
            let tsx_highlights = format!(
                "{}\n{}\n{}",
                js::HIGHLIGHT_QUERY,
                js::JSX_HIGHLIGHT_QUERY,
                ts::HIGHLIGHTS_QUERY
            );
            self.register_logged(
                Language::TypeScript,
                ts::LANGUAGE_TYPESCRIPT.into(),
                &ts_highlights,
                "",
                ts::LOCALS_QUERY,
            );
            self.register_logged(
                Language::Tsx,
                ts::LANGUAGE_TSX.into(),
                &tsx_highlights,
                "",
                ts::LOCALS_QUERY,
            );
        }

        #[cfg(feature = "treesitter-lang-bash")]
        self.register_logged(
            Language::Bash,
            langs::lang_bash::LANGUAGE.into(),
            langs::lang_bash::HIGHLIGHT_QUERY,
            "",
            "",
        );

        #[cfg(feature = "treesitter-lang-json")]
        self.register_logged(
            Language::Json,
            langs::lang_json::LANGUAGE.into(),
            langs::lang_json::HIGHLIGHTS_QUERY,
            "",
            "",
        );
    }

    /// Built-in grammars that fail to register degrade to plain text.
    #[cfg(any(
        feature = "treesitter-lang-bash",
        feature = "treesitter-lang-javascript",
        feature = "treesitter-lang-json",
        feature = "treesitter-lang-typescript"
    ))]
    fn register_logged(
        &mut self,
        lang: Language,
        language: TsLanguage,
        highlights_query: &str,
        injections_query: &str,
        locals_query: &str,
    ) {
        if let Err(err) = self.register(
            lang.name(),
            language,
            highlights_query,
            injections_query,
            locals_query,
            lang.tags().iter().copied(),
        ) {
            tracing::warn!(language = lang.name(), %err, "treesitter.register.failed");
        }
    }

    fn entry_for(&self, language: Option<&str>) -> Option<&LanguageEntry> {
        let lang = language?;
        let idx = match self.keys.get(lang) {
            Some(&idx) => idx,
            None => {
                let canonical = Language::from_tag(lang)?;
                *self.keys.get(canonical.name())?
            }
        };
        self.languages.get(idx)
    }
}

impl CodeHighlighter for TreeSitterHighlighter {
    fn background_color(&self) -> Option<Color> {
        self.theme.background
    }

    fn supports_language(&self, language: &str) -> bool {
        self.entry_for(Some(language)).is_some()
    }

    fn highlight_lines(&self, language: Option<&str>, lines: &[&str]) -> Vec<Vec<Span<'static>>> {
        let Some(entry) = self.entry_for(language) else {
            return plain_lines(lines);
        };

        let source = lines.join("\n");
        let mut highlighter = Highlighter::new();
        let highlights = highlighter.highlight(&entry.config, source.as_bytes(), None, |_| {
            None::<&HighlightConfiguration>
        });
        let highlight_iter = match highlights {
            Ok(it) => it,
            Err(err) => {
                tracing::debug!(?err, "treesitter.highlight.failed");
                return plain_lines(lines);
            }
        };

        let mut out: Vec<Vec<Span<'static>>> = vec![Vec::new(); lines.len()];
        let mut line_idx = 0usize;
        let mut stack: Vec<Highlight> = Vec::new();

        for event in highlight_iter {
            match event {
                Ok(HighlightEvent::HighlightStart(h)) => {
                    stack.push(h);
                }
                Ok(HighlightEvent::HighlightEnd) => {
                    let _ = stack.pop();
                }
                Ok(HighlightEvent::Source { start, end }) => {
                    if line_idx >= out.len() {
                        break;
                    }
                    let style = stack
                        .last()
                        .and_then(|h| entry.styles.get(h.0).copied())
                        .unwrap_or_default();

                    let mut s = &source[start..end];
                    while let Some(pos) = s.find('\n') {
                        let before = &s[..pos];
                        if !before.is_empty() && line_idx < out.len() {
                            out[line_idx].push(Span::styled(before.to_string(), style));
                        }
                        line_idx = line_idx.saturating_add(1);
                        if line_idx >= out.len() {
                            break;
                        }
                        s = &s[pos + 1..];
                    }
                    if line_idx < out.len() && !s.is_empty() {
                        out[line_idx].push(Span::styled(s.to_string(), style));
                    }
                }
                Err(err) => {
                    tracing::debug!(?err, "treesitter.highlight.failed");
                    return plain_lines(lines);
                }
            }
        }

        for (i, spans) in out.iter_mut().enumerate() {
            if spans.is_empty() {
                spans.push(Span::raw(lines.get(i).copied().unwrap_or("").to_string()));
            }
        }

        out
    }
}
