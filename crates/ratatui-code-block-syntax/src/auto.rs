use ratatui::style::Color;
use ratatui::text::Span;
use ratatui_code_block_core::text::CodeHighlighter;
use ratatui_code_block_core::text::plain_lines;

#[cfg(feature = "syntect")]
use crate::syntect::SyntectHighlighter;
#[cfg(feature = "treesitter")]
use crate::treesitter::TreeSitterHighlighter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoHighlighterPreference {
    TreeSitter,
    Syntect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoHighlighterBackend {
    TreeSitter,
    Syntect,
    None,
}

/// Routes each language to whichever compiled-in backend has a grammar for it.
pub struct AutoHighlighter {
    preference: AutoHighlighterPreference,
    background: Option<Color>,
    #[cfg(feature = "syntect")]
    syntect: SyntectHighlighter,
    #[cfg(feature = "treesitter")]
    treesitter: TreeSitterHighlighter,
}

impl Default for AutoHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoHighlighter {
    pub fn new() -> Self {
        #[cfg(feature = "syntect")]
        let syntect = SyntectHighlighter::new();
        #[cfg(feature = "treesitter")]
        let mut treesitter = TreeSitterHighlighter::new();

        let background = {
            #[cfg(feature = "syntect")]
            {
                syntect.background_color()
            }
            #[cfg(all(not(feature = "syntect"), feature = "treesitter"))]
            {
                treesitter.background_color()
            }
            #[cfg(all(not(feature = "syntect"), not(feature = "treesitter")))]
            {
                None
            }
        };

        #[cfg(feature = "treesitter")]
        if let Some(bg) = background {
            treesitter.set_background(Some(bg));
        }

        Self {
            preference: AutoHighlighterPreference::TreeSitter,
            background,
            #[cfg(feature = "syntect")]
            syntect,
            #[cfg(feature = "treesitter")]
            treesitter,
        }
    }

    pub fn preference(&self) -> AutoHighlighterPreference {
        self.preference
    }

    pub fn set_preference(&mut self, preference: AutoHighlighterPreference) {
        self.preference = preference;
    }

    pub fn backend_for_language(&self, language: Option<&str>) -> AutoHighlighterBackend {
        #[cfg(feature = "treesitter")]
        let treesitter_ok = language.is_some_and(|l| self.treesitter.supports_language(l));
        #[cfg(not(feature = "treesitter"))]
        let treesitter_ok = false;

        #[cfg(feature = "syntect")]
        let syntect_ok = language.is_some_and(|l| self.syntect.supports_language(l));
        #[cfg(not(feature = "syntect"))]
        let syntect_ok = false;

        match self.preference {
            AutoHighlighterPreference::TreeSitter => {
                if treesitter_ok {
                    AutoHighlighterBackend::TreeSitter
                } else if syntect_ok {
                    AutoHighlighterBackend::Syntect
                } else {
                    AutoHighlighterBackend::None
                }
            }
            AutoHighlighterPreference::Syntect => {
                if syntect_ok {
                    AutoHighlighterBackend::Syntect
                } else if treesitter_ok {
                    AutoHighlighterBackend::TreeSitter
                } else {
                    AutoHighlighterBackend::None
                }
            }
        }
    }
}

impl CodeHighlighter for AutoHighlighter {
    fn background_color(&self) -> Option<Color> {
        self.background
    }

    fn supports_language(&self, language: &str) -> bool {
        self.backend_for_language(Some(language)) != AutoHighlighterBackend::None
    }

    fn highlight_lines(&self, language: Option<&str>, lines: &[&str]) -> Vec<Vec<Span<'static>>> {
        match self.backend_for_language(language) {
            #[cfg(feature = "treesitter")]
            AutoHighlighterBackend::TreeSitter => self.treesitter.highlight_lines(language, lines),
            #[cfg(feature = "syntect")]
            AutoHighlighterBackend::Syntect => self.syntect.highlight_lines(language, lines),
            AutoHighlighterBackend::None => plain_lines(lines),
            #[allow(unreachable_patterns)]
            _ => plain_lines(lines),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_has_no_backend() {
        let h = AutoHighlighter::new();
        assert_eq!(
            h.backend_for_language(Some("cobol")),
            AutoHighlighterBackend::None
        );
        assert!(!h.supports_language("cobol"));
        assert_eq!(h.preference(), AutoHighlighterPreference::TreeSitter);
        let out = h.highlight_lines(Some("cobol"), &["MOVE 1 TO X."]);
        assert_eq!(out, plain_lines(&["MOVE 1 TO X."]));
    }

    #[cfg(all(feature = "syntect", feature = "treesitter-lang-bash"))]
    #[test]
    fn preference_decides_between_backends() {
        let mut h = AutoHighlighter::new();
        assert_eq!(h.preference(), AutoHighlighterPreference::TreeSitter);
        assert_eq!(
            h.backend_for_language(Some("bash")),
            AutoHighlighterBackend::TreeSitter
        );
        h.set_preference(AutoHighlighterPreference::Syntect);
        assert_eq!(h.preference(), AutoHighlighterPreference::Syntect);
        assert_eq!(
            h.backend_for_language(Some("bash")),
            AutoHighlighterBackend::Syntect
        );
    }

    #[cfg(all(feature = "syntect", not(feature = "treesitter")))]
    #[test]
    fn falls_back_to_syntect_without_treesitter() {
        let h = AutoHighlighter::new();
        assert_eq!(
            h.backend_for_language(Some("typescript")),
            AutoHighlighterBackend::Syntect
        );
        assert!(h.background_color().is_some());
    }
}
