//! Syntax highlighting backends for `ratatui-code-block`.
//!
//! Backends implement [`ratatui_code_block_core::text::CodeHighlighter`]:
//! - `syntect` (feature: `syntect`)
//! - Tree-sitter (feature: `treesitter` + per-language features, or `treesitter-langs-web`)
//! - [`auto::AutoHighlighter`] picks between whichever are compiled in.
//!
//! All backends accept the same language tags; see [`language::Language::from_tag`].
#[cfg(feature = "syntect")]
pub mod syntect;

#[cfg(feature = "treesitter")]
pub mod treesitter;

pub mod auto;
pub mod error;
pub mod language;

pub use error::HighlightError;
pub use language::Language;
