//! Syntax-highlighted code blocks for ratatui.
//!
//! ```
//! use ratatui::buffer::Buffer;
//! use ratatui::layout::Rect;
//! use ratatui::widgets::Widget;
//! use ratatui_code_block::{CodeBlock, CodeSurface, RenderRequest};
//!
//! let mut surface = CodeSurface::with_highlighter(ratatui_code_block::default_highlighter());
//! let id = surface.mount(RenderRequest::new("echo hi", "bash").title("install.sh"));
//! surface.commit();
//!
//! let area = Rect::new(0, 0, 30, 4);
//! let mut buf = Buffer::empty(area);
//! if let Some(markup) = surface.get(id) {
//!     CodeBlock::new(markup).render(area, &mut buf);
//! }
//! ```
//!
//! Enable `syntect` and/or `treesitter-langs-web` to get colors; without a backend the blocks
//! render as plain text.
use std::sync::Arc;

pub use ratatui_code_block_core::code_block;
pub use ratatui_code_block_core::code_render;
pub use ratatui_code_block_core::markup;
pub use ratatui_code_block_core::render;
pub use ratatui_code_block_core::request;
pub use ratatui_code_block_core::surface;
pub use ratatui_code_block_core::text;
pub use ratatui_code_block_core::theme;

pub use ratatui_code_block_core::code_block::{CodeBlock, CodeBlockOptions};
pub use ratatui_code_block_core::markup::{CodeBlockMarkup, HighlightStatus};
pub use ratatui_code_block_core::request::RenderRequest;
pub use ratatui_code_block_core::surface::{BlockId, CodeSurface};
pub use ratatui_code_block_core::text::CodeHighlighter;
pub use ratatui_code_block_core::theme::Theme;

#[cfg(any(feature = "syntect", feature = "treesitter"))]
pub use ratatui_code_block_syntax as syntax;

/// The best highlighter compiled in: [`syntax::auto::AutoHighlighter`] when a backend feature
/// is enabled, otherwise [`text::NoHighlight`].
pub fn default_highlighter() -> Arc<dyn CodeHighlighter + Send + Sync> {
    #[cfg(any(feature = "syntect", feature = "treesitter"))]
    {
        Arc::new(syntax::auto::AutoHighlighter::new())
    }
    #[cfg(not(any(feature = "syntect", feature = "treesitter")))]
    {
        Arc::new(text::NoHighlight)
    }
}
