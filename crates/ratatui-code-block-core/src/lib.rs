//! `ratatui-code-block-core` provides the building blocks for rendering highlighted code blocks
//! in terminal UIs.
//!
//! Highlighting backends (`syntect`, tree-sitter) live in the feature-gated
//! `ratatui-code-block-syntax` crate. This crate only knows about the [`text::CodeHighlighter`]
//! trait.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive updates + rendering from your app.
//! - No async runtime: highlighting passes run synchronously on the caller's thread.
//! - Highlighting is keyed on the code text: a block is re-colored when its code changes, never
//!   because its title, language or gutter setting changed.
//!
//! ## Getting started
//!
//! Most users should depend on the facade crate `ratatui-code-block`.
//!
//! Useful entry points:
//! - [`request::RenderRequest`]: what a caller asks to render.
//! - [`surface::CodeSurface`]: hosts mounted blocks and runs highlighting passes on commit.
//! - [`code_block::CodeBlock`]: the widget that draws a block into a buffer.
//! - [`code_render::render_code_lines`]: render core (gutter + spans) for custom layouts.
pub mod theme;

pub mod text;

pub mod render;

pub mod code_render;

pub mod request;

pub mod markup;

pub mod code_block;
pub mod surface;
