//! Hosts mounted code blocks and runs highlighting passes after each commit.
//!
//! The pass is global: whenever any block's code changes, every mounted block is re-colored.
//! The pass is idempotent, so re-coloring unchanged blocks only costs time.
//!
//! ```
//! use ratatui_code_block_core::markup::HighlightStatus;
//! use ratatui_code_block_core::request::RenderRequest;
//! use ratatui_code_block_core::surface::CodeSurface;
//!
//! let mut surface = CodeSurface::new();
//! let id = surface.mount(RenderRequest::new("const x = 1;", "typescript"));
//! assert_eq!(surface.commit(), 1);
//! assert_eq!(surface.get(id).map(|m| m.status()), Some(HighlightStatus::Highlighted));
//!
//! // Only a code change schedules another pass.
//! surface.update(id, RenderRequest::new("const x = 1;", "typescript").title("a.ts"));
//! assert_eq!(surface.commit(), 0);
//! ```
use std::sync::Arc;

use crate::markup::CodeBlockMarkup;
use crate::markup::HighlightStatus;
use crate::request::RenderRequest;
use crate::text::CodeHighlighter;

/// Handle to a mounted block. Stays invalid once its block is unmounted, even if the slot is
/// reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockId {
    index: usize,
    generation: u64,
}

#[derive(Clone, Debug)]
struct Mounted {
    request: RenderRequest,
    markup: CodeBlockMarkup,
    /// Code value the change effect last ran for; `None` until the first commit after mount.
    watched_code: Option<String>,
}

impl Mounted {
    /// A pending element always needs a pass, even when its code went back to the watched value.
    fn effect_due(&self) -> bool {
        self.watched_code.as_deref() != Some(self.request.code.as_str())
            || self.markup.status() == HighlightStatus::Pending
    }
}

#[derive(Clone, Debug, Default)]
struct Slot {
    generation: u64,
    mounted: Option<Mounted>,
}

#[derive(Clone, Default)]
pub struct CodeSurface {
    highlighter: Option<Arc<dyn CodeHighlighter + Send + Sync>>,
    slots: Vec<Slot>,
    passes: u64,
}

impl CodeSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_highlighter(highlighter: Arc<dyn CodeHighlighter + Send + Sync>) -> Self {
        Self {
            highlighter: Some(highlighter),
            ..Self::default()
        }
    }

    /// Swaps the backend. Existing coloring stays until the next pass.
    pub fn set_highlighter(&mut self, highlighter: Option<Arc<dyn CodeHighlighter + Send + Sync>>) {
        self.highlighter = highlighter;
    }

    pub fn mount(&mut self, request: RenderRequest) -> BlockId {
        let mounted = Mounted {
            markup: CodeBlockMarkup::new(&request),
            request,
            watched_code: None,
        };
        let index = match self.slots.iter().position(|s| s.mounted.is_none()) {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                self.slots.len() - 1
            }
        };
        let slot = &mut self.slots[index];
        slot.mounted = Some(mounted);
        tracing::debug!(block = index, generation = slot.generation, "code_block.mount");
        BlockId {
            index,
            generation: slot.generation,
        }
    }

    fn mounted(&self, id: BlockId) -> Option<&Mounted> {
        self.slots
            .get(id.index)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.mounted.as_ref())
    }

    fn mounted_mut(&mut self, id: BlockId) -> Option<&mut Mounted> {
        self.slots
            .get_mut(id.index)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.mounted.as_mut())
    }

    /// Replaces the request of a mounted block.
    ///
    /// A changed `code` rebuilds the element (back to pending) and schedules the change effect
    /// for the next [`commit`](Self::commit). Any other change only touches attributes.
    /// Returns whether `code` changed; unknown or stale ids return `false`.
    pub fn update(&mut self, id: BlockId, request: RenderRequest) -> bool {
        let Some(mounted) = self.mounted_mut(id) else {
            return false;
        };
        let code_changed = mounted.request.code != request.code;
        if code_changed {
            mounted.markup = CodeBlockMarkup::new(&request);
        } else {
            mounted.markup.apply_attributes(&request);
        }
        mounted.request = request;
        code_changed
    }

    /// Removes a block together with its change watcher. `id` is dead afterwards.
    pub fn unmount(&mut self, id: BlockId) -> Option<RenderRequest> {
        let slot = self
            .slots
            .get_mut(id.index)
            .filter(|s| s.generation == id.generation)?;
        let mounted = slot.mounted.take()?;
        slot.generation += 1;
        tracing::debug!(block = id.index, "code_block.unmount");
        Some(mounted.request)
    }

    /// Runs the change effects due since the last commit.
    ///
    /// Each block whose code changed (or that was just mounted, or is still pending) triggers
    /// one global pass. Returns the number of passes run.
    pub fn commit(&mut self) -> usize {
        let mut due = 0usize;
        for idx in 0..self.slots.len() {
            let Some(mounted) = self.slots[idx].mounted.as_mut() else {
                continue;
            };
            if !mounted.effect_due() {
                continue;
            }
            mounted.watched_code = Some(mounted.request.code.clone());
            tracing::trace!(block = idx, "code_block.effect.code_changed");
            self.highlight_all();
            due += 1;
        }
        due
    }

    /// Re-colors every mounted block.
    pub fn highlight_all(&mut self) {
        let highlighter = self.highlighter.as_deref().map(|h| h as &dyn CodeHighlighter);
        let mut blocks = 0usize;
        for mounted in self.slots.iter_mut().filter_map(|s| s.mounted.as_mut()) {
            mounted.markup.apply_highlight(highlighter);
            blocks += 1;
        }
        self.passes += 1;
        tracing::trace!(blocks, pass = self.passes, "code_block.highlight_all");
    }

    pub fn get(&self, id: BlockId) -> Option<&CodeBlockMarkup> {
        self.mounted(id).map(|m| &m.markup)
    }

    pub fn request(&self, id: BlockId) -> Option<&RenderRequest> {
        self.mounted(id).map(|m| &m.request)
    }

    /// Mounted blocks in mount-slot order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockId, &CodeBlockMarkup)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.mounted.as_ref().map(|m| {
                let id = BlockId {
                    index,
                    generation: slot.generation,
                };
                (id, &m.markup)
            })
        })
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.mounted.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of highlighting passes run so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }
}
