//! Lazy, block-by-block rendering.
//!
//! [`Fragments`] renders one top-level block per call to `next`, skipping
//! blocks that produce no output. Collecting it is exactly what
//! [`DocumentRenderer::render`] returns.
//!
//! # Example
//!
//! ```
//! use richdoc::model::DocumentTree;
//! use richdoc::render::DocumentRenderer;
//! use serde_json::json;
//!
//! let doc = DocumentTree::from_value(&json!({
//!     "content": [
//!         {"type": "paragraph", "content": [{"type": "text", "text": "Hello"}]},
//!         {"type": "horizontalRule"}
//!     ]
//! }));
//! let renderer = DocumentRenderer::default();
//! for fragment in renderer.fragments(&doc) {
//!     println!("{}", fragment.kind_name());
//! }
//! ```

use std::iter::FusedIterator;
use std::slice;

use crate::model::{BlockNode, DocumentTree};

use super::{DocumentRenderer, Fragment};

/// Iterator over the fragments of a document.
pub struct Fragments<'a> {
    renderer: &'a DocumentRenderer,
    blocks: slice::Iter<'a, BlockNode>,
    emitted: usize,
}

impl<'a> Fragments<'a> {
    pub(crate) fn new(renderer: &'a DocumentRenderer, doc: &'a DocumentTree) -> Self {
        Self {
            renderer,
            blocks: doc.content.iter(),
            emitted: 0,
        }
    }

    /// Number of fragments yielded so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Number of top-level blocks not yet visited.
    pub fn remaining_blocks(&self) -> usize {
        self.blocks.len()
    }
}

impl Iterator for Fragments<'_> {
    type Item = Fragment;

    fn next(&mut self) -> Option<Self::Item> {
        let renderer = self.renderer;
        let fragment = self
            .blocks
            .find_map(|block| renderer.render_block(block))?;
        self.emitted += 1;
        Some(fragment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.blocks.len()))
    }
}

impl FusedIterator for Fragments<'_> {}
