//! Document-level types.

use serde_json::Value;

use super::{child_nodes, BlockNode};

/// The root of an editor document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentTree {
    /// Top-level blocks in document order
    pub content: Vec<BlockNode>,
}

impl DocumentTree {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from already-typed blocks.
    pub fn from_blocks(content: Vec<BlockNode>) -> Self {
        Self { content }
    }

    /// Convert an editor JSON value.
    ///
    /// Never fails. A value without a `content` array (including `null`,
    /// strings, and `{}`) is an empty document.
    pub fn from_value(value: &Value) -> Self {
        Self {
            content: child_nodes(value)
                .iter()
                .map(BlockNode::from_value)
                .collect(),
        }
    }

    /// Append a block.
    pub fn push(&mut self, block: BlockNode) {
        self.content.push(block);
    }

    /// Number of top-level blocks.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl From<&Value> for DocumentTree {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}
