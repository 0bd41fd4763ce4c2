//! Document model for block-editor content.
//!
//! The editor persists documents as loosely-typed JSON. This module turns
//! that JSON into closed sum types once, so the renderer can match on them
//! exhaustively. Conversion is total: anything the model does not
//! understand becomes an `Unknown` variant or an empty sequence, never an
//! error.

mod block;
mod document;
mod inline;

pub use block::{BlockNode, HeadingLevel, ImageAttrs};
pub use document::DocumentTree;
pub use inline::{InlineNode, Mark};

use serde_json::Value;

/// The `type` discriminator of a node, or `""` when missing.
pub(crate) fn node_type(node: &Value) -> &str {
    node.get("type").and_then(Value::as_str).unwrap_or_default()
}

/// The `content` array of a node. Absent or non-array content is empty.
pub(crate) fn child_nodes(node: &Value) -> &[Value] {
    node.get("content")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// An attribute value from the node's `attrs` map.
pub(crate) fn attr<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    node.get("attrs").and_then(|attrs| attrs.get(key))
}

/// A non-empty string attribute from the node's `attrs` map.
pub(crate) fn attr_str(node: &Value, key: &str) -> Option<String> {
    attr(node, key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
