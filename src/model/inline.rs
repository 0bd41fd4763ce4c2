//! Inline-level nodes: text spans and the marks that wrap them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{attr_str, child_nodes, node_type};

/// Inline content within a text-bearing block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    /// Literal text
    Text(String),

    /// A line break inside a block
    HardBreak,

    /// A formatting mark wrapping nested content
    Mark {
        /// Which mark
        mark: Mark,
        /// Wrapped content
        content: Vec<InlineNode>,
    },

    /// A hyperlink wrapping nested content
    Link {
        /// Link destination
        href: Option<String>,
        /// Browsing context (`_blank`, ...)
        target: Option<String>,
        /// Link text
        content: Vec<InlineNode>,
    },

    /// Any other discriminator. Its content still renders.
    Unknown {
        /// The unrecognized `type` value
        kind: String,
        /// Nested content
        content: Vec<InlineNode>,
    },
}

impl InlineNode {
    /// Convert one editor JSON node.
    pub fn from_value(value: &Value) -> Self {
        match node_type(value) {
            "text" => InlineNode::Text(
                value
                    .get("text")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            ),
            "hardBreak" => InlineNode::HardBreak,
            "link" => InlineNode::Link {
                href: attr_str(value, "href"),
                target: attr_str(value, "target"),
                content: Self::children_of(value),
            },
            other => {
                let content = Self::children_of(value);
                match Mark::from_type(other) {
                    Some(mark) => InlineNode::Mark { mark, content },
                    None => InlineNode::Unknown {
                        kind: other.to_string(),
                        content,
                    },
                }
            }
        }
    }

    /// Convert the `content` array of `parent` into inline nodes.
    pub fn children_of(parent: &Value) -> Vec<InlineNode> {
        child_nodes(parent).iter().map(Self::from_value).collect()
    }

    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        InlineNode::Text(text.into())
    }

    /// Wrap content in a mark.
    pub fn mark(mark: Mark, content: Vec<InlineNode>) -> Self {
        InlineNode::Mark { mark, content }
    }

    /// Create a link with the given destination.
    pub fn link(href: impl Into<String>, content: Vec<InlineNode>) -> Self {
        InlineNode::Link {
            href: Some(href.into()),
            target: None,
            content,
        }
    }

    /// Text content with all marks removed.
    pub fn plain_text(&self) -> String {
        match self {
            InlineNode::Text(text) => text.clone(),
            InlineNode::HardBreak => "\n".to_string(),
            InlineNode::Mark { content, .. }
            | InlineNode::Link { content, .. }
            | InlineNode::Unknown { content, .. } => content.iter().map(Self::plain_text).collect(),
        }
    }
}

/// Formatting marks understood by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    /// `em` / `italic`
    Emphasis,
    /// `strong` / `bold`
    Strong,
    /// Inline `code`
    Code,
    /// `underline`
    Underline,
    /// `strike`
    Strike,
    /// `superscript`
    Superscript,
    /// `subscript`
    Subscript,
}

impl Mark {
    /// Map an editor discriminator to a mark, folding aliases.
    pub fn from_type(kind: &str) -> Option<Self> {
        match kind {
            "em" | "italic" => Some(Mark::Emphasis),
            "strong" | "bold" => Some(Mark::Strong),
            "code" => Some(Mark::Code),
            "underline" => Some(Mark::Underline),
            "strike" => Some(Mark::Strike),
            "superscript" => Some(Mark::Superscript),
            "subscript" => Some(Mark::Subscript),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_without_text_field() {
        let node = InlineNode::from_value(&json!({"type": "text"}));
        assert_eq!(node, InlineNode::Text(String::new()));
    }

    #[test]
    fn test_mark_aliases() {
        assert_eq!(Mark::from_type("em"), Some(Mark::Emphasis));
        assert_eq!(Mark::from_type("italic"), Some(Mark::Emphasis));
        assert_eq!(Mark::from_type("strong"), Some(Mark::Strong));
        assert_eq!(Mark::from_type("bold"), Some(Mark::Strong));
        assert_eq!(Mark::from_type("highlight"), None);
    }

    #[test]
    fn test_link_attrs() {
        let node = InlineNode::from_value(&json!({
            "type": "link",
            "attrs": {"href": "https://example.com", "target": "_blank"},
            "content": [{"type": "text", "text": "site"}]
        }));
        match node {
            InlineNode::Link {
                href,
                target,
                content,
            } => {
                assert_eq!(href.as_deref(), Some("https://example.com"));
                assert_eq!(target.as_deref(), Some("_blank"));
                assert_eq!(content, vec![InlineNode::text("site")]);
            }
            other => panic!("Expected link, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_keeps_content() {
        let node = InlineNode::from_value(&json!({
            "type": "unknownMark",
            "content": [{"type": "text", "text": "hi"}]
        }));
        assert_eq!(
            node,
            InlineNode::Unknown {
                kind: "unknownMark".to_string(),
                content: vec![InlineNode::text("hi")],
            }
        );
    }

    #[test]
    fn test_plain_text_nested() {
        let node = InlineNode::mark(
            Mark::Strong,
            vec![
                InlineNode::text("a"),
                InlineNode::HardBreak,
                InlineNode::mark(Mark::Emphasis, vec![InlineNode::text("b")]),
            ],
        );
        assert_eq!(node.plain_text(), "a\nb");
    }
}
