//! Block-level nodes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{attr, attr_str, child_nodes, node_type, InlineNode};

/// One block-level element of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockNode {
    /// Plain paragraph
    Paragraph {
        /// Inline content
        content: Vec<InlineNode>,
    },

    /// Heading with a clamped level
    Heading {
        /// Heading rank
        level: HeadingLevel,
        /// Inline content
        content: Vec<InlineNode>,
    },

    /// Unordered list; each item holds the inline content of one `listItem`
    BulletList {
        /// List items in order
        items: Vec<Vec<InlineNode>>,
    },

    /// Ordered list; each item holds the inline content of one `listItem`
    OrderedList {
        /// List items in order
        items: Vec<Vec<InlineNode>>,
    },

    /// A `listItem` outside of any list container
    ListItem {
        /// Inline content
        content: Vec<InlineNode>,
    },

    /// Quotation
    Blockquote {
        /// Inline content
        content: Vec<InlineNode>,
    },

    /// Preformatted code
    CodeBlock {
        /// Inline content, rendered verbatim
        content: Vec<InlineNode>,
    },

    /// Divider
    HorizontalRule,

    /// Image with optional caption
    Image(ImageAttrs),

    /// Line break at block position
    HardBreak,

    /// Any other discriminator
    Unknown {
        /// The unrecognized `type` value
        kind: String,
    },
}

impl BlockNode {
    /// Convert one editor JSON node.
    pub fn from_value(value: &Value) -> Self {
        match node_type(value) {
            "paragraph" => BlockNode::Paragraph {
                content: InlineNode::children_of(value),
            },
            "heading" => BlockNode::Heading {
                level: HeadingLevel::from_attr(attr(value, "level")),
                content: InlineNode::children_of(value),
            },
            "bulletList" => BlockNode::BulletList {
                items: list_items(value),
            },
            "orderedList" => BlockNode::OrderedList {
                items: list_items(value),
            },
            "listItem" => BlockNode::ListItem {
                content: InlineNode::children_of(value),
            },
            "blockquote" => BlockNode::Blockquote {
                content: InlineNode::children_of(value),
            },
            "codeBlock" => BlockNode::CodeBlock {
                content: InlineNode::children_of(value),
            },
            "horizontalRule" => BlockNode::HorizontalRule,
            "image" => BlockNode::Image(ImageAttrs {
                src: attr_str(value, "src"),
                alt: attr_str(value, "alt"),
                title: attr_str(value, "title"),
            }),
            "hardBreak" => BlockNode::HardBreak,
            other => BlockNode::Unknown {
                kind: other.to_string(),
            },
        }
    }

    /// Create a paragraph holding a single text node.
    pub fn paragraph(text: impl Into<String>) -> Self {
        BlockNode::Paragraph {
            content: vec![InlineNode::text(text)],
        }
    }

    /// Create a heading holding a single text node.
    pub fn heading(text: impl Into<String>, level: i64) -> Self {
        BlockNode::Heading {
            level: HeadingLevel::new(level),
            content: vec![InlineNode::text(text)],
        }
    }

    /// The editor discriminator this node was built from.
    pub fn kind(&self) -> &str {
        match self {
            BlockNode::Paragraph { .. } => "paragraph",
            BlockNode::Heading { .. } => "heading",
            BlockNode::BulletList { .. } => "bulletList",
            BlockNode::OrderedList { .. } => "orderedList",
            BlockNode::ListItem { .. } => "listItem",
            BlockNode::Blockquote { .. } => "blockquote",
            BlockNode::CodeBlock { .. } => "codeBlock",
            BlockNode::HorizontalRule => "horizontalRule",
            BlockNode::Image(_) => "image",
            BlockNode::HardBreak => "hardBreak",
            BlockNode::Unknown { kind } => kind,
        }
    }
}

/// Inline content of every `listItem` child; other children are dropped.
fn list_items(list: &Value) -> Vec<Vec<InlineNode>> {
    child_nodes(list)
        .iter()
        .filter(|child| node_type(child) == "listItem")
        .map(InlineNode::children_of)
        .collect()
}

/// Attributes of an image block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageAttrs {
    /// Image location; an image without one renders nothing
    pub src: Option<String>,

    /// Alternative text
    pub alt: Option<String>,

    /// Title, shown as a caption
    pub title: Option<String>,
}

/// Heading rank, always within 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct HeadingLevel(u8);

/// Font sizes in pixels, indexed by level - 1.
const HEADING_WEIGHTS: [u16; 6] = [36, 30, 24, 20, 18, 16];

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

impl HeadingLevel {
    /// Smallest level (largest heading).
    pub const MIN: u8 = 1;
    /// Largest level (smallest heading).
    pub const MAX: u8 = 6;
    /// Level used when the attribute is missing or not a number.
    pub const DEFAULT: u8 = 2;

    /// Create a level, clamping into 1..=6.
    pub fn new(level: i64) -> Self {
        Self(level.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    /// Read a level from a `level` attribute value.
    ///
    /// Integers are clamped, floats are truncated first, anything else
    /// (including numeric strings) falls back to [`HeadingLevel::DEFAULT`].
    pub fn from_attr(value: Option<&Value>) -> Self {
        value
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
            .map(Self::new)
            .unwrap_or_default()
    }

    /// The numeric level.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Presentational weight in pixels. Strictly decreasing with level.
    pub fn weight(self) -> u16 {
        HEADING_WEIGHTS[(self.0 - 1) as usize]
    }

    /// HTML tag name.
    pub fn tag(self) -> &'static str {
        HEADING_TAGS[(self.0 - 1) as usize]
    }
}

impl Default for HeadingLevel {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl From<u8> for HeadingLevel {
    fn from(level: u8) -> Self {
        Self::new(level as i64)
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.0
    }
}
