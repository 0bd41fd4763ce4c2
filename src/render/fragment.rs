//! Output fragments produced by the renderer.
//!
//! Fragments are presentation-neutral: each writer (HTML, Markdown, text,
//! JSON) turns the same fragment list into its own medium.

use serde::{Deserialize, Serialize};

use crate::model::{HeadingLevel, Mark};

/// Target used when a link does not name one.
pub const DEFAULT_LINK_TARGET: &str = "_self";

/// A block-level output fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fragment {
    /// Paragraph
    Paragraph {
        /// Inline content
        children: Vec<Inline>,
    },

    /// Heading
    Heading {
        /// Heading rank
        level: HeadingLevel,
        /// Inline content
        children: Vec<Inline>,
    },

    /// List container
    List {
        /// Bullet or ordered
        style: ListKind,
        /// Entries in order
        items: Vec<ListEntry>,
    },

    /// Quotation
    Quote {
        /// Inline content
        children: Vec<Inline>,
    },

    /// Preformatted code
    CodeBlock {
        /// Inline content
        children: Vec<Inline>,
    },

    /// Divider
    Divider,

    /// Image, with the caption placed directly beneath it
    Image {
        /// Image location
        src: String,
        /// Alternative text (empty when not given)
        alt: String,
        /// Caption text. Writers emit it as its own element immediately
        /// after the image, never elsewhere in the document.
        caption: Option<String>,
    },

    /// Line break
    LineBreak,
}

impl Fragment {
    /// Build a paragraph.
    pub fn paragraph(children: Vec<Inline>) -> Self {
        Fragment::Paragraph { children }
    }

    /// Short name of the fragment kind, matching its serialized tag.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Fragment::Paragraph { .. } => "paragraph",
            Fragment::Heading { .. } => "heading",
            Fragment::List { .. } => "list",
            Fragment::Quote { .. } => "quote",
            Fragment::CodeBlock { .. } => "code_block",
            Fragment::Divider => "divider",
            Fragment::Image { .. } => "image",
            Fragment::LineBreak => "line_break",
        }
    }

    /// Inline children of text-bearing fragments.
    pub fn children(&self) -> Option<&[Inline]> {
        match self {
            Fragment::Paragraph { children }
            | Fragment::Heading { children, .. }
            | Fragment::Quote { children }
            | Fragment::CodeBlock { children } => Some(children),
            _ => None,
        }
    }

    /// Plain text of the fragment. List entries are separated by newlines;
    /// images contribute their caption only.
    pub fn plain_text(&self) -> String {
        match self {
            Fragment::Paragraph { children }
            | Fragment::Heading { children, .. }
            | Fragment::Quote { children }
            | Fragment::CodeBlock { children } => inline_text(children),
            Fragment::List { items, .. } => items
                .iter()
                .map(|item| inline_text(&item.children))
                .collect::<Vec<_>>()
                .join("\n"),
            Fragment::Image { caption, .. } => caption.clone().unwrap_or_default(),
            Fragment::LineBreak => "\n".to_string(),
            Fragment::Divider => String::new(),
        }
    }
}

/// Kind of list container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Unordered
    #[default]
    Bullet,
    /// Numbered
    Ordered,
}

/// One entry of a list fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    /// Inline content
    pub children: Vec<Inline>,
}

impl ListEntry {
    /// Create an entry.
    pub fn new(children: Vec<Inline>) -> Self {
        Self { children }
    }
}

/// A span-level output fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Inline {
    /// Literal text
    Text {
        /// The text
        text: String,
    },

    /// Line break
    LineBreak,

    /// Marked span
    Mark {
        /// Which mark
        mark: Mark,
        /// Wrapped content
        children: Vec<Inline>,
    },

    /// Anchor
    Link {
        /// Destination
        href: Option<String>,
        /// Browsing context
        target: String,
        /// Set when `href` is an http(s) URL: open without leaking
        /// referrer or opener
        external: bool,
        /// Link text
        children: Vec<Inline>,
    },
}

impl Inline {
    /// Build a text span.
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text { text: text.into() }
    }

    /// Build a marked span.
    pub fn mark(mark: Mark, children: Vec<Inline>) -> Self {
        Inline::Mark { mark, children }
    }

    /// Build an anchor, deriving the external marker from `href`.
    pub fn link(href: Option<String>, target: Option<String>, children: Vec<Inline>) -> Self {
        let external = href.as_deref().is_some_and(is_external_href);
        Inline::Link {
            href,
            target: target.unwrap_or_else(|| DEFAULT_LINK_TARGET.to_string()),
            external,
            children,
        }
    }

    /// Plain text of the span.
    pub fn plain_text(&self) -> String {
        match self {
            Inline::Text { text } => text.clone(),
            Inline::LineBreak => "\n".to_string(),
            Inline::Mark { children, .. } | Inline::Link { children, .. } => inline_text(children),
        }
    }
}

/// Concatenated plain text of a span sequence.
pub fn inline_text(children: &[Inline]) -> String {
    children.iter().map(Inline::plain_text).collect()
}

/// Whether `href` uses an http or https scheme.
pub fn is_external_href(href: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        href.len() >= scheme.len()
            && href.as_bytes()[..scheme.len()].eq_ignore_ascii_case(scheme.as_bytes())
    })
}
