//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

use super::{Fragment, Inline};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (HTML, Markdown, text, ...)
    pub content: String,

    /// Fragment statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: RenderStats) -> Self {
        Self { content, stats }
    }

    /// Create a simple result with just content.
    pub fn content_only(content: String) -> Self {
        Self {
            content,
            stats: RenderStats::default(),
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Counts of rendered fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Top-level fragments
    pub fragment_count: u32,

    /// Paragraphs
    pub paragraph_count: u32,

    /// Headings
    pub heading_count: u32,

    /// List containers
    pub list_count: u32,

    /// List entries across all lists
    pub list_item_count: u32,

    /// Quotations
    pub quote_count: u32,

    /// Code blocks
    pub code_block_count: u32,

    /// Images
    pub image_count: u32,

    /// Dividers
    pub divider_count: u32,

    /// Anchors, including nested ones
    pub link_count: u32,

    /// Anchors carrying the external marker
    pub external_link_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally a fragment list.
    pub fn from_fragments(fragments: &[Fragment]) -> Self {
        let mut stats = Self::new();
        for fragment in fragments {
            stats.add_fragment(fragment);
        }
        stats
    }

    /// Tally one top-level fragment.
    pub fn add_fragment(&mut self, fragment: &Fragment) {
        self.fragment_count += 1;
        match fragment {
            Fragment::Paragraph { .. } => self.paragraph_count += 1,
            Fragment::Heading { .. } => self.heading_count += 1,
            Fragment::List { items, .. } => {
                self.list_count += 1;
                self.list_item_count += items.len() as u32;
                for item in items {
                    self.count_inlines(&item.children);
                }
            }
            Fragment::Quote { .. } => self.quote_count += 1,
            Fragment::CodeBlock { .. } => self.code_block_count += 1,
            Fragment::Image { .. } => self.image_count += 1,
            Fragment::Divider => self.divider_count += 1,
            Fragment::LineBreak => {}
        }
        if let Some(children) = fragment.children() {
            self.count_inlines(children);
        }
        self.count_text(&fragment.plain_text());
    }

    /// Count words and characters in text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    fn count_inlines(&mut self, children: &[Inline]) {
        for child in children {
            match child {
                Inline::Link {
                    external, children, ..
                } => {
                    self.link_count += 1;
                    if *external {
                        self.external_link_count += 1;
                    }
                    self.count_inlines(children);
                }
                Inline::Mark { children, .. } => self.count_inlines(children),
                Inline::Text { .. } | Inline::LineBreak => {}
            }
        }
    }
}
