//! Visitor pattern for customizing rendered output.
//!
//! A visitor sees every top-level fragment after it is rendered and decides
//! whether to keep it, swap it for another fragment, or drop it.
//!
//! # Example
//!
//! ```
//! use richdoc::model::HeadingLevel;
//! use richdoc::render::visitor::{DocumentVisitor, VisitorAction};
//! use richdoc::render::Inline;
//!
//! struct NoTopHeadings;
//!
//! impl DocumentVisitor for NoTopHeadings {
//!     fn visit_heading(&mut self, level: HeadingLevel, _children: &[Inline]) -> VisitorAction {
//!         if level.get() == 1 {
//!             VisitorAction::Skip
//!         } else {
//!             VisitorAction::Continue
//!         }
//!     }
//! }
//! ```

use crate::model::HeadingLevel;

use super::{Fragment, Inline, ListEntry, ListKind};

/// Action returned by visitor methods to control rendering behavior.
#[derive(Debug, Clone, Default)]
pub enum VisitorAction {
    /// Keep the rendered fragment.
    #[default]
    Continue,

    /// Replace the fragment with another one.
    Replace(Fragment),

    /// Drop this fragment.
    Skip,
}

impl VisitorAction {
    /// Check if this action indicates the fragment should be dropped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Check if this action provides a replacement.
    pub fn is_replace(&self) -> bool {
        matches!(self, VisitorAction::Replace(_))
    }

    /// Get the replacement fragment if available.
    pub fn replacement(&self) -> Option<&Fragment> {
        match self {
            VisitorAction::Replace(fragment) => Some(fragment),
            _ => None,
        }
    }
}

/// Trait for visiting fragments during rendering.
///
/// All methods return `VisitorAction::Continue` by default.
pub trait DocumentVisitor: Send + Sync {
    /// Called for each paragraph.
    fn visit_paragraph(&mut self, children: &[Inline]) -> VisitorAction {
        let _ = children;
        VisitorAction::Continue
    }

    /// Called for each heading.
    fn visit_heading(&mut self, level: HeadingLevel, children: &[Inline]) -> VisitorAction {
        let _ = (level, children);
        VisitorAction::Continue
    }

    /// Called for each list container.
    fn visit_list(&mut self, style: ListKind, items: &[ListEntry]) -> VisitorAction {
        let _ = (style, items);
        VisitorAction::Continue
    }

    /// Called for each image.
    fn visit_image(&mut self, src: &str, alt: &str, caption: Option<&str>) -> VisitorAction {
        let _ = (src, alt, caption);
        VisitorAction::Continue
    }

    /// Called for each code block.
    fn visit_code_block(&mut self, children: &[Inline]) -> VisitorAction {
        let _ = children;
        VisitorAction::Continue
    }

    /// Called for each quotation.
    fn visit_quote(&mut self, children: &[Inline]) -> VisitorAction {
        let _ = children;
        VisitorAction::Continue
    }

    /// Called for each divider.
    fn visit_divider(&mut self) -> VisitorAction {
        VisitorAction::Continue
    }

    /// Called before the first fragment.
    ///
    /// # Arguments
    /// * `block_count` - Number of top-level blocks in the source document
    fn on_document_start(&mut self, block_count: usize) {
        let _ = block_count;
    }

    /// Called after the last fragment.
    ///
    /// # Arguments
    /// * `fragment_count` - Number of fragments kept in the output
    fn on_document_end(&mut self, fragment_count: usize) {
        let _ = fragment_count;
    }
}

/// Route a fragment to the matching visitor method.
pub fn visit_fragment(visitor: &mut dyn DocumentVisitor, fragment: &Fragment) -> VisitorAction {
    match fragment {
        Fragment::Paragraph { children } => visitor.visit_paragraph(children),
        Fragment::Heading { level, children } => visitor.visit_heading(*level, children),
        Fragment::List { style, items } => visitor.visit_list(*style, items),
        Fragment::Quote { children } => visitor.visit_quote(children),
        Fragment::CodeBlock { children } => visitor.visit_code_block(children),
        Fragment::Divider => visitor.visit_divider(),
        Fragment::Image { src, alt, caption } => visitor.visit_image(src, alt, caption.as_deref()),
        Fragment::LineBreak => VisitorAction::Continue,
    }
}

/// Default visitor that performs no customization.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentVisitor for DefaultVisitor {}

/// Visitor that drops all images.
#[derive(Debug, Clone, Default)]
pub struct SkipImagesVisitor;

impl DocumentVisitor for SkipImagesVisitor {
    fn visit_image(&mut self, _src: &str, _alt: &str, _caption: Option<&str>) -> VisitorAction {
        VisitorAction::Skip
    }
}

/// Visitor that demotes headings above a maximum rank.
///
/// With `new(3)`, `h1` and `h2` become `h3`; smaller headings are kept.
#[derive(Debug, Clone)]
pub struct MaxHeadingDepthVisitor {
    top_level: HeadingLevel,
}

impl MaxHeadingDepthVisitor {
    /// Create a visitor whose largest allowed heading is `top_level`.
    pub fn new(top_level: u8) -> Self {
        Self {
            top_level: HeadingLevel::from(top_level),
        }
    }
}

impl DocumentVisitor for MaxHeadingDepthVisitor {
    fn visit_heading(&mut self, level: HeadingLevel, children: &[Inline]) -> VisitorAction {
        if level >= self.top_level {
            return VisitorAction::Continue;
        }
        VisitorAction::Replace(Fragment::Heading {
            level: self.top_level,
            children: children.to_vec(),
        })
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn DocumentVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: DocumentVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    /// Number of visitors in the chain.
    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    /// Check if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }

    fn first_action(
        &mut self,
        mut call: impl FnMut(&mut dyn DocumentVisitor) -> VisitorAction,
    ) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = call(visitor.as_mut());
            if !matches!(action, VisitorAction::Continue) {
                return action;
            }
        }
        VisitorAction::Continue
    }
}

impl Default for CompositeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentVisitor for CompositeVisitor {
    fn visit_paragraph(&mut self, children: &[Inline]) -> VisitorAction {
        self.first_action(|v| v.visit_paragraph(children))
    }

    fn visit_heading(&mut self, level: HeadingLevel, children: &[Inline]) -> VisitorAction {
        self.first_action(|v| v.visit_heading(level, children))
    }

    fn visit_list(&mut self, style: ListKind, items: &[ListEntry]) -> VisitorAction {
        self.first_action(|v| v.visit_list(style, items))
    }

    fn visit_image(&mut self, src: &str, alt: &str, caption: Option<&str>) -> VisitorAction {
        self.first_action(|v| v.visit_image(src, alt, caption))
    }

    fn visit_code_block(&mut self, children: &[Inline]) -> VisitorAction {
        self.first_action(|v| v.visit_code_block(children))
    }

    fn visit_quote(&mut self, children: &[Inline]) -> VisitorAction {
        self.first_action(|v| v.visit_quote(children))
    }

    fn visit_divider(&mut self) -> VisitorAction {
        self.first_action(|v| v.visit_divider())
    }

    fn on_document_start(&mut self, block_count: usize) {
        for visitor in &mut self.visitors {
            visitor.on_document_start(block_count);
        }
    }

    fn on_document_end(&mut self, fragment_count: usize) {
        for visitor in &mut self.visitors {
            visitor.on_document_end(fragment_count);
        }
    }
}
