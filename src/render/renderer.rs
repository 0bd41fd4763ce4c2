//! The document renderer: editor tree in, output fragments out.
//!
//! Block and inline nodes are dispatched differently on purpose:
//!
//! - an unrecognized block (or a `listItem` outside a list) produces no
//!   fragment at all, whatever its content;
//! - an unrecognized inline node is transparent, and its content is spliced
//!   into the parent sequence without a wrapper.
//!
//! Rendering is pure and total. It never fails and never touches the input.

use serde_json::Value;

use crate::model::{BlockNode, DocumentTree, InlineNode};

use super::visitor::{visit_fragment, DocumentVisitor, VisitorAction};
use super::{Fragment, Fragments, Inline, ListEntry, ListKind, RenderOptions};

/// Render an editor JSON value with default options.
///
/// Returns one fragment per top-level block that produced output, in
/// document order. Any input shape is accepted; `{}` and `null` give an
/// empty list.
pub fn render_document(tree: &Value) -> Vec<Fragment> {
    DocumentRenderer::default().render(&DocumentTree::from_value(tree))
}

/// Renders document trees into fragments.
#[derive(Debug, Clone, Default)]
pub struct DocumentRenderer {
    options: RenderOptions,
}

impl DocumentRenderer {
    /// Create a renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// The options this renderer was built with.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a whole document.
    pub fn render(&self, doc: &DocumentTree) -> Vec<Fragment> {
        let fragments: Vec<Fragment> = self.fragments(doc).collect();
        log::trace!(
            "rendered {} fragments from {} blocks",
            fragments.len(),
            doc.len()
        );
        fragments
    }

    /// Lazily render a document, one fragment at a time.
    pub fn fragments<'a>(&'a self, doc: &'a DocumentTree) -> Fragments<'a> {
        Fragments::new(self, doc)
    }

    /// Render a document, letting `visitor` keep, replace, or drop each
    /// fragment.
    pub fn render_with_visitor(
        &self,
        doc: &DocumentTree,
        visitor: &mut dyn DocumentVisitor,
    ) -> Vec<Fragment> {
        visitor.on_document_start(doc.len());

        let mut output = Vec::with_capacity(doc.len());
        for fragment in self.fragments(doc) {
            match visit_fragment(visitor, &fragment) {
                VisitorAction::Continue => output.push(fragment),
                VisitorAction::Replace(replacement) => output.push(replacement),
                VisitorAction::Skip => {}
            }
        }

        visitor.on_document_end(output.len());
        output
    }

    /// Render one top-level block. `None` means the block produces no output.
    pub fn render_block(&self, block: &BlockNode) -> Option<Fragment> {
        const DEPTH: usize = 1;
        if !self.within_depth(DEPTH) {
            return None;
        }

        let fragment = match block {
            BlockNode::Paragraph { content } => Fragment::Paragraph {
                children: self.render_inlines(content, DEPTH + 1),
            },
            BlockNode::Heading { level, content } => Fragment::Heading {
                level: *level,
                children: self.render_inlines(content, DEPTH + 1),
            },
            BlockNode::BulletList { items } => self.render_list(ListKind::Bullet, items, DEPTH),
            BlockNode::OrderedList { items } => self.render_list(ListKind::Ordered, items, DEPTH),
            BlockNode::Blockquote { content } => Fragment::Quote {
                children: self.render_inlines(content, DEPTH + 1),
            },
            BlockNode::CodeBlock { content } => Fragment::CodeBlock {
                children: self.render_inlines(content, DEPTH + 1),
            },
            BlockNode::HorizontalRule => Fragment::Divider,
            BlockNode::Image(attrs) => Fragment::Image {
                src: attrs.src.clone()?,
                alt: attrs.alt.clone().unwrap_or_default(),
                caption: attrs.title.clone(),
            },
            BlockNode::HardBreak => Fragment::LineBreak,
            BlockNode::ListItem { .. } | BlockNode::Unknown { .. } => return None,
        };

        Some(fragment)
    }

    /// Render an inline sequence that sits directly inside a block.
    pub fn render_inline(&self, nodes: &[InlineNode]) -> Vec<Inline> {
        self.render_inlines(nodes, 2)
    }

    fn render_list(&self, style: ListKind, items: &[Vec<InlineNode>], depth: usize) -> Fragment {
        let items = if self.within_depth(depth + 1) {
            items
                .iter()
                .map(|content| ListEntry::new(self.render_inlines(content, depth + 2)))
                .collect()
        } else {
            Vec::new()
        };
        Fragment::List { style, items }
    }

    fn render_inlines(&self, nodes: &[InlineNode], depth: usize) -> Vec<Inline> {
        let mut output = Vec::with_capacity(nodes.len());
        self.push_inlines(&mut output, nodes, depth);
        output
    }

    fn push_inlines(&self, output: &mut Vec<Inline>, nodes: &[InlineNode], depth: usize) {
        if !self.within_depth(depth) {
            return;
        }

        for node in nodes {
            match node {
                InlineNode::Text(text) => output.push(Inline::text(text.as_str())),
                InlineNode::HardBreak => output.push(Inline::LineBreak),
                InlineNode::Mark { mark, content } => {
                    output.push(Inline::mark(*mark, self.render_inlines(content, depth + 1)));
                }
                InlineNode::Link {
                    href,
                    target,
                    content,
                } => output.push(Inline::link(
                    href.clone(),
                    target.clone(),
                    self.render_inlines(content, depth + 1),
                )),
                // Transparent: splice the content into the parent.
                InlineNode::Unknown { content, .. } => {
                    self.push_inlines(output, content, depth + 1);
                }
            }
        }
    }

    fn within_depth(&self, depth: usize) -> bool {
        self.options.max_depth.map_or(true, |max| depth <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, ImageAttrs, Mark};
    use serde_json::json;

    #[test]
    fn test_empty_document() {
        assert!(render_document(&json!({})).is_empty());
        assert!(render_document(&Value::Null).is_empty());
    }

    #[test]
    fn test_simple_paragraph() {
        let fragments = render_document(&json!({
            "content": [{"type": "paragraph", "content": [{"type": "text", "text": "Hello"}]}]
        }));
        assert_eq!(
            fragments,
            vec![Fragment::paragraph(vec![Inline::text("Hello")])]
        );
    }

    #[test]
    fn test_nested_marks_order() {
        let fragments = render_document(&json!({
            "content": [{"type": "paragraph", "content": [{
                "type": "strong",
                "content": [{"type": "em", "content": [{"type": "text", "text": "x"}]}]
            }]}]
        }));
        assert_eq!(
            fragments,
            vec![Fragment::paragraph(vec![Inline::mark(
                Mark::Strong,
                vec![Inline::mark(Mark::Emphasis, vec![Inline::text("x")])]
            )])]
        );
    }

    #[test]
    fn test_unknown_inline_is_transparent() {
        let fragments = render_document(&json!({
            "content": [{"type": "paragraph", "content": [
                {"type": "text", "text": "a"},
                {"type": "unknownMark", "content": [{"type": "text", "text": "hi"}]},
                {"type": "text", "text": "b"}
            ]}]
        }));
        assert_eq!(
            fragments,
            vec![Fragment::paragraph(vec![
                Inline::text("a"),
                Inline::text("hi"),
                Inline::text("b"),
            ])]
        );
    }

    #[test]
    fn test_top_level_list_item_dropped() {
        let fragments = render_document(&json!({
            "content": [
                {"type": "listItem", "content": [{"type": "text", "text": "orphan"}]},
                {"type": "horizontalRule"}
            ]
        }));
        assert_eq!(fragments, vec![Fragment::Divider]);
    }

    #[test]
    fn test_image_without_src_dropped() {
        let renderer = DocumentRenderer::default();
        let block = BlockNode::Image(ImageAttrs {
            src: None,
            alt: Some("missing".to_string()),
            title: None,
        });
        assert_eq!(renderer.render_block(&block), None);
    }

    #[test]
    fn test_heading_level_carried() {
        let renderer = DocumentRenderer::default();
        let fragment = renderer.render_block(&BlockNode::heading("Title", 9));
        assert_eq!(
            fragment,
            Some(Fragment::Heading {
                level: HeadingLevel::new(6),
                children: vec![Inline::text("Title")],
            })
        );
    }

    #[test]
    fn test_max_depth_cuts_nested_marks() {
        let doc = DocumentTree::from_value(&json!({
            "content": [{"type": "paragraph", "content": [
                {"type": "text", "text": "top"},
                {"type": "strong", "content": [{"type": "text", "text": "deep"}]}
            ]}]
        }));
        let renderer = DocumentRenderer::new(RenderOptions::new().with_max_depth(2));
        assert_eq!(
            renderer.render(&doc),
            vec![Fragment::paragraph(vec![
                Inline::text("top"),
                Inline::mark(Mark::Strong, vec![]),
            ])]
        );

        let renderer = DocumentRenderer::new(RenderOptions::new().with_max_depth(0));
        assert!(renderer.render(&doc).is_empty());
    }
}
