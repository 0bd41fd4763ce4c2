//! Integration tests for the visitor pattern.

use richdoc::model::{DocumentTree, HeadingLevel};
use richdoc::render::visitor::{
    visit_fragment, CompositeVisitor, DefaultVisitor, DocumentVisitor, MaxHeadingDepthVisitor,
    SkipImagesVisitor, VisitorAction,
};
use richdoc::render::{DocumentRenderer, Fragment, Inline, ListEntry, ListKind};
use serde_json::json;

/// Custom visitor that tracks visit counts.
#[derive(Default)]
struct CountingVisitor {
    paragraph_count: usize,
    heading_count: usize,
    list_count: usize,
    image_count: usize,
    started_with: Option<usize>,
    ended_with: Option<usize>,
}

impl DocumentVisitor for CountingVisitor {
    fn visit_paragraph(&mut self, _children: &[Inline]) -> VisitorAction {
        self.paragraph_count += 1;
        VisitorAction::Continue
    }

    fn visit_heading(&mut self, _level: HeadingLevel, _children: &[Inline]) -> VisitorAction {
        self.heading_count += 1;
        VisitorAction::Continue
    }

    fn visit_list(&mut self, _style: ListKind, _items: &[ListEntry]) -> VisitorAction {
        self.list_count += 1;
        VisitorAction::Continue
    }

    fn visit_image(&mut self, _src: &str, _alt: &str, _caption: Option<&str>) -> VisitorAction {
        self.image_count += 1;
        VisitorAction::Continue
    }

    fn on_document_start(&mut self, block_count: usize) {
        self.started_with = Some(block_count);
    }

    fn on_document_end(&mut self, fragment_count: usize) {
        self.ended_with = Some(fragment_count);
    }
}

/// Replaces every paragraph with a divider.
struct ParagraphToDivider;

impl DocumentVisitor for ParagraphToDivider {
    fn visit_paragraph(&mut self, _children: &[Inline]) -> VisitorAction {
        VisitorAction::Replace(Fragment::Divider)
    }
}

fn sample() -> DocumentTree {
    DocumentTree::from_value(&json!({
        "content": [
            {"type": "heading", "attrs": {"level": 1}, "content": [{"type": "text", "text": "Title"}]},
            {"type": "paragraph", "content": [{"type": "text", "text": "Body"}]},
            {"type": "mystery"},
            {"type": "image", "attrs": {"src": "a.png", "alt": "A"}},
            {"type": "bulletList", "content": [{"type": "listItem", "content": [{"type": "text", "text": "x"}]}]}
        ]
    }))
}

#[test]
fn test_default_visitor_all_continue() {
    let mut visitor = DefaultVisitor::new();
    let paragraph = Fragment::paragraph(vec![Inline::text("p")]);
    let image = Fragment::Image {
        src: "a.png".to_string(),
        alt: String::new(),
        caption: None,
    };

    assert!(matches!(
        visit_fragment(&mut visitor, &paragraph),
        VisitorAction::Continue
    ));
    assert!(matches!(
        visit_fragment(&mut visitor, &image),
        VisitorAction::Continue
    ));
    assert!(matches!(
        visit_fragment(&mut visitor, &Fragment::Divider),
        VisitorAction::Continue
    ));
}

#[test]
fn test_counting_visitor() {
    let renderer = DocumentRenderer::default();
    let mut visitor = CountingVisitor::default();
    let output = renderer.render_with_visitor(&sample(), &mut visitor);

    assert_eq!(output.len(), 4);
    assert_eq!(visitor.paragraph_count, 1);
    assert_eq!(visitor.heading_count, 1);
    assert_eq!(visitor.list_count, 1);
    assert_eq!(visitor.image_count, 1);
    assert_eq!(visitor.started_with, Some(5));
    assert_eq!(visitor.ended_with, Some(4));
}

#[test]
fn test_skip_images_visitor() {
    let renderer = DocumentRenderer::default();
    let output = renderer.render_with_visitor(&sample(), &mut SkipImagesVisitor);

    assert_eq!(output.len(), 3);
    assert!(output
        .iter()
        .all(|fragment| !matches!(fragment, Fragment::Image { .. })));
}

#[test]
fn test_max_heading_depth_visitor() {
    let renderer = DocumentRenderer::default();
    let mut visitor = MaxHeadingDepthVisitor::new(3);
    let output = renderer.render_with_visitor(&sample(), &mut visitor);

    match &output[0] {
        Fragment::Heading { level, children } => {
            assert_eq!(level.get(), 3);
            assert_eq!(children, &vec![Inline::text("Title")]);
        }
        other => panic!("expected heading, got {:?}", other),
    }
}

#[test]
fn test_replace_action() {
    let renderer = DocumentRenderer::default();
    let output = renderer.render_with_visitor(&sample(), &mut ParagraphToDivider);
    assert_eq!(output[1], Fragment::Divider);
    assert_eq!(output.len(), 4);
}

#[test]
fn test_composite_first_action_wins() {
    let mut composite = CompositeVisitor::new()
        .with_visitor(DefaultVisitor::new())
        .with_visitor(SkipImagesVisitor)
        .with_visitor(ParagraphToDivider)
        .with_visitor(MaxHeadingDepthVisitor::new(2));
    assert_eq!(composite.len(), 4);

    let output = DocumentRenderer::default().render_with_visitor(&sample(), &mut composite);
    let kinds: Vec<&str> = output.iter().map(Fragment::kind_name).collect();
    assert_eq!(kinds, ["heading", "divider", "list"]);
}

#[test]
fn test_empty_composite_continues() {
    let mut composite = CompositeVisitor::default();
    assert!(composite.is_empty());

    let output = DocumentRenderer::default().render_with_visitor(&sample(), &mut composite);
    assert_eq!(output, DocumentRenderer::default().render(&sample()));
}

#[test]
fn test_visitor_action_helpers() {
    assert!(VisitorAction::Skip.should_skip());
    assert!(!VisitorAction::Continue.should_skip());

    let replace = VisitorAction::Replace(Fragment::Divider);
    assert!(replace.is_replace());
    assert_eq!(replace.replacement(), Some(&Fragment::Divider));
    assert_eq!(VisitorAction::Continue.replacement(), None);
}
