//! Integration tests for lazy fragment rendering.

use richdoc::model::DocumentTree;
use richdoc::render::{DocumentRenderer, Fragment, RenderOptions};
use serde_json::{json, Value};

fn create_sample_document() -> DocumentTree {
    DocumentTree::from_value(&json!({
        "type": "doc",
        "content": [
            {"type": "heading", "attrs": {"level": 1}, "content": [{"type": "text", "text": "Introduction"}]},
            {"type": "paragraph", "content": [{"type": "text", "text": "Chapter 1"}]},
            {"type": "table", "content": []},
            {"type": "image", "attrs": {"alt": "no source"}},
            {"type": "blockquote", "content": [{"type": "text", "text": "Conclusion text"}]}
        ]
    }))
}

fn nested(depth: usize) -> Value {
    let mut node = json!({"type": "text", "text": "deep"});
    for _ in 0..depth {
        node = json!({"type": "strong", "content": [node]});
    }
    json!({"content": [{"type": "paragraph", "content": [node]}]})
}

#[test]
fn test_fragments_match_render() {
    let doc = create_sample_document();
    let renderer = DocumentRenderer::default();

    let streamed: Vec<Fragment> = renderer.fragments(&doc).collect();
    assert_eq!(streamed, renderer.render(&doc));
    assert_eq!(streamed.len(), 3);
}

#[test]
fn test_fragments_content() {
    let doc = create_sample_document();
    let renderer = DocumentRenderer::default();

    let content: Vec<String> = renderer.fragments(&doc).map(|f| f.plain_text()).collect();
    assert_eq!(content, ["Introduction", "Chapter 1", "Conclusion text"]);
}

#[test]
fn test_fragments_progress() {
    let doc = create_sample_document();
    let renderer = DocumentRenderer::default();
    let mut fragments = renderer.fragments(&doc);

    assert_eq!(fragments.remaining_blocks(), 5);
    fragments.next();
    fragments.next();
    assert_eq!(fragments.emitted(), 2);
    assert_eq!(fragments.remaining_blocks(), 3);

    // Skips the unknown block and the image without a source.
    assert_eq!(fragments.next().map(|f| f.kind_name()), Some("quote"));
    assert_eq!(fragments.remaining_blocks(), 0);
    assert!(fragments.next().is_none());
    assert!(fragments.next().is_none());
}

#[test]
fn test_fragments_early_exit() {
    let doc = create_sample_document();
    let renderer = DocumentRenderer::default();

    let first_heading = renderer
        .fragments(&doc)
        .find(|f| matches!(f, Fragment::Heading { .. }));
    assert_eq!(first_heading.map(|f| f.plain_text()).as_deref(), Some("Introduction"));
}

#[test]
fn test_empty_document() {
    let doc = DocumentTree::new();
    let renderer = DocumentRenderer::default();
    let mut fragments = renderer.fragments(&doc);
    assert_eq!(fragments.size_hint(), (0, Some(0)));
    assert!(fragments.next().is_none());
}

#[test]
fn test_max_depth_truncates_nesting() {
    let doc = DocumentTree::from_value(&nested(10));

    let unbounded = DocumentRenderer::default().render(&doc);
    assert_eq!(unbounded[0].plain_text(), "deep");

    let bounded = DocumentRenderer::new(RenderOptions::new().with_max_depth(5)).render(&doc);
    assert_eq!(bounded.len(), 1);
    assert_eq!(bounded[0].plain_text(), "");
}

#[test]
fn test_max_depth_keeps_shallow_content() {
    let doc = DocumentTree::from_value(&nested(2));
    // paragraph (1) > strong (2) > strong (3) > text (4)
    let fragments = DocumentRenderer::new(RenderOptions::new().with_max_depth(4)).render(&doc);
    assert_eq!(fragments[0].plain_text(), "deep");

    let fragments = DocumentRenderer::new(RenderOptions::new().with_max_depth(3)).render(&doc);
    assert_eq!(fragments[0].plain_text(), "");
}
