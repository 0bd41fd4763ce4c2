//! Rendering many documents at once.
//!
//! Each document is rendered independently, so a batch fans out over the
//! rayon thread pool without any coordination. Output order always matches
//! input order.

use rayon::prelude::*;
use serde_json::Value;

use crate::model::DocumentTree;

use super::{DocumentRenderer, Fragment, RenderOptions};

/// Render every value in `documents`.
pub fn render_many(documents: &[Value], options: &RenderOptions) -> Vec<Vec<Fragment>> {
    let renderer = DocumentRenderer::new(options.clone());
    let render_one = |value: &Value| renderer.render(&DocumentTree::from_value(value));

    log::debug!(
        "rendering batch of {} documents (parallel: {})",
        documents.len(),
        options.parallel
    );

    if options.parallel {
        documents.par_iter().map(render_one).collect()
    } else {
        documents.iter().map(render_one).collect()
    }
}

/// Render already-converted trees.
pub fn render_trees(trees: &[DocumentTree], options: &RenderOptions) -> Vec<Vec<Fragment>> {
    let renderer = DocumentRenderer::new(options.clone());
    if options.parallel {
        trees.par_iter().map(|tree| renderer.render(tree)).collect()
    } else {
        trees.iter().map(|tree| renderer.render(tree)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn documents() -> Vec<Value> {
        (0..64)
            .map(|i| {
                json!({
                    "content": [{"type": "paragraph", "content": [{"type": "text", "text": format!("doc {}", i)}]}]
                })
            })
            .collect()
    }

    #[test]
    fn test_parallel_preserves_order() {
        let docs = documents();
        let parallel = render_many(&docs, &RenderOptions::new().with_parallel(true));
        let sequential = render_many(&docs, &RenderOptions::new().with_parallel(false));

        assert_eq!(parallel.len(), 64);
        assert_eq!(parallel, sequential);
        assert_eq!(parallel[10][0].plain_text(), "doc 10");
    }

    #[test]
    fn test_malformed_entries_render_empty() {
        let docs = vec![json!(null), json!("text"), json!({"content": 5})];
        let rendered = render_many(&docs, &RenderOptions::default());
        assert!(rendered.iter().all(Vec::is_empty));
    }

    #[test]
    fn test_render_trees() {
        let trees: Vec<DocumentTree> = documents().iter().map(DocumentTree::from_value).collect();
        let rendered = render_trees(&trees, &RenderOptions::default());
        assert_eq!(rendered[63][0].plain_text(), "doc 63");
    }
}
