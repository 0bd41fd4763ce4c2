//! Plain text rendering and excerpts.

use super::{CleanupOptions, CleanupPipeline, Fragment, RenderOptions};

/// Ellipsis appended to truncated excerpts.
const ELLIPSIS: char = '\u{2026}';

/// Convert fragments to plain text, one block per paragraph.
pub fn to_text(fragments: &[Fragment], options: &RenderOptions) -> String {
    let output = fragments
        .iter()
        .map(Fragment::plain_text)
        .filter(|text| !text.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    match options.cleanup {
        Some(ref cleanup_options) => CleanupPipeline::new(cleanup_options.clone()).process(&output),
        None => output.trim().to_string(),
    }
}

/// A single-line summary of at most `max_chars` characters, cut at a word
/// boundary where possible. Used for meta descriptions and listing cards.
pub fn excerpt(fragments: &[Fragment], max_chars: usize) -> String {
    let text = to_text(
        fragments,
        &RenderOptions::new().with_cleanup(CleanupOptions::single_line()),
    );

    if text.chars().count() <= max_chars {
        return text;
    }
    if max_chars == 0 {
        return String::new();
    }

    // Leave room for the ellipsis.
    let budget = max_chars - 1;
    let cut = text
        .char_indices()
        .nth(budget)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    let head = &text[..cut];

    let head = match head.rfind(' ') {
        Some(space) if space > 0 => &head[..space],
        _ => head,
    };

    let mut result = head.trim_end_matches([' ', ',', ';', ':', '.']).to_string();
    result.push(ELLIPSIS);
    result
}
