//! Rendering: document trees to fragments, fragments to output formats.

mod batch;
mod cleanup;
mod fragment;
mod html;
mod json;
mod markdown;
mod options;
mod renderer;
mod result;
pub mod streaming;
mod text;
pub mod visitor;

pub use batch::{render_many, render_trees};
pub use cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};
pub use fragment::{
    inline_text, is_external_href, Fragment, Inline, ListEntry, ListKind, DEFAULT_LINK_TARGET,
};
pub use html::{escape_html, to_html, to_html_with_stats, HtmlRenderer};
pub use json::{from_json, to_json, JsonFormat};
pub use markdown::{to_markdown, to_markdown_with_stats, MarkdownRenderer};
pub use options::RenderOptions;
pub use renderer::{render_document, DocumentRenderer};
pub use result::{RenderResult, RenderStats};
pub use streaming::Fragments;
pub use text::{excerpt, to_text};
pub use visitor::{CompositeVisitor, DefaultVisitor, DocumentVisitor, VisitorAction};
