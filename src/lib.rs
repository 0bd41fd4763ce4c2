//! # richdoc
//!
//! Rendering of rich-text editor documents.
//!
//! Product descriptions and other editorial content are stored as the JSON
//! tree a block editor produces. This library converts that tree into output
//! fragments and writes them as HTML, Markdown, plain text, or JSON.
//!
//! ## Quick Start
//!
//! ```
//! use richdoc::render_document;
//! use serde_json::json;
//!
//! let doc = json!({
//!     "type": "doc",
//!     "content": [
//!         {"type": "heading", "attrs": {"level": 2}, "content": [{"type": "text", "text": "Care"}]},
//!         {"type": "paragraph", "content": [{"type": "text", "text": "Wash cold."}]}
//!     ]
//! });
//!
//! let fragments = render_document(&doc);
//! assert_eq!(fragments.len(), 2);
//! assert_eq!(richdoc::render::to_html(&fragments, &Default::default()), "<h2>Care</h2>\n<p>Wash cold.</p>");
//! ```
//!
//! ## Features
//!
//! - **Never fails on content**: unknown node types are dropped (blocks) or
//!   unwrapped (inline), malformed attributes fall back to defaults
//! - **Multiple output formats**: HTML, Markdown, plain text, JSON
//! - **Link safety**: external links are marked so writers can add `rel`
//! - **Visitor hooks and lazy iteration** over rendered fragments
//! - **Parallel batch rendering** with Rayon
//! - **Cleanup pipeline** and excerpts for meta descriptions

pub mod convert;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{
    ConvertOptions, ConvertResult, FragmentWriter, OutputFormat, WriterRegistry,
};
pub use error::{Error, Result};
pub use model::{BlockNode, DocumentTree, HeadingLevel, ImageAttrs, InlineNode, Mark};
pub use parser::{DocumentParser, ErrorMode, ParseOptions};
pub use render::{
    render_document, render_many, CleanupOptions, CleanupPreset, DocumentRenderer, Fragment,
    Inline, JsonFormat, ListEntry, ListKind, RenderOptions, RenderStats,
};

use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Load a document from JSON text.
///
/// # Example
///
/// ```
/// use richdoc::parse_str;
///
/// let doc = parse_str(r#"{"type":"doc","content":[{"type":"horizontalRule"}]}"#).unwrap();
/// assert_eq!(doc.len(), 1);
/// ```
pub fn parse_str(text: &str) -> Result<DocumentTree> {
    parse_str_with_options(text, ParseOptions::default())
}

/// Load a document from text with custom options.
///
/// # Example
///
/// ```
/// use richdoc::{parse_str_with_options, ParseOptions};
///
/// // Legacy descriptions saved before the editor existed are plain text.
/// let doc = parse_str_with_options("Soft.\n\nWarm.", ParseOptions::new().lenient()).unwrap();
/// assert_eq!(doc.len(), 2);
/// ```
pub fn parse_str_with_options(text: &str, options: ParseOptions) -> Result<DocumentTree> {
    DocumentParser::from_str_with_options(text, options).parse()
}

/// Load a document file.
///
/// # Example
///
/// ```no_run
/// use richdoc::parse_file;
///
/// let doc = parse_file("description.json").unwrap();
/// println!("Blocks: {}", doc.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<DocumentTree> {
    let parser = DocumentParser::open(path)?;
    parser.parse()
}

/// Load a document file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<DocumentTree> {
    let parser = DocumentParser::open_with_options(path, options)?;
    parser.parse()
}

/// Load a document from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<DocumentTree> {
    let parser = DocumentParser::from_bytes(data)?;
    parser.parse()
}

/// Load a document from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<DocumentTree> {
    let parser = DocumentParser::from_bytes_with_options(data, options)?;
    parser.parse()
}

/// Load a document from a reader.
///
/// # Example
///
/// ```no_run
/// use richdoc::parse_reader;
///
/// let doc = parse_reader(std::io::stdin()).unwrap();
/// ```
pub fn parse_reader<R: Read>(reader: R) -> Result<DocumentTree> {
    let parser = DocumentParser::from_reader(reader)?;
    parser.parse()
}

/// Load a document from a reader with custom options.
pub fn parse_reader_with_options<R: Read>(
    reader: R,
    options: ParseOptions,
) -> Result<DocumentTree> {
    let parser = DocumentParser::from_reader_with_options(reader, options)?;
    parser.parse()
}

/// Render a document value to HTML with default options.
///
/// # Example
///
/// ```
/// use serde_json::json;
///
/// let html = richdoc::to_html(&json!({
///     "content": [{"type": "paragraph", "content": [{"type": "text", "text": "a < b"}]}]
/// }));
/// assert_eq!(html, "<p>a &lt; b</p>");
/// ```
pub fn to_html(doc: &Value) -> String {
    render::to_html(&render_document(doc), &RenderOptions::default())
}

/// Render a document value to Markdown with default options.
pub fn to_markdown(doc: &Value) -> String {
    render::to_markdown(&render_document(doc), &RenderOptions::default())
}

/// Render a document value to plain text with custom options.
///
/// # Example
///
/// ```
/// use richdoc::{to_text, CleanupPreset, RenderOptions};
/// use serde_json::json;
///
/// let options = RenderOptions::new().with_cleanup_preset(CleanupPreset::SingleLine);
/// let text = to_text(&json!({"content": []}), &options);
/// assert!(text.is_empty());
/// ```
pub fn to_text(doc: &Value, options: &RenderOptions) -> String {
    let renderer = DocumentRenderer::new(options.clone());
    render::to_text(&renderer.render(&DocumentTree::from_value(doc)), options)
}

/// Render a document value to serialized fragments.
pub fn to_json(doc: &Value, format: JsonFormat) -> Result<String> {
    render::to_json(&render_document(doc), format)
}

/// Builder for loading and rendering documents.
///
/// # Example
///
/// ```
/// use richdoc::RichDoc;
///
/// let html = RichDoc::new()
///     .lenient()
///     .with_image_base_url("https://cdn.example.com/media")
///     .parse_str("Hand-loomed in Porto.")?
///     .to_html();
/// assert_eq!(html, "<p>Hand-loomed in Porto.</p>");
/// # Ok::<(), richdoc::Error>(())
/// ```
pub struct RichDoc {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl RichDoc {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Enable lenient loading.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Select the document inside each record with a JSON Pointer.
    pub fn with_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.parse_options = self.parse_options.with_pointer(pointer);
        self
    }

    /// Prefix relative image sources.
    pub fn with_image_base_url(mut self, url: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_image_base_url(url);
        self
    }

    /// Drop nodes nested deeper than `depth`.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.render_options = self.render_options.with_max_depth(depth);
        self
    }

    /// Emit presentational heading sizes in HTML.
    pub fn with_heading_sizes(mut self) -> Self {
        self.render_options = self.render_options.with_heading_sizes(true);
        self
    }

    /// Set cleanup preset for text and Markdown output.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.render_options = self.render_options.with_cleanup_preset(preset);
        self
    }

    /// Replace the render options wholesale.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Load from JSON text and render.
    pub fn parse_str(self, text: &str) -> Result<RichDocResult> {
        let document = parse_str_with_options(text, self.parse_options)?;
        Ok(RichDocResult::new(document, self.render_options))
    }

    /// Load a file and render.
    pub fn parse_file<P: AsRef<Path>>(self, path: P) -> Result<RichDocResult> {
        let document = parse_file_with_options(path, self.parse_options)?;
        Ok(RichDocResult::new(document, self.render_options))
    }

    /// Load from bytes and render.
    pub fn parse_bytes(self, data: &[u8]) -> Result<RichDocResult> {
        let document = parse_bytes_with_options(data, self.parse_options)?;
        Ok(RichDocResult::new(document, self.render_options))
    }

    /// Render an in-memory document value. Never fails.
    pub fn render(self, doc: &Value) -> RichDocResult {
        RichDocResult::new(DocumentTree::from_value(doc), self.render_options)
    }
}

impl Default for RichDoc {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded document with its rendered fragments.
pub struct RichDocResult {
    /// The loaded document
    pub document: DocumentTree,
    fragments: Vec<Fragment>,
    render_options: RenderOptions,
}

impl RichDocResult {
    fn new(document: DocumentTree, render_options: RenderOptions) -> Self {
        let fragments = DocumentRenderer::new(render_options.clone()).render(&document);
        Self {
            document,
            fragments,
            render_options,
        }
    }

    /// Rendered fragments.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Convert to HTML.
    pub fn to_html(&self) -> String {
        render::to_html(&self.fragments, &self.render_options)
    }

    /// Convert to Markdown.
    pub fn to_markdown(&self) -> String {
        render::to_markdown(&self.fragments, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> String {
        render::to_text(&self.fragments, &self.render_options)
    }

    /// Single-line excerpt of at most `max_chars` characters.
    pub fn excerpt(&self, max_chars: usize) -> String {
        render::excerpt(&self.fragments, max_chars)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.fragments, format)
    }

    /// Fragment statistics.
    pub fn stats(&self) -> RenderStats {
        RenderStats::from_fragments(&self.fragments)
    }
}
