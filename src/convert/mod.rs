//! Output writer registry.
//!
//! Writers turn rendered fragments into one output format each. The registry
//! maps format names and file extensions to writers, so callers can pick a
//! format from a CLI flag or from the extension of an output path.
//!
//! # Example
//!
//! ```
//! use richdoc::convert::{ConvertOptions, OutputFormat, WriterRegistry};
//! use richdoc::DocumentTree;
//! use serde_json::json;
//!
//! fn main() -> richdoc::Result<()> {
//!     let registry = WriterRegistry::with_defaults();
//!     let doc = DocumentTree::from_value(&json!({
//!         "content": [{"type": "paragraph", "content": [{"type": "text", "text": "Hi"}]}]
//!     }));
//!
//!     let options = ConvertOptions::new().with_format(OutputFormat::Html);
//!     let result = registry.convert(&doc, &options)?;
//!     assert_eq!(result.content, "<p>Hi</p>");
//!     Ok(())
//! }
//! ```

mod writers;

pub use writers::{HtmlWriter, JsonWriter, MarkdownWriter, TextWriter};

use crate::error::{Error, Result};
use crate::model::DocumentTree;
use crate::parser::{DocumentParser, ParseOptions};
use crate::render::{DocumentRenderer, Fragment, RenderOptions, RenderStats};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Rendering options
    pub render: RenderOptions,

    /// Options used by [`WriterRegistry::convert_source`] to load the source
    pub parse: ParseOptions,

    /// Whether to collect fragment statistics
    pub collect_stats: bool,

    /// Output format used by [`WriterRegistry::convert`]
    pub output_format: OutputFormat,

    /// Emit single-line JSON
    pub compact_json: bool,

    /// Cut text output down to an excerpt of at most this many characters
    pub excerpt: Option<usize>,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Enable statistics collection.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Emit compact JSON.
    pub fn with_compact_json(mut self, compact: bool) -> Self {
        self.compact_json = compact;
        self
    }

    /// Limit text output to an excerpt.
    pub fn with_excerpt(mut self, max_chars: usize) -> Self {
        self.excerpt = Some(max_chars);
        self
    }
}

/// Output format for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// HTML fragment
    #[default]
    Html,

    /// Markdown
    Markdown,

    /// Plain text
    Text,

    /// Serialized fragments
    Json,
}

impl OutputFormat {
    /// All formats, in registry order.
    pub const ALL: [OutputFormat; 4] = [Self::Html, Self::Markdown, Self::Text, Self::Json];

    /// Writer name for this format.
    pub fn name(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Markdown => "markdown",
            Self::Text => "text",
            Self::Json => "json",
        }
    }

    /// Preferred file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Markdown => "md",
            Self::Text => "txt",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "html" | "htm" => Ok(Self::Html),
            "markdown" | "md" => Ok(Self::Markdown),
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

/// Result of document conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Converted content
    pub content: String,

    /// Fragment statistics (if collected)
    pub stats: Option<RenderStats>,

    /// MIME type of the output
    pub mime_type: &'static str,
}

impl ConvertResult {
    /// Create a new conversion result.
    pub fn new(content: String, mime_type: &'static str) -> Self {
        Self {
            content,
            stats: None,
            mime_type,
        }
    }

    /// Set fragment statistics.
    pub fn with_stats(mut self, stats: RenderStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Trait for output writers.
///
/// Implement this trait to add a new output format.
pub trait FragmentWriter: Send + Sync {
    /// Name of this writer, used for lookup by format name.
    fn name(&self) -> &str;

    /// File extensions this writer produces, lowercase without the leading dot.
    fn extensions(&self) -> &[&str];

    /// MIME type of the output.
    fn mime_type(&self) -> &'static str;

    /// Write fragments in this format.
    fn write(&self, fragments: &[Fragment], options: &ConvertOptions) -> Result<String>;

    /// Check if this writer handles the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for output writers.
pub struct WriterRegistry {
    by_extension: HashMap<String, Arc<dyn FragmentWriter>>,
    by_name: HashMap<String, Arc<dyn FragmentWriter>>,
}

impl WriterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            by_extension: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the HTML, Markdown, text and JSON writers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(HtmlWriter::new()));
        registry.register(Arc::new(MarkdownWriter::new()));
        registry.register(Arc::new(TextWriter::new()));
        registry.register(Arc::new(JsonWriter::new()));
        registry
    }

    /// Register a writer under its name and all of its extensions.
    ///
    /// A later registration replaces an earlier one for the same key.
    pub fn register(&mut self, writer: Arc<dyn FragmentWriter>) {
        for ext in writer.extensions() {
            self.by_extension.insert(ext.to_lowercase(), writer.clone());
        }
        self.by_name.insert(writer.name().to_lowercase(), writer);
    }

    /// Get a writer by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn FragmentWriter>> {
        self.by_extension.get(&ext.to_lowercase()).cloned()
    }

    /// Get a writer by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn FragmentWriter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.by_extension.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.by_extension.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Convert a document with the writer for `options.output_format`.
    pub fn convert(&self, doc: &DocumentTree, options: &ConvertOptions) -> Result<ConvertResult> {
        self.convert_named(doc, options.output_format.name(), options)
    }

    /// Load a document from source text with `options.parse`, then convert
    /// it with the writer for `options.output_format`.
    pub fn convert_source(&self, source: &str, options: &ConvertOptions) -> Result<ConvertResult> {
        let doc = DocumentParser::from_str_with_options(source, options.parse.clone()).parse()?;
        self.convert(&doc, options)
    }

    /// Convert a document with the writer registered under `name`.
    pub fn convert_named(
        &self,
        doc: &DocumentTree,
        name: &str,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let writer = self
            .get_by_name(name)
            .ok_or_else(|| Error::UnknownFormat(name.to_string()))?;
        self.write(writer.as_ref(), doc, options)
    }

    /// Convert a document for the given output path, choosing the writer by
    /// the path's extension.
    pub fn convert_for_path(
        &self,
        doc: &DocumentTree,
        output: &Path,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let ext = output
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnknownFormat(format!("{} has no extension", output.display())))?;

        let writer = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnknownFormat(ext.to_string()))?;
        self.write(writer.as_ref(), doc, options)
    }

    fn write(
        &self,
        writer: &dyn FragmentWriter,
        doc: &DocumentTree,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let fragments = DocumentRenderer::new(options.render.clone()).render(doc);
        log::debug!("writing {} fragments as {}", fragments.len(), writer.name());

        let content = writer.write(&fragments, options)?;
        let result = ConvertResult::new(content, writer.mime_type());
        if options.collect_stats || options.render.collect_stats {
            Ok(result.with_stats(RenderStats::from_fragments(&fragments)))
        } else {
            Ok(result)
        }
    }
}

impl Default for WriterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> DocumentTree {
        DocumentTree::from_value(&json!({
            "content": [
                {"type": "heading", "attrs": {"level": 1}, "content": [{"type": "text", "text": "Linen"}]},
                {"type": "paragraph", "content": [{"type": "text", "text": "Soft & light"}]}
            ]
        }))
    }

    #[test]
    fn test_convert_options_builder() {
        let options = ConvertOptions::new()
            .with_stats(true)
            .with_format(OutputFormat::Text)
            .with_excerpt(40);

        assert!(options.collect_stats);
        assert_eq!(options.output_format, OutputFormat::Text);
        assert_eq!(options.excerpt, Some(40));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("MD".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("htm".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert!(matches!(
            "docx".parse::<OutputFormat>(),
            Err(Error::UnknownFormat(_))
        ));
        assert_eq!(OutputFormat::Text.to_string(), "text");
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = WriterRegistry::with_defaults();
        for ext in ["html", "HTM", "md", "markdown", "txt", "json"] {
            assert!(registry.supports(ext), "{}", ext);
        }
        assert!(!registry.supports("pdf"));
        assert_eq!(registry.get_by_name("Markdown").unwrap().extensions(), &["md", "markdown"]);
    }

    #[test]
    fn test_convert_every_format() {
        let registry = WriterRegistry::with_defaults();
        let doc = sample();

        for format in OutputFormat::ALL {
            let options = ConvertOptions::new().with_format(format);
            let result = registry.convert(&doc, &options).unwrap();
            assert!(result.content.contains("Linen"), "{}", format);
            assert!(result.stats.is_none());
        }
    }

    #[test]
    fn test_convert_for_path() {
        let registry = WriterRegistry::with_defaults();
        let options = ConvertOptions::new().with_stats(true);

        let result = registry
            .convert_for_path(&sample(), Path::new("out/linen.md"), &options)
            .unwrap();
        assert_eq!(result.mime_type, "text/markdown");
        assert!(result.content.starts_with("# Linen"));
        assert_eq!(result.stats.unwrap().heading_count, 1);

        let err = registry.convert_for_path(&sample(), Path::new("linen.pdf"), &options);
        assert!(matches!(err, Err(Error::UnknownFormat(_))));
        let err = registry.convert_for_path(&sample(), Path::new("linen"), &options);
        assert!(matches!(err, Err(Error::UnknownFormat(_))));
    }

    #[test]
    fn test_convert_source_uses_parse_options() {
        let registry = WriterRegistry::with_defaults();
        let record = r#"{"sku":"L-1","description":{"content":[{"type":"paragraph","content":[{"type":"text","text":"Linen"}]}]}}"#;

        let options = ConvertOptions::new()
            .with_format(OutputFormat::Markdown)
            .with_parse_options(ParseOptions::new().with_pointer("/description"));
        let result = registry.convert_source(record, &options).unwrap();
        assert_eq!(result.content, "Linen");

        let strict = ConvertOptions::new();
        assert!(matches!(
            registry.convert_source("plain words", &strict),
            Err(Error::Json(_))
        ));

        let lenient = ConvertOptions::new().with_parse_options(ParseOptions::new().lenient());
        let result = registry.convert_source("plain words", &lenient).unwrap();
        assert_eq!(result.content, "<p>plain words</p>");
    }

    #[test]
    fn test_unknown_name() {
        let registry = WriterRegistry::new();
        let result = registry.convert(&sample(), &ConvertOptions::default());
        assert!(matches!(result, Err(Error::UnknownFormat(name)) if name == "html"));
    }
}
