//! Built-in output writers.

use crate::error::Result;
use crate::render::{excerpt, to_html, to_json, to_markdown, to_text, Fragment, JsonFormat};

use super::{ConvertOptions, FragmentWriter};

/// HTML fragment writer.
#[derive(Debug, Clone, Default)]
pub struct HtmlWriter {
    _private: (),
}

impl HtmlWriter {
    /// Create a new HTML writer.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl FragmentWriter for HtmlWriter {
    fn name(&self) -> &str {
        "html"
    }

    fn extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn mime_type(&self) -> &'static str {
        "text/html"
    }

    fn write(&self, fragments: &[Fragment], options: &ConvertOptions) -> Result<String> {
        Ok(to_html(fragments, &options.render))
    }
}

/// Markdown writer.
#[derive(Debug, Clone, Default)]
pub struct MarkdownWriter {
    _private: (),
}

impl MarkdownWriter {
    /// Create a new Markdown writer.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl FragmentWriter for MarkdownWriter {
    fn name(&self) -> &str {
        "markdown"
    }

    fn extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn mime_type(&self) -> &'static str {
        "text/markdown"
    }

    fn write(&self, fragments: &[Fragment], options: &ConvertOptions) -> Result<String> {
        Ok(to_markdown(fragments, &options.render))
    }
}

/// Plain text writer. Honors [`ConvertOptions::excerpt`].
#[derive(Debug, Clone, Default)]
pub struct TextWriter {
    _private: (),
}

impl TextWriter {
    /// Create a new text writer.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl FragmentWriter for TextWriter {
    fn name(&self) -> &str {
        "text"
    }

    fn extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn mime_type(&self) -> &'static str {
        "text/plain"
    }

    fn write(&self, fragments: &[Fragment], options: &ConvertOptions) -> Result<String> {
        match options.excerpt {
            Some(max_chars) => Ok(excerpt(fragments, max_chars)),
            None => Ok(to_text(fragments, &options.render)),
        }
    }
}

/// Fragment list as JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonWriter {
    _private: (),
}

impl JsonWriter {
    /// Create a new JSON writer.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl FragmentWriter for JsonWriter {
    fn name(&self) -> &str {
        "json"
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn mime_type(&self) -> &'static str {
        "application/json"
    }

    fn write(&self, fragments: &[Fragment], options: &ConvertOptions) -> Result<String> {
        let format = if options.compact_json {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        to_json(fragments, format)
    }
}
