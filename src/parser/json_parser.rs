//! Loading editor documents from JSON text.

use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{BlockNode, DocumentTree, InlineNode};

use super::options::ParseOptions;

fn blank_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n[ \t]*\n").expect("static pattern"))
}

/// Parser for persisted editor documents.
pub struct DocumentParser {
    source: String,
    options: ParseOptions,
}

impl DocumentParser {
    /// Open a document file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a document file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading document from {}", path.display());
        let data = fs::read(path)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Parse a document from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a document from bytes with custom options.
    ///
    /// Strict mode rejects invalid UTF-8; lenient mode replaces it.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
        let source = match std::str::from_utf8(data) {
            Ok(text) => text.to_string(),
            Err(e) if !options.is_lenient() => {
                return Err(Error::InvalidInput(format!("input is not UTF-8: {}", e)));
            }
            Err(_) => String::from_utf8_lossy(data).into_owned(),
        };
        Ok(Self { source, options })
    }

    /// Parse a document from a string.
    pub fn from_str_with_options(text: &str, options: ParseOptions) -> Self {
        Self {
            source: text.to_string(),
            options,
        }
    }

    /// Parse a document from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a document from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Parse the source as a single document.
    pub fn parse(&self) -> Result<DocumentTree> {
        match self.load_value()? {
            Loaded::Json(value) => self.resolve(&value),
            Loaded::PlainText => Ok(plain_text_document(&self.source)),
        }
    }

    /// Parse the source as a collection of documents.
    ///
    /// A JSON array yields one document per element; anything else yields a
    /// single document.
    pub fn parse_many(&self) -> Result<Vec<DocumentTree>> {
        match self.load_value()? {
            Loaded::Json(Value::Array(records)) => {
                log::debug!("parsing collection of {} records", records.len());
                records.iter().map(|record| self.resolve(record)).collect()
            }
            Loaded::Json(value) => Ok(vec![self.resolve(&value)?]),
            Loaded::PlainText => Ok(vec![plain_text_document(&self.source)]),
        }
    }

    fn load_value(&self) -> Result<Loaded> {
        if self.source.trim().is_empty() {
            if self.options.is_lenient() {
                return Ok(Loaded::Json(Value::Null));
            }
            return Err(Error::InvalidInput("empty input".to_string()));
        }

        match serde_json::from_str::<Value>(&self.source) {
            Ok(value) => Ok(Loaded::Json(value)),
            Err(e) if self.options.is_lenient() => {
                log::debug!("input is not JSON ({}), reading as plain text", e);
                Ok(Loaded::PlainText)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Apply the pointer and string decoding to one record.
    fn resolve(&self, record: &Value) -> Result<DocumentTree> {
        let null = Value::Null;
        let value = match self.options.pointer.as_deref() {
            Some(pointer) => match record.pointer(pointer) {
                Some(value) => value,
                None if self.options.is_lenient() => &null,
                None => {
                    return Err(Error::InvalidInput(format!(
                        "pointer {} does not match the record",
                        pointer
                    )))
                }
            },
            None => record,
        };

        match value {
            Value::String(text) if self.options.decode_embedded => {
                match serde_json::from_str::<Value>(text) {
                    Ok(inner) if inner.is_object() => Ok(DocumentTree::from_value(&inner)),
                    _ if self.options.is_lenient() => Ok(plain_text_document(text)),
                    _ => Ok(DocumentTree::new()),
                }
            }
            other => Ok(DocumentTree::from_value(other)),
        }
    }
}

enum Loaded {
    Json(Value),
    PlainText,
}

/// Build a document from legacy plain text: blank lines separate
/// paragraphs, single newlines become hard breaks.
pub fn plain_text_document(text: &str) -> DocumentTree {
    let text = text.replace("\r\n", "\n");
    let blocks = blank_line_regex()
        .split(&text)
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| {
            let mut content = Vec::new();
            for (i, line) in chunk.lines().enumerate() {
                if i > 0 {
                    content.push(InlineNode::HardBreak);
                }
                content.push(InlineNode::text(line.trim()));
            }
            BlockNode::Paragraph { content }
        })
        .collect();
    DocumentTree::from_blocks(blocks)
}
