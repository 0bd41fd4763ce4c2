//! Parsing options and configuration.

/// Options for loading persisted documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Decode a root JSON string that itself holds a JSON document
    pub decode_embedded: bool,

    /// JSON Pointer (RFC 6901) selecting the document inside each record,
    /// e.g. `/description` for a product export
    pub pointer: Option<String>,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (non-JSON input becomes plain-text paragraphs).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable decoding of string-wrapped documents.
    pub fn with_decode_embedded(mut self, decode: bool) -> Self {
        self.decode_embedded = decode;
        self
    }

    /// Select the document inside each record with a JSON Pointer.
    pub fn with_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.pointer = Some(pointer.into());
        self
    }

    /// Whether lenient mode is on.
    pub fn is_lenient(&self) -> bool {
        self.error_mode == ErrorMode::Lenient
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            decode_embedded: true,
            pointer: None,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on malformed input
    #[default]
    Strict,
    /// Recover: treat non-JSON input as plain text
    Lenient,
}
