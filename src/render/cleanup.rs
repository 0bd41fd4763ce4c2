//! Text cleanup for plain-text output and excerpts.

use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Unicode NFC normalization and trailing-space trimming only
    Minimal,
    /// Minimal plus invisible-character removal and whitespace collapsing
    #[default]
    Standard,
    /// Standard plus newline folding, for single-line excerpts
    SingleLine,
}

/// Options for text cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Remove zero-width characters and soft hyphens pasted from other editors
    pub remove_invisible: bool,

    /// Replace non-breaking spaces with plain spaces
    pub normalize_spaces: bool,

    /// Collapse runs of spaces and tabs into one space
    pub collapse_whitespace: bool,

    /// Trim trailing whitespace on every line
    pub trim_lines: bool,

    /// Maximum consecutive newlines (0 = unlimited)
    pub max_consecutive_newlines: u8,

    /// Replace every newline with a space
    pub fold_newlines: bool,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
            CleanupPreset::SingleLine => Self::single_line(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: true,
            remove_invisible: false,
            normalize_spaces: false,
            collapse_whitespace: false,
            trim_lines: true,
            max_consecutive_newlines: 0,
            fold_newlines: false,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            remove_invisible: true,
            normalize_spaces: true,
            collapse_whitespace: true,
            trim_lines: true,
            max_consecutive_newlines: 2,
            fold_newlines: false,
        }
    }

    /// Options producing one line of text.
    pub fn single_line() -> Self {
        Self {
            fold_newlines: true,
            ..Self::standard()
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

fn horizontal_space_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t]{2,}").expect("static pattern"))
}

fn trailing_space_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)[ \t]+$").expect("static pattern"))
}

fn newline_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{2,}").expect("static pattern"))
}

/// Text cleanup pipeline.
#[derive(Debug, Clone, Default)]
pub struct CleanupPipeline {
    options: CleanupOptions,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self { options }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut result = if self.options.normalize_unicode {
            text.nfc().collect::<String>()
        } else {
            text.to_string()
        };

        if self.options.remove_invisible {
            result.retain(|c| !matches!(c, '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}' | '\u{00AD}'));
        }

        if self.options.normalize_spaces {
            result = result.replace(['\u{00A0}', '\u{202F}'], " ");
        }

        if self.options.fold_newlines {
            result = result.replace(['\r', '\n'], " ");
        } else {
            result = result.replace("\r\n", "\n");
        }

        if self.options.collapse_whitespace {
            result = horizontal_space_regex().replace_all(&result, " ").into_owned();
        }

        if self.options.trim_lines {
            result = trailing_space_regex().replace_all(&result, "").into_owned();
        }

        if self.options.max_consecutive_newlines > 0 {
            result = self.limit_newlines(&result);
        }

        result.trim().to_string()
    }

    fn limit_newlines(&self, text: &str) -> String {
        let max = self.options.max_consecutive_newlines as usize;
        let replacement = "\n".repeat(max);
        newline_run_regex()
            .replace_all(text, |caps: &regex::Captures<'_>| {
                if caps[0].len() > max {
                    replacement.clone()
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned()
    }
}
