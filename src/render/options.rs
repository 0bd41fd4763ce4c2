//! Rendering options and configuration.

use std::borrow::Cow;

use super::{CleanupOptions, CleanupPreset};

/// Options for rendering document content.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Base URL prepended to relative image sources (the CDN host)
    pub image_base_url: Option<String>,

    /// Maximum heading level emitted by the Markdown writer (1-6)
    pub max_heading_level: u8,

    /// Character to use for unordered list markers
    pub list_marker: char,

    /// Escape special Markdown characters
    pub escape_special_chars: bool,

    /// Keep hard breaks as line breaks in Markdown
    pub preserve_line_breaks: bool,

    /// Emit heading font sizes as inline styles in HTML
    pub heading_sizes: bool,

    /// Text cleanup options
    pub cleanup: Option<CleanupOptions>,

    /// Deepest node nesting that is rendered; top-level blocks are depth 1
    pub max_depth: Option<usize>,

    /// Render batches on the rayon thread pool
    pub parallel: bool,

    /// Collect statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image base URL.
    pub fn with_image_base_url(mut self, url: impl Into<String>) -> Self {
        self.image_base_url = Some(url.into());
        self
    }

    /// Set maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Enable or disable line break preservation.
    pub fn with_line_breaks(mut self, preserve: bool) -> Self {
        self.preserve_line_breaks = preserve;
        self
    }

    /// Enable or disable inline heading sizes in HTML.
    pub fn with_heading_sizes(mut self, enabled: bool) -> Self {
        self.heading_sizes = enabled;
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = Some(cleanup);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup_preset(mut self, preset: CleanupPreset) -> Self {
        self.cleanup = Some(CleanupOptions::from_preset(preset));
        self
    }

    /// Limit how deep the renderer descends.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Enable or disable parallel batch rendering.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }

    /// Resolve an image source against [`RenderOptions::image_base_url`].
    ///
    /// Absolute URLs, protocol-relative URLs and `data:` URIs are returned
    /// unchanged.
    pub fn resolve_image_src<'a>(&self, src: &'a str) -> Cow<'a, str> {
        match self.image_base_url.as_deref() {
            Some(base) if !is_absolute_src(src) => Cow::Owned(format!(
                "{}/{}",
                base.trim_end_matches('/'),
                src.trim_start_matches('/')
            )),
            _ => Cow::Borrowed(src),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            image_base_url: None,
            max_heading_level: 6,
            list_marker: '-',
            escape_special_chars: true,
            preserve_line_breaks: true,
            heading_sizes: false,
            cleanup: None,
            max_depth: None,
            parallel: true,
            collect_stats: false,
        }
    }
}

fn is_absolute_src(src: &str) -> bool {
    src.contains("://") || src.starts_with("//") || src.starts_with("data:")
}
