//! Markdown rendering for fragments.

use crate::model::Mark;

use super::{
    inline_text, CleanupPipeline, Fragment, Inline, ListKind, RenderOptions, RenderResult,
    RenderStats,
};

/// Convert fragments to Markdown.
pub fn to_markdown(fragments: &[Fragment], options: &RenderOptions) -> String {
    MarkdownRenderer::new(options.clone()).render(fragments)
}

/// Convert fragments to Markdown with statistics.
pub fn to_markdown_with_stats(fragments: &[Fragment], options: &RenderOptions) -> RenderResult {
    let content = to_markdown(fragments, options);
    RenderResult::new(content, RenderStats::from_fragments(fragments))
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render fragments to Markdown.
    pub fn render(&self, fragments: &[Fragment]) -> String {
        let mut output = String::new();
        for fragment in fragments {
            self.render_fragment(&mut output, fragment);
        }

        if let Some(ref cleanup_options) = self.options.cleanup {
            let pipeline = CleanupPipeline::new(cleanup_options.clone());
            output = pipeline.process(&output);
        }

        output.trim().to_string()
    }

    fn render_fragment(&self, output: &mut String, fragment: &Fragment) {
        match fragment {
            Fragment::Paragraph { children } => {
                self.render_inlines(output, children);
                output.push_str("\n\n");
            }
            Fragment::Heading { level, children } => {
                let level = level.get().min(self.options.max_heading_level);
                output.push_str(&"#".repeat(level as usize));
                output.push(' ');
                // An ATX heading ends at the first newline.
                self.write_inlines(output, children, " ");
                output.push_str("\n\n");
            }
            Fragment::List { style, items } => {
                for (i, item) in items.iter().enumerate() {
                    match style {
                        ListKind::Bullet => output.push(self.options.list_marker),
                        ListKind::Ordered => output.push_str(&format!("{}.", i + 1)),
                    }
                    output.push(' ');
                    self.render_inlines(output, &item.children);
                    output.push('\n');
                }
                output.push('\n');
            }
            Fragment::Quote { children } => {
                let mut quoted = String::new();
                self.render_inlines(&mut quoted, children);
                for line in quoted.lines() {
                    output.push_str("> ");
                    output.push_str(line);
                    output.push('\n');
                }
                output.push('\n');
            }
            Fragment::CodeBlock { children } => {
                let code = inline_text(children);
                let fence = code_fence(&code);
                output.push_str(&fence);
                output.push('\n');
                output.push_str(&code);
                if !code.ends_with('\n') {
                    output.push('\n');
                }
                output.push_str(&fence);
                output.push_str("\n\n");
            }
            Fragment::Divider => output.push_str("---\n\n"),
            Fragment::Image { src, alt, caption } => {
                let src = self.options.resolve_image_src(src);
                output.push_str(&format!(
                    "![{}]({})\n",
                    escape_markdown(alt),
                    link_destination(&src)
                ));
                if let Some(caption) = caption {
                    output.push_str(&format!("*{}*\n", self.escape(caption)));
                }
                output.push('\n');
            }
            Fragment::LineBreak => output.push('\n'),
        }
    }

    fn render_inlines(&self, output: &mut String, children: &[Inline]) {
        let line_break = if self.options.preserve_line_breaks {
            "  \n"
        } else {
            " "
        };
        self.write_inlines(output, children, line_break);
    }

    fn write_inlines(&self, output: &mut String, children: &[Inline], line_break: &str) {
        for child in children {
            match child {
                Inline::Text { text } => output.push_str(&self.escape(text)),
                Inline::LineBreak => output.push_str(line_break),
                Inline::Mark {
                    mark: Mark::Code,
                    children,
                } => output.push_str(&code_span(&inline_text(children))),
                Inline::Mark { mark, children } => {
                    let (open, close) = mark_delimiters(*mark);
                    output.push_str(open);
                    self.write_inlines(output, children, line_break);
                    output.push_str(close);
                }
                Inline::Link { href, children, .. } => match href {
                    Some(href) => {
                        output.push('[');
                        self.write_inlines(output, children, line_break);
                        output.push_str(&format!("]({})", link_destination(href)));
                    }
                    None => self.write_inlines(output, children, line_break),
                },
            }
        }
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }
}

fn mark_delimiters(mark: Mark) -> (&'static str, &'static str) {
    match mark {
        Mark::Emphasis => ("*", "*"),
        Mark::Strong => ("**", "**"),
        Mark::Code => ("`", "`"),
        Mark::Strike => ("~~", "~~"),
        Mark::Underline => ("<u>", "</u>"),
        Mark::Superscript => ("<sup>", "</sup>"),
        Mark::Subscript => ("<sub>", "</sub>"),
    }
}

fn longest_backtick_run(code: &str) -> usize {
    let mut longest = 0;
    let mut run = 0;
    for c in code.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

/// A backtick fence longer than any backtick run inside `code`.
fn code_fence(code: &str) -> String {
    "`".repeat((longest_backtick_run(code) + 1).max(3))
}

/// An inline code span whose delimiter cannot close early.
fn code_span(code: &str) -> String {
    let ticks = "`".repeat(longest_backtick_run(code) + 1);
    if code.starts_with('`') || code.ends_with('`') {
        format!("{ticks} {code} {ticks}")
    } else {
        format!("{ticks}{code}{ticks}")
    }
}

/// A link destination that survives inside `(...)`.
///
/// Destinations with whitespace, parentheses or angle brackets are wrapped
/// in `<...>`; the characters that are illegal there are percent-encoded.
fn link_destination(href: &str) -> String {
    let needs_brackets = href
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '<' | '>'));
    if !needs_brackets {
        return href.to_string();
    }

    let mut result = String::with_capacity(href.len() + 2);
    result.push('<');
    for c in href.chars() {
        match c {
            '<' => result.push_str("%3C"),
            '>' => result.push_str("%3E"),
            '\n' => result.push_str("%0A"),
            '\r' => result.push_str("%0D"),
            _ => result.push(c),
        }
    }
    result.push('>');
    result
}

/// Escape special Markdown characters.
/// Only escape characters that could be misinterpreted as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' | '<' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
