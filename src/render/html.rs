//! HTML rendering for fragments.

use crate::model::Mark;

use super::{Fragment, Inline, ListKind, RenderOptions, RenderResult, RenderStats, DEFAULT_LINK_TARGET};

/// Convert fragments to HTML.
pub fn to_html(fragments: &[Fragment], options: &RenderOptions) -> String {
    HtmlRenderer::new(options.clone()).render(fragments)
}

/// Convert fragments to HTML with statistics.
pub fn to_html_with_stats(fragments: &[Fragment], options: &RenderOptions) -> RenderResult {
    let content = to_html(fragments, options);
    RenderResult::new(content, RenderStats::from_fragments(fragments))
}

/// HTML renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render fragments, one top-level element per line.
    pub fn render(&self, fragments: &[Fragment]) -> String {
        let mut output = String::new();
        for fragment in fragments {
            self.render_fragment(&mut output, fragment);
            output.push('\n');
        }
        output.truncate(output.trim_end().len());
        output
    }

    /// Render a single fragment.
    pub fn render_fragment(&self, output: &mut String, fragment: &Fragment) {
        match fragment {
            Fragment::Paragraph { children } => self.wrap(output, "p", children),
            Fragment::Heading { level, children } => {
                output.push('<');
                output.push_str(level.tag());
                if self.options.heading_sizes {
                    output.push_str(&format!(" style=\"font-size:{}px\"", level.weight()));
                }
                output.push('>');
                self.render_inlines(output, children);
                output.push_str(&format!("</{}>", level.tag()));
            }
            Fragment::List { style, items } => {
                let tag = match style {
                    ListKind::Bullet => "ul",
                    ListKind::Ordered => "ol",
                };
                output.push_str(&format!("<{}>\n", tag));
                for item in items {
                    self.wrap(output, "li", &item.children);
                    output.push('\n');
                }
                output.push_str(&format!("</{}>", tag));
            }
            Fragment::Quote { children } => self.wrap(output, "blockquote", children),
            Fragment::CodeBlock { children } => {
                output.push_str("<pre>");
                self.wrap(output, "code", children);
                output.push_str("</pre>");
            }
            Fragment::Divider => output.push_str("<hr>"),
            Fragment::Image { src, alt, caption } => {
                let img = format!(
                    "<img src=\"{}\" alt=\"{}\">",
                    escape_html(&self.options.resolve_image_src(src)),
                    escape_html(alt)
                );
                match caption {
                    Some(caption) => output.push_str(&format!(
                        "<figure>{}<figcaption>{}</figcaption></figure>",
                        img,
                        escape_html(caption)
                    )),
                    None => output.push_str(&img),
                }
            }
            Fragment::LineBreak => output.push_str("<br>"),
        }
    }

    fn wrap(&self, output: &mut String, tag: &str, children: &[Inline]) {
        output.push_str(&format!("<{}>", tag));
        self.render_inlines(output, children);
        output.push_str(&format!("</{}>", tag));
    }

    fn render_inlines(&self, output: &mut String, children: &[Inline]) {
        for child in children {
            match child {
                Inline::Text { text } => output.push_str(&escape_html(text)),
                Inline::LineBreak => output.push_str("<br>"),
                Inline::Mark { mark, children } => self.wrap(output, mark_tag(*mark), children),
                Inline::Link {
                    href,
                    target,
                    external,
                    children,
                } => {
                    output.push_str("<a");
                    if let Some(href) = href.as_deref().filter(|h| !is_script_url(h)) {
                        output.push_str(&format!(" href=\"{}\"", escape_html(href)));
                    }
                    if target != DEFAULT_LINK_TARGET {
                        output.push_str(&format!(" target=\"{}\"", escape_html(target)));
                    }
                    if *external {
                        output.push_str(" rel=\"noopener noreferrer\"");
                    }
                    output.push('>');
                    self.render_inlines(output, children);
                    output.push_str("</a>");
                }
            }
        }
    }
}

fn mark_tag(mark: Mark) -> &'static str {
    match mark {
        Mark::Emphasis => "em",
        Mark::Strong => "strong",
        Mark::Code => "code",
        Mark::Underline => "u",
        Mark::Strike => "s",
        Mark::Superscript => "sup",
        Mark::Subscript => "sub",
    }
}

/// `javascript:` hrefs are dropped from anchors.
fn is_script_url(href: &str) -> bool {
    let trimmed: String = href
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .take(11)
        .collect();
    trimmed.eq_ignore_ascii_case("javascript:")
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeadingLevel;
    use crate::render::ListEntry;

    fn html(fragments: &[Fragment]) -> String {
        to_html(fragments, &RenderOptions::default())
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_paragraph_and_marks() {
        let fragments = vec![Fragment::paragraph(vec![
            Inline::text("Grade "),
            Inline::mark(Mark::Strong, vec![Inline::mark(Mark::Emphasis, vec![Inline::text("A")])]),
            Inline::LineBreak,
            Inline::text("H"),
            Inline::mark(Mark::Subscript, vec![Inline::text("2")]),
            Inline::text("O"),
        ])];
        assert_eq!(
            html(&fragments),
            "<p>Grade <strong><em>A</em></strong><br>H<sub>2</sub>O</p>"
        );
    }

    #[test]
    fn test_heading_sizes() {
        let fragments = vec![Fragment::Heading {
            level: HeadingLevel::new(2),
            children: vec![Inline::text("Specs")],
        }];
        assert_eq!(html(&fragments), "<h2>Specs</h2>");

        let options = RenderOptions::new().with_heading_sizes(true);
        assert_eq!(
            to_html(&fragments, &options),
            "<h2 style=\"font-size:30px\">Specs</h2>"
        );
    }

    #[test]
    fn test_external_link() {
        let fragments = vec![Fragment::paragraph(vec![Inline::link(
            Some("https://example.com".to_string()),
            Some("_blank".to_string()),
            vec![Inline::text("site")],
        )])];
        assert_eq!(
            html(&fragments),
            "<p><a href=\"https://example.com\" target=\"_blank\" rel=\"noopener noreferrer\">site</a></p>"
        );
    }

    #[test]
    fn test_internal_link() {
        let fragments = vec![Fragment::paragraph(vec![Inline::link(
            Some("/contact".to_string()),
            None,
            vec![Inline::text("contact")],
        )])];
        assert_eq!(html(&fragments), "<p><a href=\"/contact\">contact</a></p>");
    }

    #[test]
    fn test_script_href_dropped() {
        let fragments = vec![Fragment::paragraph(vec![Inline::link(
            Some(" JavaScript:alert(1)".to_string()),
            None,
            vec![Inline::text("x")],
        )])];
        assert_eq!(html(&fragments), "<p><a>x</a></p>");
    }

    #[test]
    fn test_list() {
        let fragments = vec![Fragment::List {
            style: ListKind::Ordered,
            items: vec![
                ListEntry::new(vec![Inline::text("one")]),
                ListEntry::new(vec![Inline::text("two")]),
            ],
        }];
        assert_eq!(html(&fragments), "<ol>\n<li>one</li>\n<li>two</li>\n</ol>");
    }

    #[test]
    fn test_image_with_caption() {
        let fragments = vec![Fragment::Image {
            src: "a.jpg".to_string(),
            alt: String::new(),
            caption: Some("Caption".to_string()),
        }];
        let options = RenderOptions::new().with_image_base_url("https://cdn.example.com");
        assert_eq!(
            to_html(&fragments, &options),
            "<figure><img src=\"https://cdn.example.com/a.jpg\" alt=\"\"><figcaption>Caption</figcaption></figure>"
        );
    }

    #[test]
    fn test_code_block_escaped() {
        let fragments = vec![
            Fragment::CodeBlock {
                children: vec![Inline::text("if a < b {}")],
            },
            Fragment::Divider,
        ];
        assert_eq!(
            html(&fragments),
            "<pre><code>if a &lt; b {}</code></pre>\n<hr>"
        );
    }
}
