//! Markup generator: Template → dialect text.
//!
//! Total and defensive — values are escaped, never validated, and unsafe URLs
//! are neutralized rather than rejected, so the output is always a complete
//! renderable document.

use crate::defaults::font_url;
use crate::escape::{escape_attribute, escape_content};
use crate::model::{BlockType, Section, Template};
use crate::registry::BlockRegistry;
use crate::visitor::Visitor;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// CSS reset embedded in every generated head, mirrored by the per-block
/// margin forcing so preview and output agree.
const MARGIN_RESET: &str = "p, h1, h2, h3, h4, h5, h6, ul, ol, blockquote { margin: 0; }";

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Timestamp used to bake countdown digits; defaults to the wall clock.
    pub now: Option<DateTime<Utc>>,
}

/// Generate markup with the built-in registry and default options.
pub fn generate(template: &Template) -> String {
    generate_with(template, &BlockRegistry::new(), GenerateOptions::default())
}

pub fn generate_with(
    template: &Template,
    registry: &BlockRegistry,
    options: GenerateOptions,
) -> String {
    debug!(sections = template.sections.len(), "generating markup");
    let now = options.now.unwrap_or_else(Utc::now);
    let mut ctx = Context::new(now);

    ctx.add_line("<mjml>");
    ctx.indent();
    generate_head(template, &mut ctx);
    generate_body(template, registry, &mut ctx);
    ctx.dedent();
    ctx.add_line("</mjml>");
    ctx.into_output()
}

/// Buffered, indentation-aware output, shared with the block handlers.
pub struct Context {
    buffer: String,
    depth: usize,
    indent: String,
    /// Generation timestamp, read by the countdown handler.
    pub now: DateTime<Utc>,
}

impl Context {
    pub(crate) fn new(now: DateTime<Utc>) -> Self {
        Self {
            buffer: String::new(),
            depth: 0,
            indent: "  ".to_string(),
            now,
        }
    }

    pub fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn add_line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.indent);
        }
        self.add(text);
        self.add("\n");
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    /// `<tag attrs>` on its own line, then indent.
    pub fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        let line = format_tag(tag, attrs, false);
        self.add_line(&line);
        self.indent();
    }

    /// Dedent, then `</tag>`.
    pub fn close(&mut self, tag: &str) {
        self.dedent();
        self.add_line(&format!("</{}>", tag));
    }

    /// `<tag attrs />` on one line.
    pub fn self_close(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        let line = format_tag(tag, attrs, true);
        self.add_line(&line);
    }

    /// `<tag attrs>escaped text</tag>` on one line.
    pub fn text_element(&mut self, tag: &str, attrs: &[(&str, &str)], text: &str) {
        let mut line = format_tag(tag, attrs, false);
        line.push_str(&escape_content(text));
        line.push_str("</");
        line.push_str(tag);
        line.push('>');
        self.add_line(&line);
    }

    /// `<tag attrs>` / raw content / `</tag>` across lines. The content is
    /// emitted as-is; callers escape or sanitize it first.
    pub fn raw_element(&mut self, tag: &str, attrs: &[(&str, &str)], raw: &str) {
        self.open(tag, attrs);
        self.add_line(raw);
        self.close(tag);
    }

    fn into_output(self) -> String {
        self.buffer
    }
}

/// Format an opening tag, escaping values and skipping empty ones.
fn format_tag(tag: &str, attrs: &[(&str, &str)], self_close: bool) -> String {
    let mut out = String::new();
    out.push('<');
    out.push_str(tag);
    for (name, value) in attrs {
        if value.is_empty() {
            continue;
        }
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
    }
    if self_close {
        out.push_str(" />");
    } else {
        out.push('>');
    }
    out
}

fn generate_head(template: &Template, ctx: &mut Context) {
    let head = &template.head_metadata;
    ctx.open("mj-head", &[]);

    if !head.title.is_empty() {
        ctx.text_element("mj-title", &[], &head.title);
    }
    if !head.preview_text.is_empty() {
        ctx.text_element("mj-preview", &[], &head.preview_text);
    }

    for family in referenced_fonts(template) {
        if let Some((name, href)) = font_url(&family) {
            ctx.self_close("mj-font", &[("name", name), ("href", href)]);
        }
    }

    ctx.open("mj-attributes", &[]);
    ctx.self_close(
        "mj-all",
        &[("font-family", &template.global_styles.font_family)],
    );
    ctx.close("mj-attributes");

    ctx.raw_element("mj-style", &[], MARGIN_RESET);

    for style in &head.head_styles {
        ctx.raw_element("mj-style", &[], &strip_head_closers(style));
    }

    ctx.close("mj-head");
}

fn generate_body(template: &Template, registry: &BlockRegistry, ctx: &mut Context) {
    let width = format!("{}px", template.global_styles.width);
    ctx.open(
        "mj-body",
        &[
            ("background-color", &template.global_styles.background_color),
            ("width", &width),
        ],
    );
    for section in &template.sections {
        generate_section(section, registry, ctx);
    }
    ctx.close("mj-body");
}

fn generate_section(section: &Section, registry: &BlockRegistry, ctx: &mut Context) {
    // A lone hero block collapses back to the dialect's native hero element.
    if section.columns.len() == 1
        && section.columns[0].blocks.len() == 1
        && section.columns[0].blocks[0].block_type == BlockType::Hero
    {
        let block = &section.columns[0].blocks[0];
        if let Some(handler) = registry.handler_for_type(&BlockType::Hero) {
            handler.generate(block, ctx);
            return;
        }
    }

    let props = &section.properties;
    let full_width = if props.full_width { "full-width" } else { "" };
    let mut attrs: Vec<(&str, &str)> = vec![
        ("background-color", props.background_color.as_str()),
        ("padding", props.padding.as_str()),
        ("border-radius", props.border_radius.as_str()),
        ("full-width", full_width),
    ];
    if !props.background_url.is_empty() {
        attrs.push(("background-url", props.background_url.as_str()));
        attrs.push(("background-size", props.background_size.as_str()));
        attrs.push(("background-repeat", props.background_repeat.as_str()));
    }
    ctx.open("mj-section", &attrs);

    for column in &section.columns {
        ctx.open("mj-column", &[("width", column.width.as_str())]);
        for block in &column.blocks {
            match registry.handler_for_type(&block.block_type) {
                Some(handler) => handler.generate(block, ctx),
                None => {
                    warn!(
                        block_type = %block.block_type,
                        block_id = %block.id,
                        "no generator registered for block type, skipping"
                    );
                }
            }
        }
        ctx.close("mj-column");
    }

    ctx.close("mj-section");
}

/// Distinct font families referenced anywhere in the document, global styles
/// first, in encounter order.
fn referenced_fonts(template: &Template) -> Vec<String> {
    struct FontCollector {
        fonts: Vec<String>,
    }

    impl Visitor for FontCollector {
        fn visit_block(&mut self, block: &crate::model::Block) {
            if let Some(family) = block.property_str("fontFamily") {
                if !family.is_empty() && !self.fonts.iter().any(|f| f == family) {
                    self.fonts.push(family.to_string());
                }
            }
        }
    }

    let mut collector = FontCollector {
        fonts: vec![template.global_styles.font_family.clone()],
    };
    collector.visit_template(template);
    collector.fonts
}

/// Strip closing sequences that would let a custom style string break out of
/// the head it is embedded in.
fn strip_head_closers(css: &str) -> String {
    let mut out = css.to_string();
    for needle in ["</mj-style>", "</mj-head>"] {
        loop {
            let lower = out.to_ascii_lowercase();
            match lower.find(needle) {
                Some(start) => out.replace_range(start..start + needle.len(), ""),
                None => break,
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tag_skips_empty_attrs() {
        assert_eq!(
            format_tag("mj-image", &[("src", "x.png"), ("href", "")], true),
            r#"<mj-image src="x.png" />"#
        );
    }

    #[test]
    fn test_strip_head_closers() {
        assert_eq!(
            strip_head_closers("a { x: 1 }</mj-style><mj-raw>"),
            "a { x: 1 }<mj-raw>"
        );
        assert_eq!(strip_head_closers("b</MJ-HEAD>c"), "bc");
        assert_eq!(strip_head_closers("plain"), "plain");
    }
}
