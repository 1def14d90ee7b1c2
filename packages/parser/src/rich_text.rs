//! Rich-text content fixups.
//!
//! The internal rich-text representation understands styled spans only, so
//! legacy `<font>` markup is rewritten on the way in; variable chips and
//! missing zero-margins are rewritten on the way out.

use crate::markup::{read_markup, serialize_nodes, MarkupElement, MarkupNode};

/// The three legacy size keywords and their fixed pixel sizes.
const FONT_SIZE_KEYWORDS: &[(&str, &str)] = &[
    ("small", "12px"),
    ("medium", "16px"),
    ("large", "24px"),
];

/// Elements that receive a forced `margin:0`, mirroring the head-level reset.
const MARGIN_RESET_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "blockquote",
];

/// Rewrite legacy `<font size|color|face>` elements into span+inline-style,
/// recursively.
pub fn rewrite_legacy_fonts(nodes: Vec<MarkupNode>) -> Vec<MarkupNode> {
    nodes
        .into_iter()
        .map(|node| match node {
            MarkupNode::Element(element) => MarkupNode::Element(rewrite_font_element(element)),
            other => other,
        })
        .collect()
}

fn rewrite_font_element(mut element: MarkupElement) -> MarkupElement {
    element.children = rewrite_legacy_fonts(std::mem::take(&mut element.children));
    if element.tag != "font" {
        return element;
    }

    let mut style = String::new();
    if let Some(size) = element.attr("size") {
        if let Some(&(_, px)) = FONT_SIZE_KEYWORDS
            .iter()
            .find(|(keyword, _)| keyword.eq_ignore_ascii_case(size))
        {
            style.push_str("font-size:");
            style.push_str(px);
            style.push(';');
        }
    }
    if let Some(color) = element.attr("color") {
        style.push_str("color:");
        style.push_str(color);
        style.push(';');
    }
    if let Some(face) = element.attr("face") {
        style.push_str("font-family:");
        style.push_str(face);
        style.push(';');
    }

    let mut span = MarkupElement::new("span");
    if !style.is_empty() {
        span.attributes.push(("style".to_string(), style));
    }
    span.children = element.children;
    span
}

/// Prepare stored rich content for emission: variable chips become `{{ key }}`
/// placeholders and block-level elements get `margin:0` forced when absent.
/// Content that does not parse is passed through unchanged — the generator
/// never fails.
pub fn prepare_content(html: &str) -> String {
    match read_markup(html) {
        Ok(nodes) => {
            let nodes = force_zero_margins(rewrite_variable_chips(nodes));
            serialize_nodes(&nodes)
        }
        Err(_) => html.to_string(),
    }
}

/// Replace variable-chip spans with their plain placeholder text.
pub fn rewrite_variable_chips(nodes: Vec<MarkupNode>) -> Vec<MarkupNode> {
    nodes
        .into_iter()
        .map(|node| match node {
            MarkupNode::Element(element) => rewrite_chip_element(element),
            other => other,
        })
        .collect()
}

fn rewrite_chip_element(mut element: MarkupElement) -> MarkupNode {
    let is_chip = element.tag == "span"
        && element
            .attr("class")
            .map(|class| class.split_whitespace().any(|c| c == "variable-chip"))
            .unwrap_or(false);
    if is_chip {
        if let Some(key) = element.attr("data-key") {
            return MarkupNode::Text(format!("{{{{ {} }}}}", key));
        }
    }
    element.children = rewrite_variable_chips(std::mem::take(&mut element.children));
    MarkupNode::Element(element)
}

/// Force `margin:0` onto paragraph/heading/list elements lacking a margin, so
/// generated output agrees with the head-level reset.
pub fn force_zero_margins(nodes: Vec<MarkupNode>) -> Vec<MarkupNode> {
    nodes
        .into_iter()
        .map(|node| match node {
            MarkupNode::Element(mut element) => {
                element.children = force_zero_margins(std::mem::take(&mut element.children));
                if MARGIN_RESET_TAGS.contains(&element.tag.as_str()) {
                    apply_zero_margin(&mut element);
                }
                MarkupNode::Element(element)
            }
            other => other,
        })
        .collect()
}

fn apply_zero_margin(element: &mut MarkupElement) {
    match element
        .attributes
        .iter_mut()
        .find(|(name, _)| name == "style")
    {
        Some((_, style)) => {
            if !style.contains("margin") {
                if !style.trim_end().is_empty() && !style.trim_end().ends_with(';') {
                    style.push(';');
                }
                style.push_str("margin:0;");
            }
        }
        None => {
            element
                .attributes
                .push(("style".to_string(), "margin:0;".to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::read_markup;

    fn roundtrip(html: &str, f: impl FnOnce(Vec<MarkupNode>) -> Vec<MarkupNode>) -> String {
        serialize_nodes(&f(read_markup(html).unwrap()))
    }

    #[test]
    fn test_font_tag_becomes_styled_span() {
        let out = roundtrip(
            r##"<p><font size="large" color="#ff0000" face="Georgia">hi</font></p>"##,
            rewrite_legacy_fonts,
        );
        assert_eq!(
            out,
            r#"<p><span style="font-size:24px;color:#ff0000;font-family:Georgia;">hi</span></p>"#
        );
    }

    #[test]
    fn test_font_without_known_attrs_becomes_bare_span() {
        let out = roundtrip("<font>hi</font>", rewrite_legacy_fonts);
        assert_eq!(out, "<span>hi</span>");
    }

    #[test]
    fn test_variable_chip_becomes_placeholder() {
        let out = roundtrip(
            r#"<p>Hi <span class="variable-chip" data-key="first_name">Ada</span>!</p>"#,
            rewrite_variable_chips,
        );
        assert_eq!(out, "<p>Hi {{ first_name }}!</p>");
    }

    #[test]
    fn test_margins_forced_only_when_absent() {
        let out = roundtrip(
            r#"<p>a</p><h2 style="color:red">b</h2><p style="margin:4px">c</p>"#,
            force_zero_margins,
        );
        assert_eq!(
            out,
            r#"<p style="margin:0;">a</p><h2 style="color:red;margin:0;">b</h2><p style="margin:4px">c</p>"#
        );
    }

    #[test]
    fn test_prepare_content_survives_malformed_html() {
        let broken = "<p>unclosed";
        assert_eq!(prepare_content(broken), broken);
    }
}
