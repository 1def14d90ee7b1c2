//! Display-time HTML sanitizer for raw blocks.
//!
//! Raw-HTML block content is end-user-authored markup; it passes through here
//! on generation so the emitted document cannot carry executable content.
//! Built on the crate's own markup reader. Unparseable fragments fall back to
//! content-escaped text — the generator must never fail.

use crate::escape::{escape_content, safe_url};
use crate::markup::{read_markup, serialize_nodes, MarkupElement, MarkupNode};
use crate::preprocess::preprocess;

/// Tags dropped entirely, content included.
const DENY_TAGS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "form", "link", "meta", "base", "applet",
];

/// Attributes dropped from every element (plus any `on*` handler).
const DENY_ATTRS: &[&str] = &["srcdoc", "formaction", "xlink:href"];

/// Sanitize an end-user HTML fragment for inclusion in generated markup.
pub fn sanitize_html(fragment: &str) -> String {
    match read_markup(&preprocess(fragment)) {
        Ok(nodes) => serialize_nodes(&sanitize_nodes(nodes)),
        Err(_) => escape_content(fragment),
    }
}

fn sanitize_nodes(nodes: Vec<MarkupNode>) -> Vec<MarkupNode> {
    nodes
        .into_iter()
        .filter_map(|node| match node {
            MarkupNode::Element(element) => sanitize_element(element).map(MarkupNode::Element),
            MarkupNode::Text(text) => Some(MarkupNode::Text(text)),
            // Comments survive; countdown parameters ride in them.
            MarkupNode::Comment(comment) => Some(MarkupNode::Comment(comment)),
        })
        .collect()
}

fn sanitize_element(mut element: MarkupElement) -> Option<MarkupElement> {
    if DENY_TAGS.contains(&element.tag.to_ascii_lowercase().as_str()) {
        return None;
    }

    element.attributes.retain(|(name, _)| {
        let name = name.to_ascii_lowercase();
        !name.starts_with("on") && !DENY_ATTRS.contains(&name.as_str())
    });
    for (name, value) in &mut element.attributes {
        let name = name.to_ascii_lowercase();
        if name == "href" || name == "src" {
            let safe = safe_url(value);
            if safe != value {
                *value = safe.to_string();
            }
        }
    }

    element.children = sanitize_nodes(std::mem::take(&mut element.children));
    Some(element)
}
