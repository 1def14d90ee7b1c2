//! Tag-tree reader for the markup dialect.
//!
//! Produces a plain node tree (elements, text, comments) or a `ParseError`
//! when the text is not structurally well-formed. Everything smarter — block
//! mapping, defaults, hero handling — happens above this layer.

use crate::error::{ParseError, ParseResult};
use crate::escape::{decode_basic_entities, escape_attribute};
use crate::tokenizer::{ContentToken, TagToken};
use logos::Logos;

/// Elements that are legal unclosed in HTML and therefore read as childless.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[derive(Debug, Clone, PartialEq)]
pub enum MarkupNode {
    Element(MarkupElement),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkupElement {
    pub tag: String,
    /// Attributes in source order; duplicate names keep the first value.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<MarkupNode>,
}

impl MarkupElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn attr_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.attr(name).unwrap_or(default)
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &MarkupElement> {
        self.children.iter().filter_map(|node| match node {
            MarkupNode::Element(element) => Some(element),
            _ => None,
        })
    }

    pub fn find_child(&self, tag: &str) -> Option<&MarkupElement> {
        self.child_elements().find(|element| element.tag == tag)
    }

    pub fn has_child(&self, tag: &str) -> bool {
        self.find_child(tag).is_some()
    }

    /// Concatenated descendant text with the basic entities decoded.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        decode_basic_entities(out.trim())
    }

    /// Children re-serialized to markup text, e.g. the rich content of a text
    /// block.
    pub fn inner_markup(&self) -> String {
        serialize_nodes(&self.children)
    }

    /// True if any descendant element has the given tag.
    pub fn contains_descendant(&self, tag: &str) -> bool {
        self.children.iter().any(|node| match node {
            MarkupNode::Element(element) => element.tag == tag || element.contains_descendant(tag),
            _ => false,
        })
    }
}

fn collect_text(nodes: &[MarkupNode], out: &mut String) {
    for node in nodes {
        match node {
            MarkupNode::Text(text) => out.push_str(text),
            MarkupNode::Element(element) => collect_text(&element.children, out),
            MarkupNode::Comment(_) => {}
        }
    }
}

/// Serialize a node list back to markup text.
pub fn serialize_nodes(nodes: &[MarkupNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        serialize_node(node, &mut out);
    }
    out
}

fn serialize_node(node: &MarkupNode, out: &mut String) {
    match node {
        MarkupNode::Text(text) => out.push_str(text),
        MarkupNode::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
        MarkupNode::Element(element) => {
            out.push('<');
            out.push_str(&element.tag);
            for (name, value) in &element.attributes {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_attribute(value));
                out.push('"');
            }
            if element.children.is_empty() && VOID_ELEMENTS.contains(&element.tag.as_str()) {
                out.push_str(" />");
            } else {
                out.push('>');
                for child in &element.children {
                    serialize_node(child, out);
                }
                out.push_str("</");
                out.push_str(&element.tag);
                out.push('>');
            }
        }
    }
}

/// Read markup text into a node tree. Fails on structurally malformed input:
/// stray closing tags, mismatched or unclosed elements, garbage inside tags.
pub fn read_markup(source: &str) -> ParseResult<Vec<MarkupNode>> {
    let mut roots: Vec<MarkupNode> = Vec::new();
    let mut stack: Vec<MarkupElement> = Vec::new();
    let mut lexer = ContentToken::lexer(source);

    while let Some(token) = lexer.next() {
        let pos = lexer.span().start;
        let token =
            token.map_err(|_| ParseError::malformed(pos, "unrecognized markup", source))?;
        match token {
            ContentToken::Text(text) => {
                attach(MarkupNode::Text(text.to_string()), &mut stack, &mut roots);
            }
            ContentToken::Comment(comment) => {
                attach(
                    MarkupNode::Comment(comment.to_string()),
                    &mut stack,
                    &mut roots,
                );
            }
            ContentToken::TagOpen => {
                let mut tag_lexer = lexer.morph::<TagToken>();
                let (element, self_closed) = read_tag(&mut tag_lexer, source)?;
                lexer = tag_lexer.morph();
                if self_closed || VOID_ELEMENTS.contains(&element.tag.as_str()) {
                    attach(MarkupNode::Element(element), &mut stack, &mut roots);
                } else {
                    stack.push(element);
                }
            }
            ContentToken::CloseTagOpen => {
                let mut tag_lexer = lexer.morph::<TagToken>();
                let name = read_closing_tag(&mut tag_lexer, source)?;
                lexer = tag_lexer.morph();
                let open = stack.pop().ok_or_else(|| {
                    ParseError::malformed(pos, format!("unexpected closing tag </{}>", name), source)
                })?;
                if open.tag != name {
                    return Err(ParseError::malformed(
                        pos,
                        format!("mismatched closing tag: expected </{}>, found </{}>", open.tag, name),
                        source,
                    ));
                }
                attach(MarkupNode::Element(open), &mut stack, &mut roots);
            }
            ContentToken::Declaration | ContentToken::ProcessingInstruction => {
                // Skipped by the lexer; never yielded.
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(ParseError::malformed(
            source.len(),
            format!("unclosed element <{}>", open.tag),
            source,
        ));
    }

    Ok(roots)
}

fn attach(node: MarkupNode, stack: &mut [MarkupElement], roots: &mut Vec<MarkupNode>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

/// Read `name (attr (= value)?)* (> | />)` after a `<`.
fn read_tag<'src>(
    lexer: &mut logos::Lexer<'src, TagToken<'src>>,
    source: &str,
) -> ParseResult<(MarkupElement, bool)> {
    let name = match lexer.next() {
        Some(Ok(TagToken::Name(name))) => name,
        Some(_) => {
            return Err(ParseError::malformed(
                lexer.span().start,
                "expected tag name after '<'",
                source,
            ))
        }
        None => return Err(ParseError::unexpected_eof(source.len())),
    };

    let mut element = MarkupElement::new(name);
    loop {
        match lexer.next() {
            Some(Ok(TagToken::Close)) => return Ok((element, false)),
            Some(Ok(TagToken::SelfClose)) => return Ok((element, true)),
            Some(Ok(TagToken::Name(attr_name))) => {
                let value = read_attribute_value(lexer, source)?;
                if element.attr(attr_name).is_none() {
                    element
                        .attributes
                        .push((attr_name.to_string(), decode_basic_entities(&value)));
                }
            }
            Some(_) => {
                return Err(ParseError::malformed(
                    lexer.span().start,
                    format!("unexpected token in <{}> tag", element.tag),
                    source,
                ))
            }
            None => return Err(ParseError::unexpected_eof(source.len())),
        }
    }
}

/// Value after an attribute name: `= "v"`, `= v`, or nothing (bare flag).
fn read_attribute_value<'src>(
    lexer: &mut logos::Lexer<'src, TagToken<'src>>,
    source: &str,
) -> ParseResult<String> {
    let mut peek = lexer.clone();
    match peek.next() {
        Some(Ok(TagToken::Eq)) => {
            *lexer = peek;
            match lexer.next() {
                Some(Ok(TagToken::Quoted(value))) => Ok(value.to_string()),
                Some(Ok(TagToken::Name(value))) => Ok(value.to_string()),
                Some(_) => Err(ParseError::malformed(
                    lexer.span().start,
                    "expected attribute value after '='",
                    source,
                )),
                None => Err(ParseError::unexpected_eof(source.len())),
            }
        }
        // Bare attribute such as `full-width`.
        _ => Ok(String::new()),
    }
}

fn read_closing_tag<'src>(
    lexer: &mut logos::Lexer<'src, TagToken<'src>>,
    source: &str,
) -> ParseResult<String> {
    let name = match lexer.next() {
        Some(Ok(TagToken::Name(name))) => name.to_string(),
        Some(_) => {
            return Err(ParseError::malformed(
                lexer.span().start,
                "expected tag name after '</'",
                source,
            ))
        }
        None => return Err(ParseError::unexpected_eof(source.len())),
    };
    match lexer.next() {
        Some(Ok(TagToken::Close)) => Ok(name),
        Some(_) => Err(ParseError::malformed(
            lexer.span().start,
            format!("expected '>' after closing tag name {}", name),
            source,
        )),
        None => Err(ParseError::unexpected_eof(source.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_one(source: &str) -> MarkupElement {
        let nodes = read_markup(source).unwrap();
        match nodes.into_iter().next().unwrap() {
            MarkupNode::Element(element) => element,
            other => panic!("expected element, got {:?}", other),
        }
    }

    #[test]
    fn test_reads_nested_elements() {
        let root = read_one(r#"<mj-section padding="0"><mj-column><mj-text>Hi</mj-text></mj-column></mj-section>"#);
        assert_eq!(root.tag, "mj-section");
        assert_eq!(root.attr("padding"), Some("0"));
        let column = root.find_child("mj-column").unwrap();
        let text = column.find_child("mj-text").unwrap();
        assert_eq!(text.text_content(), "Hi");
    }

    #[test]
    fn test_void_elements_need_no_close() {
        let root = read_one("<p>a<br />b</p>");
        assert_eq!(root.children.len(), 3);
        assert!(root.has_child("br"));
    }

    #[test]
    fn test_bare_attribute_reads_as_empty_flag() {
        let root = read_one("<mj-section full-width></mj-section>");
        assert_eq!(root.attr("full-width"), Some(""));
    }

    #[test]
    fn test_mismatched_close_is_an_error() {
        let err = read_markup("<mj-section><mj-column></mj-section>").unwrap_err();
        assert!(matches!(err, ParseError::MalformedMarkup { .. }));
    }

    #[test]
    fn test_stray_close_is_an_error() {
        let err = read_markup("</mj-section>").unwrap_err();
        assert!(matches!(err, ParseError::MalformedMarkup { .. }));
    }

    #[test]
    fn test_unclosed_element_is_an_error() {
        let err = read_markup("<mj-section>").unwrap_err();
        assert!(matches!(err, ParseError::MalformedMarkup { .. }));
    }

    #[test]
    fn test_comments_are_preserved() {
        let root = read_one("<div><!--note--></div>");
        assert_eq!(root.children[0], MarkupNode::Comment("note".to_string()));
    }

    #[test]
    fn test_inner_markup_round_trips() {
        let root = read_one(r#"<mj-text><p style="margin:0">Hi <b>there</b></p></mj-text>"#);
        assert_eq!(
            root.inner_markup(),
            r#"<p style="margin:0">Hi <b>there</b></p>"#
        );
    }

    #[test]
    fn test_duplicate_attributes_keep_first_value() {
        let root = read_one(r#"<img src="a" src="b" />"#);
        assert_eq!(root.attr("src"), Some("a"));
    }
}
