//! Markup parser: dialect text → Template.
//!
//! Hard failures happen only at the structural gate (unparseable text or a
//! missing root element). Past that, unrecognized constructs are silently
//! dropped and missing attributes take the dialect's built-in defaults, so
//! foreign documents degrade instead of erroring.

use crate::defaults::{DIALECT_BODY_BACKGROUND, DIALECT_BODY_WIDTH, DIALECT_FONT_FAMILY};
use crate::defaults::dialect_default;
use crate::error::{ParseError, ParseResult};
use crate::id_generator::IdGenerator;
use crate::markup::{read_markup, MarkupElement, MarkupNode};
use crate::model::{
    even_column_width, Block, Column, GlobalStyles, HeadMetadata, Section, SectionProperties,
    Template,
};
use crate::preprocess::preprocess;
use crate::registry::BlockRegistry;
use tracing::debug;

/// Parse markup with the built-in registry.
pub fn parse(source: &str) -> ParseResult<Template> {
    parse_with(source, &BlockRegistry::new())
}

pub fn parse_with(source: &str, registry: &BlockRegistry) -> ParseResult<Template> {
    let prepared = preprocess(source);
    let nodes = read_markup(&prepared)?;

    let root = nodes
        .iter()
        .find_map(|node| match node {
            MarkupNode::Element(element) if element.tag == "mjml" => Some(element),
            _ => None,
        })
        .ok_or(ParseError::MissingRoot)?;

    let head = root.find_child("mj-head");
    let body = root.find_child("mj-body");

    let mut ids = IdGenerator::new();
    let mut template = Template::new();
    template.global_styles = parse_global_styles(head, body);
    template.head_metadata = parse_head_metadata(head);

    if let Some(body) = body {
        for child in body.child_elements() {
            parse_body_child(child, registry, &mut ids, &mut template.sections);
        }
    }

    debug!(sections = template.sections.len(), "parsed markup");
    Ok(template)
}

/// Global styles come from the body element and the head's apply-to-all
/// attribute block, defaulting to the *dialect's* defaults — not the
/// editor's — so foreign markup round-trips faithfully.
fn parse_global_styles(head: Option<&MarkupElement>, body: Option<&MarkupElement>) -> GlobalStyles {
    let background_color = body
        .and_then(|b| b.attr("background-color"))
        .unwrap_or(DIALECT_BODY_BACKGROUND)
        .to_string();
    let width = body
        .and_then(|b| b.attr("width"))
        .and_then(|w| w.trim_end_matches("px").trim().parse::<u32>().ok())
        .unwrap_or(DIALECT_BODY_WIDTH);
    let font_family = head
        .and_then(|h| h.find_child("mj-attributes"))
        .and_then(|attrs| attrs.find_child("mj-all"))
        .and_then(|all| all.attr("font-family"))
        .unwrap_or(DIALECT_FONT_FAMILY)
        .to_string();

    GlobalStyles {
        background_color,
        width,
        font_family,
    }
}

fn parse_head_metadata(head: Option<&MarkupElement>) -> HeadMetadata {
    let mut metadata = HeadMetadata::default();
    let Some(head) = head else {
        return metadata;
    };
    if let Some(title) = head.find_child("mj-title") {
        metadata.title = title.text_content();
    }
    if let Some(preview) = head.find_child("mj-preview") {
        metadata.preview_text = preview.text_content();
    }
    for style in head.child_elements().filter(|child| child.tag == "mj-style") {
        metadata.head_styles.push(style.inner_markup().trim().to_string());
    }
    metadata
}

/// Direct children of the body: sections, transparently-unwrapped wrappers,
/// and heroes. Anything else is dropped.
fn parse_body_child(
    element: &MarkupElement,
    registry: &BlockRegistry,
    ids: &mut IdGenerator,
    sections: &mut Vec<Section>,
) {
    match element.tag.as_str() {
        "mj-section" => sections.push(parse_section(element, registry, ids)),
        "mj-wrapper" => {
            for child in element.child_elements() {
                parse_body_child(child, registry, ids, sections);
            }
        }
        "mj-hero" => sections.push(parse_hero(element, registry, ids)),
        other => {
            debug!(tag = other, "skipping unrecognized body element");
        }
    }
}

fn parse_section(
    element: &MarkupElement,
    registry: &BlockRegistry,
    ids: &mut IdGenerator,
) -> Section {
    let properties = section_properties_from(element);

    // Columns come either directly or nested one level inside a group.
    let mut column_elements: Vec<&MarkupElement> = Vec::new();
    for child in element.child_elements() {
        match child.tag.as_str() {
            "mj-column" => column_elements.push(child),
            "mj-group" => {
                column_elements.extend(child.child_elements().filter(|c| c.tag == "mj-column"))
            }
            _ => {}
        }
    }

    let mut columns = Vec::new();
    if column_elements.is_empty() {
        // Column-less section: every direct child is a block of one
        // synthesized full-width column.
        let mut column = Column::new(ids, "100%");
        column.blocks = parse_blocks(element, registry, ids);
        columns.push(column);
    } else {
        let count = column_elements.len();
        for column_element in column_elements {
            let width = column_element
                .attr("width")
                .filter(|w| !w.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| even_column_width(count));
            let mut column = Column::new(ids, width);
            column.blocks = parse_blocks(column_element, registry, ids);
            columns.push(column);
        }
    }

    Section {
        id: ids.next_section_id(),
        columns,
        properties,
    }
}

fn section_properties_from(element: &MarkupElement) -> SectionProperties {
    SectionProperties {
        background_color: element
            .attr_or(
                "background-color",
                dialect_default("mj-section", "background-color"),
            )
            .to_string(),
        background_url: element.attr_or("background-url", "").to_string(),
        background_size: element
            .attr_or(
                "background-size",
                dialect_default("mj-section", "background-size"),
            )
            .to_string(),
        background_repeat: element
            .attr_or(
                "background-repeat",
                dialect_default("mj-section", "background-repeat"),
            )
            .to_string(),
        padding: element
            .attr_or("padding", dialect_default("mj-section", "padding"))
            .to_string(),
        border_radius: element
            .attr_or("border-radius", dialect_default("mj-section", "border-radius"))
            .to_string(),
        full_width: element.attr("full-width").is_some(),
    }
}

/// Registry-dispatched block parsing; unrecognized tags degrade silently.
fn parse_blocks(
    parent: &MarkupElement,
    registry: &BlockRegistry,
    ids: &mut IdGenerator,
) -> Vec<Block> {
    let mut blocks = Vec::new();
    for child in parent.child_elements() {
        match registry.handler_for_tag(&child.tag) {
            Some(handler) => {
                if let Some(block) = handler.parse(child, ids) {
                    blocks.push(block);
                }
            }
            None => {
                debug!(tag = %child.tag, "skipping unrecognized block element");
            }
        }
    }
    blocks
}

/// The hero construct is two-faced: with an image child it cannot stay a
/// single hero block (the native element cannot hold more than one image), so
/// it becomes a regular section whose children are parsed individually;
/// without one it collapses into a single structured hero block.
fn parse_hero(
    element: &MarkupElement,
    registry: &BlockRegistry,
    ids: &mut IdGenerator,
) -> Section {
    let has_image = element.child_elements().any(|child| child.tag == "mj-image");

    if has_image {
        let properties = SectionProperties {
            background_color: element
                .attr_or(
                    "background-color",
                    dialect_default("mj-hero", "background-color"),
                )
                .to_string(),
            background_url: element.attr_or("background-url", "").to_string(),
            padding: element
                .attr_or("padding", dialect_default("mj-hero", "padding"))
                .to_string(),
            ..SectionProperties::default()
        };
        let mut column = Column::new(ids, "100%");
        column.blocks = parse_blocks(element, registry, ids);
        return Section {
            id: ids.next_section_id(),
            columns: vec![column],
            properties,
        };
    }

    let mut column = Column::new(ids, "100%");
    if let Some(block) = registry
        .handler_for_tag("mj-hero")
        .and_then(|handler| handler.parse(element, ids))
    {
        column.blocks.push(block);
    }
    Section {
        id: ids.next_section_id(),
        columns: vec![column],
        properties: SectionProperties::default(),
    }
}
