use crate::defaults::dialect_default;
use crate::escape::{escape_content, safe_url};
use crate::id_generator::IdGenerator;
use crate::markup::MarkupElement;
use crate::model::{Block, BlockType, Properties};
use crate::registry::{object_props, BlockHandler};
use crate::serializer::Context;
use serde_json::{json, Value};

const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Structured promotional banner.
///
/// Parsing here covers only the single-block shape of the dialect's hero
/// element (no image children); a hero with image children is handled one
/// level up as a regular section, because the native hero construct cannot
/// represent more than one image.
pub struct HeroHandler;

impl BlockHandler for HeroHandler {
    fn block_type(&self) -> BlockType {
        BlockType::Hero
    }

    fn tag(&self) -> &'static str {
        "mj-hero"
    }

    fn default_properties(&self) -> Properties {
        object_props(json!({
            "heading": "",
            "headingColor": "#ffffff",
            "headingFontSize": "36px",
            "subtext": "",
            "textColor": "#ffffff",
            "buttonText": "",
            "buttonHref": "",
            "buttonColor": "#ffffff",
            "buttonBackgroundColor": "#346df1",
            "buttonBorderRadius": "3px",
            "align": "center",
            "backgroundColor": "#2a3448",
            "backgroundUrl": "",
            "padding": "100px 0px",
        }))
    }

    fn parse(&self, element: &MarkupElement, ids: &mut IdGenerator) -> Option<Block> {
        let mut props = self.default_properties();
        set_str(
            &mut props,
            "backgroundColor",
            element.attr_or(
                "background-color",
                dialect_default("mj-hero", "background-color"),
            ),
        );
        set_str(&mut props, "backgroundUrl", element.attr_or("background-url", ""));
        set_str(
            &mut props,
            "padding",
            element.attr_or("padding", dialect_default("mj-hero", "padding")),
        );

        let mut heading: Option<String> = None;
        let mut subtext: Option<String> = None;

        for child in element.child_elements() {
            // Alignment comes from whichever child last specified it.
            if let Some(align) = child.attr("align") {
                if !align.is_empty() {
                    set_str(&mut props, "align", align);
                }
            }
            match child.tag.as_str() {
                "mj-text" => {
                    if heading.is_none() {
                        if let Some(heading_element) = find_heading(child) {
                            heading = Some(heading_element.text_content());
                            if let Some(color) = child.attr("color") {
                                set_str(&mut props, "headingColor", color);
                            }
                            if let Some(size) = child.attr("font-size") {
                                set_str(&mut props, "headingFontSize", size);
                            }
                            continue;
                        }
                    }
                    if subtext.is_none() {
                        subtext = Some(child.text_content());
                        if let Some(color) = child.attr("color") {
                            set_str(&mut props, "textColor", color);
                        }
                    }
                }
                "mj-button" => {
                    set_str(&mut props, "buttonText", &child.text_content());
                    set_str(&mut props, "buttonHref", child.attr_or("href", ""));
                    set_str(
                        &mut props,
                        "buttonBackgroundColor",
                        child.attr_or(
                            "background-color",
                            dialect_default("mj-button", "background-color"),
                        ),
                    );
                    set_str(
                        &mut props,
                        "buttonColor",
                        child.attr_or("color", dialect_default("mj-button", "color")),
                    );
                    set_str(
                        &mut props,
                        "buttonBorderRadius",
                        child.attr_or("border-radius", dialect_default("mj-button", "border-radius")),
                    );
                }
                _ => {}
            }
        }

        // A lone text child never vanishes: promote the subtext into the
        // heading slot when no heading was found.
        let (heading, subtext) = match (heading, subtext) {
            (None, Some(text)) => (Some(text), None),
            pair => pair,
        };
        set_str(&mut props, "heading", heading.as_deref().unwrap_or(""));
        set_str(&mut props, "subtext", subtext.as_deref().unwrap_or(""));

        Some(Block::new(ids, BlockType::Hero, props))
    }

    fn generate(&self, block: &Block, ctx: &mut Context) {
        let align = block.property_str_or("align", "center");
        ctx.open(
            "mj-hero",
            &[
                ("background-color", block.property_str_or("backgroundColor", "")),
                ("background-url", block.property_str_or("backgroundUrl", "")),
                ("padding", block.property_str_or("padding", "")),
            ],
        );

        let heading = block.property_str_or("heading", "");
        if !heading.is_empty() {
            let inner = format!(
                "<h1 style=\"margin:0\">{}</h1>",
                escape_content(heading)
            );
            ctx.raw_element(
                "mj-text",
                &[
                    ("align", align),
                    ("color", block.property_str_or("headingColor", "")),
                    ("font-size", block.property_str_or("headingFontSize", "")),
                ],
                &inner,
            );
        }

        let subtext = block.property_str_or("subtext", "");
        if !subtext.is_empty() {
            ctx.text_element(
                "mj-text",
                &[
                    ("align", align),
                    ("color", block.property_str_or("textColor", "")),
                ],
                subtext,
            );
        }

        let button_text = block.property_str_or("buttonText", "");
        if !button_text.is_empty() {
            ctx.text_element(
                "mj-button",
                &[
                    ("href", safe_url(block.property_str_or("buttonHref", ""))),
                    (
                        "background-color",
                        block.property_str_or("buttonBackgroundColor", ""),
                    ),
                    ("color", block.property_str_or("buttonColor", "")),
                    ("border-radius", block.property_str_or("buttonBorderRadius", "")),
                    ("align", align),
                ],
                button_text,
            );
        }

        ctx.close("mj-hero");
    }
}

fn set_str(props: &mut Properties, key: &str, value: &str) {
    props.insert(key.to_string(), Value::String(value.to_string()));
}

/// First descendant heading element, depth-first.
fn find_heading(element: &MarkupElement) -> Option<&MarkupElement> {
    for child in element.child_elements() {
        if HEADING_TAGS.contains(&child.tag.as_str()) {
            return Some(child);
        }
        if let Some(found) = find_heading(child) {
            return Some(found);
        }
    }
    None
}
