use crate::defaults::dialect_default;
use crate::id_generator::IdGenerator;
use crate::markup::{serialize_nodes, MarkupElement};
use crate::model::{Block, BlockType, Properties};
use crate::registry::{object_props, BlockHandler};
use crate::rich_text::{prepare_content, rewrite_legacy_fonts};
use crate::serializer::Context;
use serde_json::json;

/// Rich text paragraphs.
pub struct TextHandler;

impl BlockHandler for TextHandler {
    fn block_type(&self) -> BlockType {
        BlockType::Text
    }

    fn tag(&self) -> &'static str {
        "mj-text"
    }

    fn default_properties(&self) -> Properties {
        object_props(json!({
            "content": "<p>Hello there!</p>",
            "color": "#000000",
            "fontSize": "14px",
            "fontFamily": "",
            "lineHeight": "1.5",
            "align": "left",
            "padding": "10px 25px",
        }))
    }

    fn parse(&self, element: &MarkupElement, ids: &mut IdGenerator) -> Option<Block> {
        let content = serialize_nodes(&rewrite_legacy_fonts(element.children.clone()));
        let props = object_props(json!({
            "content": content.trim(),
            "color": element.attr_or("color", dialect_default("mj-text", "color")),
            "fontSize": element.attr_or("font-size", dialect_default("mj-text", "font-size")),
            "fontFamily": element.attr_or("font-family", ""),
            "lineHeight": element.attr_or("line-height", dialect_default("mj-text", "line-height")),
            "align": element.attr_or("align", dialect_default("mj-text", "align")),
            "padding": element.attr_or("padding", dialect_default("mj-text", "padding")),
        }));
        Some(Block::new(ids, BlockType::Text, props))
    }

    fn generate(&self, block: &Block, ctx: &mut Context) {
        let content = prepare_content(block.property_str_or("content", ""));
        ctx.raw_element(
            "mj-text",
            &[
                ("color", block.property_str_or("color", "")),
                ("font-size", block.property_str_or("fontSize", "")),
                ("font-family", block.property_str_or("fontFamily", "")),
                ("line-height", block.property_str_or("lineHeight", "")),
                ("align", block.property_str_or("align", "")),
                ("padding", block.property_str_or("padding", "")),
            ],
            &content,
        );
    }
}
