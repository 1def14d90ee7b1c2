use crate::defaults::dialect_default;
use crate::id_generator::IdGenerator;
use crate::markup::{serialize_nodes, MarkupElement};
use crate::model::{Block, BlockType, Properties};
use crate::registry::{object_props, BlockHandler};
use crate::rich_text::{prepare_content, rewrite_legacy_fonts};
use crate::serializer::Context;
use serde_json::json;

/// Standalone heading. Headings embedded in foreign text content stay text
/// blocks; this handler covers the editor's dedicated heading element.
pub struct HeadingHandler;

impl BlockHandler for HeadingHandler {
    fn block_type(&self) -> BlockType {
        BlockType::Heading
    }

    fn tag(&self) -> &'static str {
        "mj-heading"
    }

    fn default_properties(&self) -> Properties {
        object_props(json!({
            "content": "Heading",
            "level": "h2",
            "color": "#000000",
            "fontSize": "24px",
            "align": "left",
            "padding": "10px 25px",
        }))
    }

    fn parse(&self, element: &MarkupElement, ids: &mut IdGenerator) -> Option<Block> {
        let content = serialize_nodes(&rewrite_legacy_fonts(element.children.clone()));
        let props = object_props(json!({
            "content": content.trim(),
            "level": element.attr_or("level", dialect_default("mj-heading", "level")),
            "color": element.attr_or("color", dialect_default("mj-heading", "color")),
            "fontSize": element.attr_or("font-size", dialect_default("mj-heading", "font-size")),
            "align": element.attr_or("align", dialect_default("mj-heading", "align")),
            "padding": element.attr_or("padding", dialect_default("mj-heading", "padding")),
        }));
        Some(Block::new(ids, BlockType::Heading, props))
    }

    fn generate(&self, block: &Block, ctx: &mut Context) {
        let content = prepare_content(block.property_str_or("content", ""));
        ctx.raw_element(
            "mj-heading",
            &[
                ("level", block.property_str_or("level", "h2")),
                ("color", block.property_str_or("color", "")),
                ("font-size", block.property_str_or("fontSize", "")),
                ("align", block.property_str_or("align", "")),
                ("padding", block.property_str_or("padding", "")),
            ],
            &content,
        );
    }
}
