use crate::defaults::dialect_default;
use crate::id_generator::IdGenerator;
use crate::markup::MarkupElement;
use crate::model::{Block, BlockType, Properties};
use crate::registry::{object_props, BlockHandler};
use crate::serializer::Context;
use serde_json::json;

pub struct DividerHandler;

impl BlockHandler for DividerHandler {
    fn block_type(&self) -> BlockType {
        BlockType::Divider
    }

    fn tag(&self) -> &'static str {
        "mj-divider"
    }

    fn default_properties(&self) -> Properties {
        object_props(json!({
            "borderColor": "#dddddd",
            "borderStyle": "solid",
            "borderWidth": "1px",
            "width": "100%",
            "padding": "10px 25px",
        }))
    }

    fn parse(&self, element: &MarkupElement, ids: &mut IdGenerator) -> Option<Block> {
        let props = object_props(json!({
            "borderColor":
                element.attr_or("border-color", dialect_default("mj-divider", "border-color")),
            "borderStyle":
                element.attr_or("border-style", dialect_default("mj-divider", "border-style")),
            "borderWidth":
                element.attr_or("border-width", dialect_default("mj-divider", "border-width")),
            "width": element.attr_or("width", dialect_default("mj-divider", "width")),
            "padding": element.attr_or("padding", dialect_default("mj-divider", "padding")),
        }));
        Some(Block::new(ids, BlockType::Divider, props))
    }

    fn generate(&self, block: &Block, ctx: &mut Context) {
        ctx.self_close(
            "mj-divider",
            &[
                ("border-color", block.property_str_or("borderColor", "")),
                ("border-style", block.property_str_or("borderStyle", "")),
                ("border-width", block.property_str_or("borderWidth", "")),
                ("width", block.property_str_or("width", "")),
                ("padding", block.property_str_or("padding", "")),
            ],
        );
    }
}
