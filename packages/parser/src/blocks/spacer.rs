use crate::defaults::dialect_default;
use crate::id_generator::IdGenerator;
use crate::markup::MarkupElement;
use crate::model::{Block, BlockType, Properties};
use crate::registry::{object_props, BlockHandler};
use crate::serializer::Context;
use serde_json::json;

pub struct SpacerHandler;

impl BlockHandler for SpacerHandler {
    fn block_type(&self) -> BlockType {
        BlockType::Spacer
    }

    fn tag(&self) -> &'static str {
        "mj-spacer"
    }

    fn default_properties(&self) -> Properties {
        object_props(json!({
            "height": "20px",
        }))
    }

    fn parse(&self, element: &MarkupElement, ids: &mut IdGenerator) -> Option<Block> {
        let props = object_props(json!({
            "height": element.attr_or("height", dialect_default("mj-spacer", "height")),
        }));
        Some(Block::new(ids, BlockType::Spacer, props))
    }

    fn generate(&self, block: &Block, ctx: &mut Context) {
        ctx.self_close(
            "mj-spacer",
            &[("height", block.property_str_or("height", ""))],
        );
    }
}
