use crate::defaults::dialect_default;
use crate::escape::safe_url;
use crate::id_generator::IdGenerator;
use crate::markup::MarkupElement;
use crate::model::{Block, BlockType, Properties};
use crate::registry::{object_props, BlockHandler};
use crate::serializer::Context;
use serde_json::json;

/// Call-to-action button.
pub struct ButtonHandler;

impl BlockHandler for ButtonHandler {
    fn block_type(&self) -> BlockType {
        BlockType::Button
    }

    fn tag(&self) -> &'static str {
        "mj-button"
    }

    fn default_properties(&self) -> Properties {
        object_props(json!({
            "text": "Click me",
            "href": "#",
            "backgroundColor": "#346df1",
            "color": "#ffffff",
            "borderRadius": "4px",
            "fontSize": "14px",
            "align": "center",
            "padding": "10px 25px",
        }))
    }

    fn parse(&self, element: &MarkupElement, ids: &mut IdGenerator) -> Option<Block> {
        let props = object_props(json!({
            "text": element.text_content(),
            "href": element.attr_or("href", ""),
            "backgroundColor":
                element.attr_or("background-color", dialect_default("mj-button", "background-color")),
            "color": element.attr_or("color", dialect_default("mj-button", "color")),
            "borderRadius":
                element.attr_or("border-radius", dialect_default("mj-button", "border-radius")),
            "fontSize": element.attr_or("font-size", dialect_default("mj-button", "font-size")),
            "align": element.attr_or("align", dialect_default("mj-button", "align")),
            "padding": element.attr_or("padding", dialect_default("mj-button", "padding")),
        }));
        Some(Block::new(ids, BlockType::Button, props))
    }

    fn generate(&self, block: &Block, ctx: &mut Context) {
        ctx.text_element(
            "mj-button",
            &[
                ("href", safe_url(block.property_str_or("href", ""))),
                ("background-color", block.property_str_or("backgroundColor", "")),
                ("color", block.property_str_or("color", "")),
                ("border-radius", block.property_str_or("borderRadius", "")),
                ("font-size", block.property_str_or("fontSize", "")),
                ("align", block.property_str_or("align", "")),
                ("padding", block.property_str_or("padding", "")),
            ],
            block.property_str_or("text", ""),
        );
    }
}
