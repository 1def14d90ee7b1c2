use crate::defaults::dialect_default;
use crate::escape::safe_url;
use crate::id_generator::IdGenerator;
use crate::markup::MarkupElement;
use crate::model::{Block, BlockType, Properties};
use crate::registry::{object_props, BlockHandler};
use crate::serializer::Context;
use serde_json::{json, Value};

/// Navigation menu, emitted as the dialect's navbar.
pub struct MenuHandler;

impl BlockHandler for MenuHandler {
    fn block_type(&self) -> BlockType {
        BlockType::Menu
    }

    fn tag(&self) -> &'static str {
        "mj-navbar"
    }

    fn default_properties(&self) -> Properties {
        object_props(json!({
            "items": [
                { "text": "Home", "href": "#" },
                { "text": "About", "href": "#" },
            ],
            "color": "#000000",
            "fontSize": "14px",
            "align": "center",
            "padding": "10px 25px",
        }))
    }

    fn parse(&self, element: &MarkupElement, ids: &mut IdGenerator) -> Option<Block> {
        let items: Vec<Value> = element
            .child_elements()
            .filter(|child| child.tag == "mj-navbar-link")
            .map(|child| {
                json!({
                    "text": child.text_content(),
                    "href": child.attr_or("href", ""),
                })
            })
            .collect();

        let props = object_props(json!({
            "items": items,
            "color": element.attr_or("color", dialect_default("mj-navbar", "color")),
            "fontSize": element.attr_or("font-size", dialect_default("mj-navbar", "font-size")),
            "align": element.attr_or("align", dialect_default("mj-navbar", "align")),
            "padding": element.attr_or("padding", dialect_default("mj-navbar", "padding")),
        }));
        Some(Block::new(ids, BlockType::Menu, props))
    }

    fn generate(&self, block: &Block, ctx: &mut Context) {
        ctx.open(
            "mj-navbar",
            &[
                ("align", block.property_str_or("align", "")),
                ("padding", block.property_str_or("padding", "")),
            ],
        );

        let empty = Vec::new();
        let items = block
            .properties
            .get("items")
            .and_then(Value::as_array)
            .unwrap_or(&empty);
        for item in items {
            let text = item.get("text").and_then(Value::as_str).unwrap_or("");
            let href = item.get("href").and_then(Value::as_str).unwrap_or("");
            ctx.text_element(
                "mj-navbar-link",
                &[
                    ("href", safe_url(href)),
                    ("color", block.property_str_or("color", "")),
                    ("font-size", block.property_str_or("fontSize", "")),
                ],
                text,
            );
        }

        ctx.close("mj-navbar");
    }

    fn validate_properties(&self, properties: &Properties, path: &str, errors: &mut Vec<String>) {
        match properties.get("items") {
            Some(Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    if !item.is_object() {
                        errors.push(format!("{}.items[{}]: expected an object", path, i));
                    }
                }
            }
            Some(_) => errors.push(format!("{}.items: expected an array", path)),
            None => {}
        }
    }
}
