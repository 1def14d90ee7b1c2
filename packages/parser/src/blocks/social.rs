use crate::defaults::dialect_default;
use crate::escape::safe_url;
use crate::id_generator::IdGenerator;
use crate::markup::MarkupElement;
use crate::model::{Block, BlockType, Properties};
use crate::registry::{object_props, BlockHandler};
use crate::serializer::Context;
use serde_json::{json, Value};

/// Prefix for platform names carrying a custom icon. The dialect's renderer
/// ignores a custom icon source when the name matches one of its built-in
/// icon sets, so custom-icon items must hide behind an unrecognized name; the
/// real platform survives as a css class for the parser to restore.
const CUSTOM_ICON_PREFIX: &str = "x-";

pub struct SocialHandler;

impl BlockHandler for SocialHandler {
    fn block_type(&self) -> BlockType {
        BlockType::Social
    }

    fn tag(&self) -> &'static str {
        "mj-social"
    }

    fn default_properties(&self) -> Properties {
        object_props(json!({
            "items": [
                { "platform": "facebook", "href": "#", "iconUrl": "" },
                { "platform": "twitter", "href": "#", "iconUrl": "" },
                { "platform": "instagram", "href": "#", "iconUrl": "" },
            ],
            "iconSize": "20px",
            "align": "center",
            "padding": "10px 25px",
        }))
    }

    fn parse(&self, element: &MarkupElement, ids: &mut IdGenerator) -> Option<Block> {
        let mut items = Vec::new();
        for child in element
            .child_elements()
            .filter(|child| child.tag == "mj-social-element")
        {
            let name = child.attr_or("name", "");
            let (platform, icon_url) = match name.strip_prefix(CUSTOM_ICON_PREFIX) {
                Some(stripped) => {
                    let platform = child
                        .attr("css-class")
                        .filter(|class| !class.is_empty())
                        .unwrap_or(stripped);
                    (platform.to_string(), child.attr_or("src", "").to_string())
                }
                None => (name.to_string(), String::new()),
            };
            items.push(json!({
                "platform": platform,
                "href": child.attr_or("href", ""),
                "iconUrl": icon_url,
            }));
        }

        let props = object_props(json!({
            "items": items,
            "iconSize": element.attr_or("icon-size", dialect_default("mj-social", "icon-size")),
            "align": element.attr_or("align", dialect_default("mj-social", "align")),
            "padding": element.attr_or("padding", dialect_default("mj-social", "padding")),
        }));
        Some(Block::new(ids, BlockType::Social, props))
    }

    fn generate(&self, block: &Block, ctx: &mut Context) {
        ctx.open(
            "mj-social",
            &[
                ("icon-size", block.property_str_or("iconSize", "")),
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
            let platform = item.get("platform").and_then(Value::as_str).unwrap_or("");
            let href = item.get("href").and_then(Value::as_str).unwrap_or("");
            let icon_url = item.get("iconUrl").and_then(Value::as_str).unwrap_or("");
            if icon_url.is_empty() {
                ctx.self_close(
                    "mj-social-element",
                    &[("name", platform), ("href", safe_url(href))],
                );
            } else {
                let prefixed = format!("{}{}", CUSTOM_ICON_PREFIX, platform);
                ctx.self_close(
                    "mj-social-element",
                    &[
                        ("name", &prefixed),
                        ("css-class", platform),
                        ("src", safe_url(icon_url)),
                        ("href", safe_url(href)),
                    ],
                );
            }
        }

        ctx.close("mj-social");
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
