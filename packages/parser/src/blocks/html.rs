use crate::html_sanitizer::sanitize_html;
use crate::id_generator::IdGenerator;
use crate::markup::{MarkupElement, MarkupNode};
use crate::model::{Block, BlockType, Properties};
use crate::registry::{object_props, BlockHandler};
use crate::serializer::Context;
use serde_json::{json, Value};
use tracing::debug;

use super::countdown::{editor_defaults as countdown_defaults, COUNTDOWN_COMMENT_PREFIX};

/// Raw end-user HTML. Also the landing element for baked countdowns, which
/// are recognized by their leading parameter comment.
pub struct RawHtmlHandler;

impl BlockHandler for RawHtmlHandler {
    fn block_type(&self) -> BlockType {
        BlockType::Html
    }

    fn tag(&self) -> &'static str {
        "mj-raw"
    }

    fn default_properties(&self) -> Properties {
        object_props(json!({
            "content": "",
        }))
    }

    fn parse(&self, element: &MarkupElement, ids: &mut IdGenerator) -> Option<Block> {
        if let Some(params) = leading_countdown_params(element) {
            debug!("recovered countdown block from raw markup");
            let mut props = countdown_defaults();
            for (key, value) in params {
                props.insert(key, value);
            }
            return Some(Block::new(ids, BlockType::Countdown, props));
        }

        let content = element.inner_markup().trim().to_string();
        let props = object_props(json!({ "content": content }));
        Some(Block::new(ids, BlockType::Html, props))
    }

    fn generate(&self, block: &Block, ctx: &mut Context) {
        let content = sanitize_html(block.property_str_or("content", ""));
        ctx.raw_element("mj-raw", &[], &content);
    }
}

/// Countdown parameters from the first meaningful child, when it is a
/// `countdown:` comment.
fn leading_countdown_params(element: &MarkupElement) -> Option<Properties> {
    for child in &element.children {
        match child {
            MarkupNode::Text(text) if text.trim().is_empty() => continue,
            MarkupNode::Comment(comment) => {
                let payload = comment.trim().strip_prefix(COUNTDOWN_COMMENT_PREFIX)?;
                return match serde_json::from_str::<Value>(payload) {
                    Ok(Value::Object(params)) => Some(params),
                    _ => None,
                };
            }
            _ => return None,
        }
    }
    None
}
