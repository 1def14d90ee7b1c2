use crate::defaults::dialect_default;
use crate::escape::safe_url;
use crate::id_generator::IdGenerator;
use crate::markup::MarkupElement;
use crate::model::{Block, BlockType, Properties};
use crate::registry::{object_props, BlockHandler};
use crate::serializer::Context;
use serde_json::json;

/// Marker class distinguishing a generated video thumbnail from a plain
/// image, so the parser can restore the video block.
pub(crate) const VIDEO_MARKER_CLASS: &str = "video-thumbnail";

pub struct ImageHandler;

impl BlockHandler for ImageHandler {
    fn block_type(&self) -> BlockType {
        BlockType::Image
    }

    fn tag(&self) -> &'static str {
        "mj-image"
    }

    fn default_properties(&self) -> Properties {
        object_props(json!({
            "src": "",
            "alt": "",
            "href": "",
            "width": "",
            "align": "center",
            "padding": "10px 25px",
        }))
    }

    fn parse(&self, element: &MarkupElement, ids: &mut IdGenerator) -> Option<Block> {
        let css_class = element.attr_or("css-class", "");
        if css_class
            .split_whitespace()
            .any(|class| class == VIDEO_MARKER_CLASS)
        {
            // Emitted by the video handler: src is the thumbnail, href the
            // video itself.
            let props = object_props(json!({
                "src": element.attr_or("href", ""),
                "thumbnail": element.attr_or("src", ""),
                "width": element.attr_or("width", ""),
                "align": element.attr_or("align", dialect_default("mj-image", "align")),
                "padding": element.attr_or("padding", dialect_default("mj-image", "padding")),
            }));
            return Some(Block::new(ids, BlockType::Video, props));
        }

        let props = object_props(json!({
            "src": element.attr_or("src", ""),
            "alt": element.attr_or("alt", ""),
            "href": element.attr_or("href", ""),
            "width": element.attr_or("width", ""),
            "align": element.attr_or("align", dialect_default("mj-image", "align")),
            "padding": element.attr_or("padding", dialect_default("mj-image", "padding")),
        }));
        Some(Block::new(ids, BlockType::Image, props))
    }

    fn generate(&self, block: &Block, ctx: &mut Context) {
        ctx.self_close(
            "mj-image",
            &[
                ("src", safe_url(block.property_str_or("src", ""))),
                ("alt", block.property_str_or("alt", "")),
                ("href", safe_url(block.property_str_or("href", ""))),
                ("width", block.property_str_or("width", "")),
                ("align", block.property_str_or("align", "")),
                ("padding", block.property_str_or("padding", "")),
            ],
        );
    }
}
