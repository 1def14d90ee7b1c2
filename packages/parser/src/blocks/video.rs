use crate::defaults::dialect_default;
use crate::escape::safe_url;
use crate::id_generator::IdGenerator;
use crate::markup::MarkupElement;
use crate::model::{Block, BlockType, Properties};
use crate::registry::{object_props, BlockHandler};
use crate::serializer::Context;
use serde_json::json;

use super::image::VIDEO_MARKER_CLASS;

/// Video teaser. Email clients cannot embed playback, so generation emits the
/// thumbnail as an image linking to the video, tagged with a marker class the
/// image handler recognizes on the way back in.
pub struct VideoHandler;

impl BlockHandler for VideoHandler {
    fn block_type(&self) -> BlockType {
        BlockType::Video
    }

    fn tag(&self) -> &'static str {
        "mj-video"
    }

    fn default_properties(&self) -> Properties {
        object_props(json!({
            "src": "",
            "thumbnail": "",
            "width": "",
            "align": "center",
            "padding": "10px 25px",
        }))
    }

    fn parse(&self, element: &MarkupElement, ids: &mut IdGenerator) -> Option<Block> {
        let props = object_props(json!({
            "src": element.attr_or("src", ""),
            "thumbnail": element.attr_or("thumbnail", ""),
            "width": element.attr_or("width", ""),
            "align": element.attr_or("align", dialect_default("mj-image", "align")),
            "padding": element.attr_or("padding", dialect_default("mj-image", "padding")),
        }));
        Some(Block::new(ids, BlockType::Video, props))
    }

    fn generate(&self, block: &Block, ctx: &mut Context) {
        ctx.self_close(
            "mj-image",
            &[
                ("src", safe_url(block.property_str_or("thumbnail", ""))),
                ("href", safe_url(block.property_str_or("src", ""))),
                ("css-class", VIDEO_MARKER_CLASS),
                ("width", block.property_str_or("width", "")),
                ("align", block.property_str_or("align", "")),
                ("padding", block.property_str_or("padding", "")),
            ],
        );
    }
}
