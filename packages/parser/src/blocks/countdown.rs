use crate::id_generator::IdGenerator;
use crate::markup::MarkupElement;
use crate::model::{Block, BlockType, Properties};
use crate::registry::{object_props, BlockHandler};
use crate::serializer::Context;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

/// Comment prefix carrying the countdown's live parameters through generated
/// markup. The digits below it are a frozen rendering; the comment is the
/// source of truth on re-parse.
pub(crate) const COUNTDOWN_COMMENT_PREFIX: &str = "countdown:";

pub(crate) fn editor_defaults() -> Properties {
    object_props(json!({
        "targetDate": "",
        "digitColor": "#000000",
        "labelColor": "#555555",
        "fontSize": "32px",
        "align": "center",
        "padding": "10px 25px",
        "labels": {
            "days": "Days",
            "hours": "Hours",
            "minutes": "Minutes",
            "seconds": "Seconds",
        },
    }))
}

/// Countdown timer. Generation bakes the remaining time into static digits —
/// email clients run no code — and re-embeds the parameters as a JSON comment
/// so a later parse recovers the live configuration, not the frozen digits.
pub struct CountdownHandler;

impl BlockHandler for CountdownHandler {
    fn block_type(&self) -> BlockType {
        BlockType::Countdown
    }

    fn tag(&self) -> &'static str {
        "mj-countdown"
    }

    fn default_properties(&self) -> Properties {
        editor_defaults()
    }

    fn parse(&self, element: &MarkupElement, ids: &mut IdGenerator) -> Option<Block> {
        let mut props = editor_defaults();
        for (key, attr) in [
            ("targetDate", "target-date"),
            ("digitColor", "digit-color"),
            ("labelColor", "label-color"),
            ("fontSize", "font-size"),
            ("align", "align"),
            ("padding", "padding"),
        ] {
            if let Some(value) = element.attr(attr) {
                props.insert(key.to_string(), Value::String(value.to_string()));
            }
        }
        Some(Block::new(ids, BlockType::Countdown, props))
    }

    fn generate(&self, block: &Block, ctx: &mut Context) {
        let params = Value::Object(block.properties.clone()).to_string();
        // "--" may not appear inside a comment; hide it behind a JSON escape.
        let params = params.replace("--", "-\\u002d");

        let (days, hours, minutes, seconds) = remaining(block.property_str("targetDate"), ctx.now);
        let digit_style = format!(
            "font-size:{};color:{};padding:0 10px;",
            block.property_str_or("fontSize", "32px"),
            block.property_str_or("digitColor", "#000000"),
        );
        let label_style = format!(
            "font-size:13px;color:{};text-transform:uppercase;",
            block.property_str_or("labelColor", "#555555"),
        );

        ctx.open("mj-raw", &[]);
        ctx.add_line(&format!("<!--{}{}-->", COUNTDOWN_COMMENT_PREFIX, params));
        ctx.open(
            "table",
            &[
                ("role", "presentation"),
                ("align", block.property_str_or("align", "center")),
                ("style", "border-collapse:collapse;margin:0 auto;text-align:center;"),
            ],
        );
        ctx.open("tr", &[]);
        for value in [days, hours, minutes, seconds] {
            ctx.add_line(&format!(
                "<td style=\"{}\">{:02}</td>",
                digit_style, value
            ));
        }
        ctx.close("tr");
        ctx.open("tr", &[]);
        for unit in ["days", "hours", "minutes", "seconds"] {
            ctx.add_line(&format!(
                "<td style=\"{}\">{}</td>",
                label_style,
                label_for(&block.properties, unit)
            ));
        }
        ctx.close("tr");
        ctx.close("table");
        ctx.close("mj-raw");
    }
}

/// Remaining (days, hours, minutes, seconds) to the target, clamped at zero.
/// Missing or unparseable targets count down from zero.
fn remaining(target: Option<&str>, now: DateTime<Utc>) -> (i64, i64, i64, i64) {
    let total_seconds = target
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|date| (date.with_timezone(&Utc) - now).num_seconds())
        .unwrap_or(0)
        .max(0);
    (
        total_seconds / 86_400,
        total_seconds % 86_400 / 3_600,
        total_seconds % 3_600 / 60,
        total_seconds % 60,
    )
}

fn label_for<'a>(properties: &'a Properties, unit: &str) -> &'a str {
    properties
        .get("labels")
        .and_then(Value::as_object)
        .and_then(|labels| labels.get(unit))
        .and_then(Value::as_str)
        .unwrap_or_else(|| match unit {
            "days" => "Days",
            "hours" => "Hours",
            "minutes" => "Minutes",
            _ => "Seconds",
        })
}
