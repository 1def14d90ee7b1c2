//! Sanitizer totality and validator defect collection.

use letterpress_parser::model::BlockType;
use letterpress_parser::{sanitize, validate};
use serde_json::json;

#[test]
fn test_sanitize_is_total_on_garbage_inputs() {
    for raw in [
        json!(null),
        json!("a string"),
        json!(42),
        json!([1, 2, 3]),
        json!({}),
        json!({ "sections": "not an array" }),
        json!({ "sections": [null, 17, "x"] }),
        json!({ "sections": [{ "columns": [{ "blocks": [null] }] }] }),
    ] {
        let template = sanitize(&raw);
        // Always a usable template with fully-populated defaults.
        assert!(!template.global_styles.font_family.is_empty());
        assert_eq!(template.head_metadata.title, "");
        for section in &template.sections {
            assert!(!section.columns.is_empty());
        }
    }
}

#[test]
fn test_sanitize_defaults_missing_fields() {
    let raw = json!({
        "sections": [{
            "id": "s1",
            "columns": [{ "id": "c1", "blocks": [] }],
        }],
        "globalStyles": { "width": 640 },
    });

    let template = sanitize(&raw);

    assert_eq!(template.sections.len(), 1);
    assert_eq!(template.sections[0].id, "s1");
    assert_eq!(template.sections[0].columns[0].width, "100%");
    assert_eq!(template.sections[0].properties.background_color, "transparent");
    assert_eq!(template.global_styles.width, 640);
    // Fields absent from globalStyles keep editor defaults.
    assert_eq!(template.global_styles.background_color, "#f7f7f7");
}

#[test]
fn test_sanitize_generates_ids_for_missing_ones() {
    let raw = json!({
        "sections": [{
            "columns": [{ "blocks": [{ "type": "text", "properties": {} }] }],
        }],
    });

    let template = sanitize(&raw);

    assert!(template.sections[0].id.starts_with("section-"));
    assert!(template.sections[0].columns[0].id.starts_with("column-"));
    assert!(template.sections[0].columns[0].blocks[0].id.starts_with("block-"));
}

#[test]
fn test_sanitize_drops_unknown_and_invalid_blocks() {
    let raw = json!({
        "sections": [{
            "id": "s1",
            "columns": [{
                "id": "c1",
                "blocks": [
                    { "id": "b1", "type": "text", "properties": {} },
                    { "id": "b2", "type": "teleporter", "properties": {} },
                    { "id": "b3" },
                    "not even an object",
                ],
            }],
        }],
    });

    let template = sanitize(&raw);

    let blocks = &template.sections[0].columns[0].blocks;
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].block_type, BlockType::Text);
}

#[test]
fn test_sanitized_blocks_carry_the_full_default_set() {
    let raw = json!({
        "sections": [{
            "id": "s1",
            "columns": [{
                "id": "c1",
                "blocks": [{
                    "id": "b1",
                    "type": "button",
                    "properties": { "text": "Buy" },
                }],
            }],
        }],
    });

    let template = sanitize(&raw);

    let block = &template.sections[0].columns[0].blocks[0];
    assert_eq!(block.property_str("text"), Some("Buy"));
    // Defaults fill everything the stored value omitted.
    assert_eq!(block.property_str("href"), Some("#"));
    assert!(block.properties.contains_key("backgroundColor"));
    assert!(block.properties.contains_key("borderRadius"));
}

#[test]
fn test_sanitize_ensures_at_least_one_column() {
    let raw = json!({ "sections": [{ "id": "s1", "columns": [] }] });

    let template = sanitize(&raw);

    assert_eq!(template.sections[0].columns.len(), 1);
    assert_eq!(template.sections[0].columns[0].width, "100%");
}

#[test]
fn test_validate_collects_all_defects_with_paths() {
    let raw = json!({
        "sections": [
            { "id": "", "columns": "nope" },
            {
                "id": "s2",
                "columns": [{
                    "id": "c1",
                    "blocks": [
                        { "id": "b1", "type": "teleporter", "properties": {} },
                        { "id": "b2", "type": "text", "properties": [] },
                    ],
                }],
            },
        ],
    });

    let report = validate(&raw);

    assert!(!report.valid);
    let joined = report.errors.join("\n");
    assert!(joined.contains("sections[0].id"), "errors: {}", joined);
    assert!(joined.contains("sections[0].columns"), "errors: {}", joined);
    assert!(
        joined.contains("sections[1].columns[0].blocks[0].type"),
        "errors: {}",
        joined
    );
    assert!(
        joined.contains("sections[1].columns[0].blocks[1].properties"),
        "errors: {}",
        joined
    );
}

#[test]
fn test_validate_accepts_well_formed_values() {
    let raw = json!({
        "sections": [{
            "id": "s1",
            "columns": [{
                "id": "c1",
                "blocks": [{ "id": "b1", "type": "text", "properties": {} }],
            }],
        }],
    });

    let report = validate(&raw);

    assert!(report.valid, "errors: {:?}", report.errors);
}

#[test]
fn test_validate_checks_registry_specific_property_shapes() {
    let raw = json!({
        "sections": [{
            "id": "s1",
            "columns": [{
                "id": "c1",
                "blocks": [{
                    "id": "b1",
                    "type": "social",
                    "properties": { "items": "not an array" },
                }],
            }],
        }],
    });

    let report = validate(&raw);

    assert!(!report.valid);
    assert!(report.errors.iter().any(|e| e.contains("items")));
}

#[test]
fn test_validate_missing_sections() {
    let report = validate(&json!({}));
    assert!(!report.valid);
    assert_eq!(report.errors, vec!["sections: missing"]);
}
