//! Structural validation and defensive coercion of untrusted template values.
//!
//! `validate` reports every defect with a positional path and never gates
//! anything; `sanitize` is total and is the single landing point for data
//! from storage or import — downstream code only ever sees well-formed
//! templates.

use crate::id_generator::IdGenerator;
use crate::model::{
    Block, BlockType, Column, GlobalStyles, HeadMetadata, Section, SectionProperties, Template,
};
use crate::registry::BlockRegistry;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Validate with the built-in registry.
pub fn validate(raw: &Value) -> ValidationReport {
    validate_with(raw, &BlockRegistry::new())
}

/// Structurally check `raw` against the template shape, collecting *all*
/// violations instead of short-circuiting. Never mutates.
pub fn validate_with(raw: &Value, registry: &BlockRegistry) -> ValidationReport {
    let mut errors = Vec::new();

    match raw.get("sections") {
        Some(Value::Array(sections)) => {
            for (i, section) in sections.iter().enumerate() {
                validate_section(section, i, registry, &mut errors);
            }
        }
        Some(_) => errors.push("sections: expected an array".to_string()),
        None => errors.push("sections: missing".to_string()),
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

fn validate_section(section: &Value, i: usize, registry: &BlockRegistry, errors: &mut Vec<String>) {
    let path = format!("sections[{}]", i);
    let Some(obj) = section.as_object() else {
        errors.push(format!("{}: expected an object", path));
        return;
    };

    if !is_nonempty_string(obj.get("id")) {
        errors.push(format!("{}.id: expected a non-empty string", path));
    }

    match obj.get("columns") {
        Some(Value::Array(columns)) => {
            for (j, column) in columns.iter().enumerate() {
                validate_column(column, &path, j, registry, errors);
            }
        }
        Some(_) => errors.push(format!("{}.columns: expected an array", path)),
        None => errors.push(format!("{}.columns: missing", path)),
    }
}

fn validate_column(
    column: &Value,
    section_path: &str,
    j: usize,
    registry: &BlockRegistry,
    errors: &mut Vec<String>,
) {
    let path = format!("{}.columns[{}]", section_path, j);
    let Some(obj) = column.as_object() else {
        errors.push(format!("{}: expected an object", path));
        return;
    };

    if !is_nonempty_string(obj.get("id")) {
        errors.push(format!("{}.id: expected a non-empty string", path));
    }

    match obj.get("blocks") {
        Some(Value::Array(blocks)) => {
            for (k, block) in blocks.iter().enumerate() {
                validate_block(block, &path, k, registry, errors);
            }
        }
        Some(_) => errors.push(format!("{}.blocks: expected an array", path)),
        None => errors.push(format!("{}.blocks: missing", path)),
    }
}

fn validate_block(
    block: &Value,
    column_path: &str,
    k: usize,
    registry: &BlockRegistry,
    errors: &mut Vec<String>,
) {
    let path = format!("{}.blocks[{}]", column_path, k);
    let Some(obj) = block.as_object() else {
        errors.push(format!("{}: expected an object", path));
        return;
    };

    if !is_nonempty_string(obj.get("id")) {
        errors.push(format!("{}.id: expected a non-empty string", path));
    }

    let mut known_type = None;
    match obj.get("type") {
        Some(Value::String(name)) => {
            let block_type = BlockType::from_name(name);
            if registry.is_known_type(&block_type) {
                known_type = Some(block_type);
            } else {
                errors.push(format!("{}.type: unknown block type {:?}", path, name));
            }
        }
        Some(_) => errors.push(format!("{}.type: expected a string", path)),
        None => errors.push(format!("{}.type: missing", path)),
    }

    match obj.get("properties") {
        Some(Value::Object(properties)) => {
            if let Some(handler) =
                known_type.and_then(|block_type| registry.handler_for_type(&block_type))
            {
                handler.validate_properties(properties, &path, errors);
            }
        }
        Some(_) => errors.push(format!("{}.properties: expected an object", path)),
        None => errors.push(format!("{}.properties: missing", path)),
    }
}

fn is_nonempty_string(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .map(|s| !s.is_empty())
        .unwrap_or(false)
}

/// Sanitize with the built-in registry.
pub fn sanitize(raw: &Value) -> Template {
    sanitize_with(raw, &BlockRegistry::new())
}

/// Coerce any value into a guaranteed-valid template. Missing or wrong-typed
/// fields take defaults; blocks with unknown types are dropped (their
/// property shape is type-dependent and cannot be guessed).
pub fn sanitize_with(raw: &Value, registry: &BlockRegistry) -> Template {
    let Some(obj) = raw.as_object() else {
        return Template::new();
    };

    let mut ids = IdGenerator::new();
    let mut template = Template::new();
    template.global_styles = sanitize_global_styles(obj.get("globalStyles"));
    template.head_metadata = sanitize_head_metadata(obj.get("headMetadata"));

    if let Some(Value::Array(sections)) = obj.get("sections") {
        for raw_section in sections {
            if let Some(section) = sanitize_section(raw_section, registry, &mut ids) {
                template.sections.push(section);
            }
        }
    }

    template
}

fn sanitize_global_styles(raw: Option<&Value>) -> GlobalStyles {
    let mut styles = GlobalStyles::default();
    if let Some(Value::Object(obj)) = raw {
        if let Some(v) = obj.get("backgroundColor").and_then(Value::as_str) {
            styles.background_color = v.to_string();
        }
        if let Some(v) = obj.get("width").and_then(Value::as_u64) {
            styles.width = v as u32;
        }
        if let Some(v) = obj.get("fontFamily").and_then(Value::as_str) {
            styles.font_family = v.to_string();
        }
    }
    styles
}

fn sanitize_head_metadata(raw: Option<&Value>) -> HeadMetadata {
    let mut metadata = HeadMetadata::default();
    if let Some(Value::Object(obj)) = raw {
        if let Some(v) = obj.get("title").and_then(Value::as_str) {
            metadata.title = v.to_string();
        }
        if let Some(v) = obj.get("previewText").and_then(Value::as_str) {
            metadata.preview_text = v.to_string();
        }
        if let Some(Value::Array(styles)) = obj.get("headStyles") {
            metadata.head_styles = styles
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
        }
    }
    metadata
}

fn sanitize_section(
    raw: &Value,
    registry: &BlockRegistry,
    ids: &mut IdGenerator,
) -> Option<Section> {
    let obj = raw.as_object()?;

    let id = match obj.get("id").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => ids.next_section_id(),
    };
    let properties = sanitize_section_properties(obj.get("properties"));

    let mut columns = Vec::new();
    if let Some(Value::Array(raw_columns)) = obj.get("columns") {
        for raw_column in raw_columns {
            if let Some(column) = sanitize_column(raw_column, registry, ids) {
                columns.push(column);
            }
        }
    }
    // A section never carries zero columns.
    if columns.is_empty() {
        columns.push(Column::new(ids, "100%"));
    }

    Some(Section {
        id,
        columns,
        properties,
    })
}

fn sanitize_section_properties(raw: Option<&Value>) -> SectionProperties {
    let mut properties = SectionProperties::default();
    if let Some(Value::Object(obj)) = raw {
        if let Some(v) = obj.get("backgroundColor").and_then(Value::as_str) {
            properties.background_color = v.to_string();
        }
        if let Some(v) = obj.get("backgroundUrl").and_then(Value::as_str) {
            properties.background_url = v.to_string();
        }
        if let Some(v) = obj.get("backgroundSize").and_then(Value::as_str) {
            properties.background_size = v.to_string();
        }
        if let Some(v) = obj.get("backgroundRepeat").and_then(Value::as_str) {
            properties.background_repeat = v.to_string();
        }
        if let Some(v) = obj.get("padding").and_then(Value::as_str) {
            properties.padding = v.to_string();
        }
        if let Some(v) = obj.get("borderRadius").and_then(Value::as_str) {
            properties.border_radius = v.to_string();
        }
        if let Some(v) = obj.get("fullWidth").and_then(Value::as_bool) {
            properties.full_width = v;
        }
    }
    properties
}

fn sanitize_column(raw: &Value, registry: &BlockRegistry, ids: &mut IdGenerator) -> Option<Column> {
    let obj = raw.as_object()?;

    let id = match obj.get("id").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => ids.next_column_id(),
    };
    let width = obj
        .get("width")
        .and_then(Value::as_str)
        .filter(|w| !w.is_empty())
        .unwrap_or("100%")
        .to_string();

    let mut blocks = Vec::new();
    if let Some(Value::Array(raw_blocks)) = obj.get("blocks") {
        for raw_block in raw_blocks {
            if let Some(block) = sanitize_block(raw_block, registry, ids) {
                blocks.push(block);
            }
        }
    }

    Some(Column { id, width, blocks })
}

fn sanitize_block(raw: &Value, registry: &BlockRegistry, ids: &mut IdGenerator) -> Option<Block> {
    let obj = raw.as_object()?;
    let type_name = obj.get("type").and_then(Value::as_str)?;
    let block_type = BlockType::from_name(type_name);
    let handler = registry.handler_for_type(&block_type)?;

    let id = match obj.get("id").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => ids.next_block_id(),
    };

    // Stored properties merge onto the full default set so every block always
    // carries every property its type defines.
    let mut properties = handler.default_properties();
    if let Some(Value::Object(raw_properties)) = obj.get("properties") {
        for (key, value) in raw_properties {
            properties.insert(key.clone(), value.clone());
        }
    }

    Some(Block {
        id,
        block_type,
        properties,
    })
}
