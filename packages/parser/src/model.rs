use crate::id_generator::IdGenerator;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Block properties are an open JSON map whose shape depends on the block
/// type. Patches shallow-merge onto the existing map, they never replace it.
pub type Properties = serde_json::Map<String, Value>;

/// Root document value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub sections: Vec<Section>,
    pub global_styles: GlobalStyles,
    #[serde(default)]
    pub head_metadata: HeadMetadata,
}

/// A horizontal band of the email, holding one or more columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub columns: Vec<Column>,
    pub properties: SectionProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionProperties {
    pub background_color: String,
    pub background_url: String,
    pub background_size: String,
    pub background_repeat: String,
    pub padding: String,
    pub border_radius: String,
    pub full_width: bool,
}

/// Merge-style patch for section properties; absent fields stay untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPatch {
    pub background_color: Option<String>,
    pub background_url: Option<String>,
    pub background_size: Option<String>,
    pub background_repeat: Option<String>,
    pub padding: Option<String>,
    pub border_radius: Option<String>,
    pub full_width: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub width: String,
    pub blocks: Vec<Block>,
}

/// Atomic content unit. `properties` always carries the full default set for
/// the block's type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub properties: Properties,
}

/// The built-in block types plus registry-registered extensions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Text,
    Button,
    Image,
    Divider,
    Spacer,
    Social,
    Html,
    Video,
    Heading,
    Countdown,
    Menu,
    Hero,
    #[serde(untagged)]
    Custom(String),
}

impl BlockType {
    pub fn name(&self) -> &str {
        match self {
            BlockType::Text => "text",
            BlockType::Button => "button",
            BlockType::Image => "image",
            BlockType::Divider => "divider",
            BlockType::Spacer => "spacer",
            BlockType::Social => "social",
            BlockType::Html => "html",
            BlockType::Video => "video",
            BlockType::Heading => "heading",
            BlockType::Countdown => "countdown",
            BlockType::Menu => "menu",
            BlockType::Hero => "hero",
            BlockType::Custom(name) => name,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "text" => BlockType::Text,
            "button" => BlockType::Button,
            "image" => BlockType::Image,
            "divider" => BlockType::Divider,
            "spacer" => BlockType::Spacer,
            "social" => BlockType::Social,
            "html" => BlockType::Html,
            "video" => BlockType::Video,
            "heading" => BlockType::Heading,
            "countdown" => BlockType::Countdown,
            "menu" => BlockType::Menu,
            "hero" => BlockType::Hero,
            other => BlockType::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Document-wide presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStyles {
    pub background_color: String,
    /// Content width in pixels.
    pub width: u32,
    pub font_family: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStylesPatch {
    pub background_color: Option<String>,
    pub width: Option<u32>,
    pub font_family: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadMetadata {
    pub title: String,
    pub preview_text: String,
    /// Raw CSS strings, in author order.
    pub head_styles: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadMetadataPatch {
    pub title: Option<String>,
    pub preview_text: Option<String>,
    pub head_styles: Option<Vec<String>>,
}

impl Template {
    /// New empty template with the editor's default styling.
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
            global_styles: GlobalStyles::default(),
            head_metadata: HeadMetadata::default(),
        }
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for GlobalStyles {
    fn default() -> Self {
        Self {
            background_color: "#f7f7f7".to_string(),
            width: 600,
            font_family: "Arial, Helvetica, sans-serif".to_string(),
        }
    }
}

impl Default for SectionProperties {
    fn default() -> Self {
        Self {
            background_color: "transparent".to_string(),
            background_url: String::new(),
            background_size: "auto".to_string(),
            background_repeat: "repeat".to_string(),
            padding: "20px 0".to_string(),
            border_radius: "0".to_string(),
            full_width: false,
        }
    }
}

impl SectionProperties {
    pub fn apply(&mut self, patch: &SectionPatch) {
        if let Some(v) = &patch.background_color {
            self.background_color = v.clone();
        }
        if let Some(v) = &patch.background_url {
            self.background_url = v.clone();
        }
        if let Some(v) = &patch.background_size {
            self.background_size = v.clone();
        }
        if let Some(v) = &patch.background_repeat {
            self.background_repeat = v.clone();
        }
        if let Some(v) = &patch.padding {
            self.padding = v.clone();
        }
        if let Some(v) = &patch.border_radius {
            self.border_radius = v.clone();
        }
        if let Some(v) = patch.full_width {
            self.full_width = v;
        }
    }
}

impl GlobalStyles {
    pub fn apply(&mut self, patch: &GlobalStylesPatch) {
        if let Some(v) = &patch.background_color {
            self.background_color = v.clone();
        }
        if let Some(v) = patch.width {
            self.width = v;
        }
        if let Some(v) = &patch.font_family {
            self.font_family = v.clone();
        }
    }
}

impl HeadMetadata {
    pub fn apply(&mut self, patch: &HeadMetadataPatch) {
        if let Some(v) = &patch.title {
            self.title = v.clone();
        }
        if let Some(v) = &patch.preview_text {
            self.preview_text = v.clone();
        }
        if let Some(v) = &patch.head_styles {
            self.head_styles = v.clone();
        }
    }
}

impl Section {
    /// New section with a single full-width column.
    pub fn new(ids: &mut IdGenerator) -> Self {
        Self {
            id: ids.next_section_id(),
            columns: vec![Column::new(ids, "100%")],
            properties: SectionProperties::default(),
        }
    }

    /// New section with `count` evenly-split columns (at least one).
    pub fn with_columns(ids: &mut IdGenerator, count: usize) -> Self {
        let count = count.max(1);
        let width = even_column_width(count);
        Self {
            id: ids.next_section_id(),
            columns: (0..count).map(|_| Column::new(ids, width.clone())).collect(),
            properties: SectionProperties::default(),
        }
    }

    /// Deep copy with fresh ids at every level.
    pub fn duplicate(&self, ids: &mut IdGenerator) -> Section {
        let mut copy = self.clone();
        crate::visitor::regenerate_ids_section(&mut copy, ids);
        copy
    }
}

impl Column {
    pub fn new(ids: &mut IdGenerator, width: impl Into<String>) -> Self {
        Self {
            id: ids.next_column_id(),
            width: width.into(),
            blocks: Vec::new(),
        }
    }
}

impl Block {
    pub fn new(ids: &mut IdGenerator, block_type: BlockType, properties: Properties) -> Self {
        Self {
            id: ids.next_block_id(),
            block_type,
            properties,
        }
    }

    /// Deep copy with a fresh id.
    pub fn duplicate(&self, ids: &mut IdGenerator) -> Block {
        let mut copy = self.clone();
        copy.id = ids.next_block_id();
        copy
    }

    /// Shallow-merge `patch` onto the existing properties; later keys win.
    pub fn merge_properties(&mut self, patch: &Properties) {
        for (key, value) in patch {
            self.properties.insert(key.clone(), value.clone());
        }
    }

    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }

    pub fn property_str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.property_str(key).unwrap_or(default)
    }
}

/// Even split of 100% across `count` columns, rounded to 2 decimal places
/// with trailing zeros trimmed ("33.33%", "50%").
pub fn even_column_width(count: usize) -> String {
    let count = count.max(1);
    let width = (10000.0 / count as f64).round() / 100.0;
    if width.fract() == 0.0 {
        format!("{}%", width as u32)
    } else {
        format!("{}%", width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_column_width() {
        assert_eq!(even_column_width(1), "100%");
        assert_eq!(even_column_width(2), "50%");
        assert_eq!(even_column_width(3), "33.33%");
        assert_eq!(even_column_width(4), "25%");
        assert_eq!(even_column_width(6), "16.67%");
    }

    #[test]
    fn test_new_section_always_has_a_column() {
        let mut ids = IdGenerator::new();
        assert_eq!(Section::new(&mut ids).columns.len(), 1);
        assert_eq!(Section::with_columns(&mut ids, 0).columns.len(), 1);
        assert_eq!(Section::with_columns(&mut ids, 3).columns.len(), 3);
    }

    #[test]
    fn test_merge_properties_is_shallow_and_additive() {
        let mut ids = IdGenerator::new();
        let mut props = Properties::new();
        props.insert("color".into(), Value::String("#000".into()));
        props.insert("fontSize".into(), Value::String("14px".into()));
        let mut block = Block::new(&mut ids, BlockType::Text, props);

        let mut patch = Properties::new();
        patch.insert("color".into(), Value::String("#fff".into()));
        block.merge_properties(&patch);

        assert_eq!(block.property_str("color"), Some("#fff"));
        assert_eq!(block.property_str("fontSize"), Some("14px"));
    }

    #[test]
    fn test_duplicate_section_regenerates_every_id() {
        let mut ids = IdGenerator::new();
        let mut section = Section::with_columns(&mut ids, 2);
        section.columns[0]
            .blocks
            .push(Block::new(&mut ids, BlockType::Text, Properties::new()));

        let copy = section.duplicate(&mut ids);

        assert_ne!(copy.id, section.id);
        assert_ne!(copy.columns[0].id, section.columns[0].id);
        assert_ne!(copy.columns[0].blocks[0].id, section.columns[0].blocks[0].id);
        assert_eq!(copy.columns.len(), section.columns.len());
    }

    #[test]
    fn test_block_type_round_trips_through_names() {
        assert_eq!(BlockType::from_name("text"), BlockType::Text);
        assert_eq!(BlockType::from_name("hero"), BlockType::Hero);
        assert_eq!(
            BlockType::from_name("promo"),
            BlockType::Custom("promo".to_string())
        );
        assert_eq!(BlockType::Custom("promo".to_string()).name(), "promo");
    }
}
