//! Round-trip stability: for factory-built templates, parse(generate(t))
//! reproduces the section/column/block count and type sequence. Property
//! values may legitimately differ where dialect defaults differ from editor
//! defaults.

use letterpress_parser::model::{BlockType, Section, Template};
use letterpress_parser::{generate, parse, BlockRegistry, IdGenerator};

fn type_shape(template: &Template) -> Vec<Vec<Vec<BlockType>>> {
    template
        .sections
        .iter()
        .map(|section| {
            section
                .columns
                .iter()
                .map(|column| {
                    column
                        .blocks
                        .iter()
                        .map(|block| block.block_type.clone())
                        .collect()
                })
                .collect()
        })
        .collect()
}

#[test]
fn test_every_builtin_block_type_survives_a_round_trip() {
    let registry = BlockRegistry::new();
    let mut ids = IdGenerator::new();
    let mut template = Template::new();

    // One section per non-hero type, each with a single default block.
    for block_type in [
        BlockType::Text,
        BlockType::Heading,
        BlockType::Button,
        BlockType::Image,
        BlockType::Divider,
        BlockType::Spacer,
        BlockType::Social,
        BlockType::Html,
        BlockType::Video,
        BlockType::Countdown,
        BlockType::Menu,
    ] {
        let mut section = Section::new(&mut ids);
        let block = registry.create_block(&block_type, &mut ids).unwrap();
        section.columns[0].blocks.push(block);
        template.sections.push(section);
    }
    // And a hero, which takes the native-element path.
    let mut hero_section = Section::new(&mut ids);
    hero_section.columns[0]
        .blocks
        .push(registry.create_block(&BlockType::Hero, &mut ids).unwrap());
    template.sections.push(hero_section);

    let reparsed = parse(&generate(&template)).unwrap();

    assert_eq!(type_shape(&reparsed), type_shape(&template));
}

#[test]
fn test_multi_column_layout_survives_a_round_trip() {
    let registry = BlockRegistry::new();
    let mut ids = IdGenerator::new();
    let mut template = Template::new();

    let mut section = Section::with_columns(&mut ids, 3);
    for column in &mut section.columns {
        column
            .blocks
            .push(registry.create_block(&BlockType::Text, &mut ids).unwrap());
        column
            .blocks
            .push(registry.create_block(&BlockType::Button, &mut ids).unwrap());
    }
    template.sections.push(section);

    let reparsed = parse(&generate(&template)).unwrap();

    assert_eq!(type_shape(&reparsed), type_shape(&template));
    let widths: Vec<&str> = reparsed.sections[0]
        .columns
        .iter()
        .map(|c| c.width.as_str())
        .collect();
    assert_eq!(widths, vec!["33.33%", "33.33%", "33.33%"]);
}

#[test]
fn test_global_styles_survive_a_round_trip() {
    let mut ids = IdGenerator::new();
    let mut template = Template::new();
    template.global_styles.background_color = "#123456".to_string();
    template.global_styles.width = 720;
    template.global_styles.font_family = "Lato, sans-serif".to_string();
    template.head_metadata.title = "Title".to_string();
    template.head_metadata.preview_text = "Preview".to_string();
    template.head_metadata.head_styles.push(".a { color: red; }".to_string());
    template.sections.push(Section::new(&mut ids));

    let reparsed = parse(&generate(&template)).unwrap();

    assert_eq!(reparsed.global_styles, template.global_styles);
    assert_eq!(reparsed.head_metadata.title, "Title");
    assert_eq!(reparsed.head_metadata.preview_text, "Preview");
    // The generated reset style is read back alongside the custom one.
    assert!(reparsed
        .head_metadata
        .head_styles
        .contains(&".a { color: red; }".to_string()));
}

#[test]
fn test_countdown_parameters_survive_a_round_trip() {
    let registry = BlockRegistry::new();
    let mut ids = IdGenerator::new();
    let mut template = Template::new();
    let mut section = Section::new(&mut ids);
    let mut block = registry
        .create_block(&BlockType::Countdown, &mut ids)
        .unwrap();
    block.properties.insert(
        "targetDate".to_string(),
        serde_json::Value::String("2031-12-25T00:00:00Z".to_string()),
    );
    section.columns[0].blocks.push(block);
    template.sections.push(section);

    let reparsed = parse(&generate(&template)).unwrap();

    let block = &reparsed.sections[0].columns[0].blocks[0];
    assert_eq!(block.block_type, BlockType::Countdown);
    assert_eq!(block.property_str("targetDate"), Some("2031-12-25T00:00:00Z"));
}

#[test]
fn test_hero_block_fields_survive_a_round_trip() {
    let registry = BlockRegistry::new();
    let mut ids = IdGenerator::new();
    let mut template = Template::new();
    let mut section = Section::new(&mut ids);
    let mut block = registry.create_block(&BlockType::Hero, &mut ids).unwrap();
    for (key, value) in [
        ("heading", "Big news"),
        ("subtext", "The details."),
        ("buttonText", "Read"),
        ("buttonHref", "https://x.example"),
        ("backgroundColor", "#272626"),
    ] {
        block.properties.insert(
            key.to_string(),
            serde_json::Value::String(value.to_string()),
        );
    }
    section.columns[0].blocks.push(block);
    template.sections.push(section);

    let reparsed = parse(&generate(&template)).unwrap();

    let block = &reparsed.sections[0].columns[0].blocks[0];
    assert_eq!(block.block_type, BlockType::Hero);
    assert_eq!(block.property_str("heading"), Some("Big news"));
    assert_eq!(block.property_str("subtext"), Some("The details."));
    assert_eq!(block.property_str("buttonText"), Some("Read"));
    assert_eq!(block.property_str("buttonHref"), Some("https://x.example"));
    assert_eq!(block.property_str("backgroundColor"), Some("#272626"));
}
