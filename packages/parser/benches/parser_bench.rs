use criterion::{black_box, criterion_group, criterion_main, Criterion};
use letterpress_parser::model::{BlockType, Section, Template};
use letterpress_parser::{generate, parse, BlockRegistry, IdGenerator};

fn sample_source() -> String {
    let mut body = String::new();
    for i in 0..50 {
        body.push_str(&format!(
            r#"<mj-section><mj-column><mj-text>Block {}</mj-text></mj-column><mj-column><mj-button href="https://example.com/{}">Go</mj-button></mj-column></mj-section>"#,
            i, i
        ));
    }
    format!("<mjml><mj-head><mj-title>Bench</mj-title></mj-head><mj-body>{}</mj-body></mjml>", body)
}

fn sample_template() -> Template {
    let registry = BlockRegistry::new();
    let mut ids = IdGenerator::new();
    let mut template = Template::new();
    for _ in 0..50 {
        let mut section = Section::with_columns(&mut ids, 2);
        for column in &mut section.columns {
            column
                .blocks
                .push(registry.create_block(&BlockType::Text, &mut ids).unwrap());
        }
        template.sections.push(section);
    }
    template
}

fn bench_parse(c: &mut Criterion) {
    let source = sample_source();
    c.bench_function("parse_50_sections", |b| {
        b.iter(|| parse(black_box(&source)).unwrap())
    });
}

fn bench_generate(c: &mut Criterion) {
    let template = sample_template();
    c.bench_function("generate_50_sections", |b| {
        b.iter(|| generate(black_box(&template)))
    });
}

criterion_group!(benches, bench_parse, bench_generate);
criterion_main!(benches);
