//! # Letterpress Parser
//!
//! Document model and markup transcoder for the Letterpress email builder.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ preprocess: entity + void-element fixups    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ tokenizer + markup: text → element tree     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ parser: element tree → Template             │
//! │ serializer: Template → markup text          │
//! │  (both dispatch through the block registry) │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! `sanitize` is the landing point for untrusted stored/imported values; the
//! parser is the landing point for untrusted markup text. Everything past
//! those two only ever observes well-formed templates.

pub mod blocks;
pub mod defaults;
pub mod error;
pub mod escape;
pub mod html_sanitizer;
pub mod id_generator;
pub mod markup;
pub mod model;
pub mod parser;
pub mod preprocess;
pub mod registry;
pub mod rich_text;
pub mod sanitize;
pub mod serializer;
pub mod tokenizer;
pub mod visitor;

pub use error::{ParseError, ParseResult};
pub use id_generator::IdGenerator;
pub use model::{
    even_column_width, Block, BlockType, Column, GlobalStyles, GlobalStylesPatch, HeadMetadata,
    HeadMetadataPatch, Properties, Section, SectionPatch, SectionProperties, Template,
};
pub use parser::{parse, parse_with};
pub use registry::{BlockHandler, BlockRegistry};
pub use sanitize::{sanitize, sanitize_with, validate, validate_with, ValidationReport};
pub use serializer::{generate, generate_with, Context, GenerateOptions};
pub use visitor::{Visitor, VisitorMut};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_document() {
        let template = parse("<mjml><mj-body></mj-body></mjml>").unwrap();
        assert!(template.sections.is_empty());
    }
}
