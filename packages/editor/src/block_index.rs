//! Structural index: block id → location.
//!
//! Derived, never authoritative. Rebuilt whole on every structural change —
//! a full rebuild is O(total blocks), which is fine at realistic document
//! sizes and keeps the index trivially consistent.

use letterpress_parser::model::{Block, Column, Section};
use letterpress_parser::visitor::{walk_column, walk_section, Visitor};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct BlockLocation {
    pub section_id: String,
    pub column_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct BlockIndex {
    entries: HashMap<String, BlockLocation>,
}

impl BlockIndex {
    /// Index every block reachable from `sections`. Malformed trees simply
    /// yield whatever entries are reachable.
    pub fn build(sections: &[Section]) -> Self {
        let mut builder = IndexBuilder {
            section_id: String::new(),
            column_id: String::new(),
            entries: HashMap::new(),
        };
        for section in sections {
            builder.visit_section(section);
        }
        Self {
            entries: builder.entries,
        }
    }

    pub fn get(&self, block_id: &str) -> Option<&BlockLocation> {
        self.entries.get(block_id)
    }

    pub fn contains(&self, block_id: &str) -> bool {
        self.entries.contains_key(block_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct IndexBuilder {
    section_id: String,
    column_id: String,
    entries: HashMap<String, BlockLocation>,
}

impl Visitor for IndexBuilder {
    fn visit_section(&mut self, section: &Section) {
        self.section_id = section.id.clone();
        walk_section(self, section);
    }

    fn visit_column(&mut self, column: &Column) {
        self.column_id = column.id.clone();
        walk_column(self, column);
    }

    fn visit_block(&mut self, block: &Block) {
        self.entries.insert(
            block.id.clone(),
            BlockLocation {
                section_id: self.section_id.clone(),
                column_id: self.column_id.clone(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use letterpress_parser::model::{BlockType, Properties, Template};
    use letterpress_parser::IdGenerator;

    fn sample() -> (Template, usize) {
        let mut ids = IdGenerator::new();
        let mut template = Template::new();
        let mut total = 0;
        for columns in [1, 3] {
            let mut section = Section::with_columns(&mut ids, columns);
            for column in &mut section.columns {
                for _ in 0..2 {
                    column.blocks.push(Block::new(
                        &mut ids,
                        BlockType::Text,
                        Properties::new(),
                    ));
                    total += 1;
                }
            }
            template.sections.push(section);
        }
        (template, total)
    }

    #[test]
    fn test_index_covers_every_reachable_block() {
        let (template, total) = sample();
        let index = BlockIndex::build(&template.sections);

        assert_eq!(index.len(), total);
        for section in &template.sections {
            for column in &section.columns {
                for block in &column.blocks {
                    let location = index.get(&block.id).expect("block indexed");
                    assert_eq!(location.section_id, section.id);
                    assert_eq!(location.column_id, column.id);
                }
            }
        }
    }

    #[test]
    fn test_empty_tree_yields_empty_index() {
        assert!(BlockIndex::build(&[]).is_empty());
    }
}
