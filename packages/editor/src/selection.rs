//! Selection repair after structural changes and undo/redo.
//!
//! The UI layer never has to null-check its selection against the tree: any
//! reference this module lets through resolves.

use crate::block_index::BlockIndex;
use crate::state::Selection;
use letterpress_parser::Template;

/// Re-validate a selection against the tree.
///
/// A selected block that vanished clears the selection entirely; one that
/// moved keeps its id and gets its section/column silently corrected. A
/// selected section that vanished clears the selection.
pub fn repair_selection(
    selection: &Selection,
    template: &Template,
    index: &BlockIndex,
) -> Selection {
    if let Some(block_id) = &selection.block_id {
        return match index.get(block_id) {
            Some(location) => Selection::block(
                location.section_id.clone(),
                location.column_id.clone(),
                block_id.clone(),
            ),
            None => Selection::none(),
        };
    }

    if let Some(section_id) = &selection.section_id {
        let exists = template.sections.iter().any(|s| &s.id == section_id);
        return if exists {
            selection.clone()
        } else {
            Selection::none()
        };
    }

    Selection::none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use letterpress_parser::model::{Block, BlockType, Properties, Section};
    use letterpress_parser::IdGenerator;

    fn template_with_block() -> (Template, String, String, String) {
        let mut ids = IdGenerator::new();
        let mut template = Template::new();
        let mut section = Section::new(&mut ids);
        let block = Block::new(&mut ids, BlockType::Text, Properties::new());
        let ids3 = (
            section.id.clone(),
            section.columns[0].id.clone(),
            block.id.clone(),
        );
        section.columns[0].blocks.push(block);
        template.sections.push(section);
        (template, ids3.0, ids3.1, ids3.2)
    }

    #[test]
    fn test_vanished_block_clears_selection() {
        let (template, section_id, column_id, _) = template_with_block();
        let index = BlockIndex::build(&template.sections);
        let selection = Selection::block(section_id, column_id, "block-gone".to_string());

        assert_eq!(repair_selection(&selection, &template, &index), Selection::none());
    }

    #[test]
    fn test_moved_block_gets_corrected_location() {
        let (template, section_id, column_id, block_id) = template_with_block();
        let index = BlockIndex::build(&template.sections);
        // Selection claims a stale location; the block id anchors the repair.
        let selection = Selection::block("stale".to_string(), "stale".to_string(), block_id.clone());

        let repaired = repair_selection(&selection, &template, &index);

        assert_eq!(repaired.section_id.as_deref(), Some(section_id.as_str()));
        assert_eq!(repaired.column_id.as_deref(), Some(column_id.as_str()));
        assert_eq!(repaired.block_id.as_deref(), Some(block_id.as_str()));
    }

    #[test]
    fn test_vanished_section_clears_selection() {
        let (template, ..) = template_with_block();
        let index = BlockIndex::build(&template.sections);
        let selection = Selection::section("section-gone".to_string());

        assert_eq!(repair_selection(&selection, &template, &index), Selection::none());
    }
}
