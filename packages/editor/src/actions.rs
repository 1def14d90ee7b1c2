//! The reducer's action vocabulary.
//!
//! ## Reduction policy by category
//!
//! - **Structural** (add/remove/move/duplicate section or block, replace
//!   template): push history, rebuild the block index, repair selection.
//! - **Debounce-eligible** (block/section/global/head property patches):
//!   apply immediately, merge-only, no history push — the caller flushes a
//!   settled burst with `PushHistory` so fifty keystrokes become one undo
//!   step.
//! - **Selection** (select/deselect/tab): touch only selection state.
//! - **History control** (`Undo`/`Redo`/`PushHistory`): move the cursor or
//!   commit the pending template.
//!
//! Actions referencing ids that no longer exist are no-ops returning the same
//! state reference.

use crate::state::ActiveTab;
use letterpress_parser::model::{
    BlockType, GlobalStylesPatch, HeadMetadataPatch, Properties, SectionPatch, Template,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    AddSection {
        index: Option<usize>,
    },
    RemoveSection {
        section_id: String,
    },
    MoveSection {
        from: usize,
        to: usize,
    },
    DuplicateSection {
        section_id: String,
    },
    AddBlock {
        section_id: String,
        column_id: String,
        block_type: BlockType,
        index: Option<usize>,
    },
    RemoveBlock {
        block_id: String,
    },
    MoveBlock {
        block_id: String,
        section_id: String,
        column_id: String,
        index: usize,
    },
    DuplicateBlock {
        block_id: String,
    },
    ReplaceTemplate {
        template: Template,
    },
    UpdateBlock {
        block_id: String,
        patch: Properties,
    },
    UpdateSection {
        section_id: String,
        patch: SectionPatch,
    },
    UpdateGlobalStyles {
        patch: GlobalStylesPatch,
    },
    UpdateHeadMetadata {
        patch: HeadMetadataPatch,
    },
    SelectBlock {
        block_id: String,
    },
    SelectSection {
        section_id: String,
    },
    Deselect,
    SetActiveTab {
        tab: ActiveTab,
    },
    Undo,
    Redo,
    PushHistory,
}

impl Action {
    /// Structural actions change which nodes exist or where they live.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Action::AddSection { .. }
                | Action::RemoveSection { .. }
                | Action::MoveSection { .. }
                | Action::DuplicateSection { .. }
                | Action::AddBlock { .. }
                | Action::RemoveBlock { .. }
                | Action::MoveBlock { .. }
                | Action::DuplicateBlock { .. }
                | Action::ReplaceTemplate { .. }
        )
    }

    /// Property-only actions whose history commit is deferred and coalesced.
    pub fn is_debounce_eligible(&self) -> bool {
        matches!(
            self,
            Action::UpdateBlock { .. }
                | Action::UpdateSection { .. }
                | Action::UpdateGlobalStyles { .. }
                | Action::UpdateHeadMetadata { .. }
        )
    }
}
