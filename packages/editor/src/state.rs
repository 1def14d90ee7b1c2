//! Editor state snapshot.

use crate::block_index::BlockIndex;
use crate::history::History;
use letterpress_parser::Template;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Current selection. The block id is the stable anchor; section/column are
/// derived and silently corrected by selection repair after moves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub section_id: Option<String>,
    pub column_id: Option<String>,
    pub block_id: Option<String>,
}

impl Selection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn block(section_id: String, column_id: String, block_id: String) -> Self {
        Self {
            section_id: Some(section_id),
            column_id: Some(column_id),
            block_id: Some(block_id),
        }
    }

    pub fn section(section_id: String) -> Self {
        Self {
            section_id: Some(section_id),
            column_id: None,
            block_id: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.section_id.is_none() && self.column_id.is_none() && self.block_id.is_none()
    }
}

/// The side panel currently open in the editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveTab {
    #[default]
    Content,
    Styles,
    Settings,
}

/// Full editor state. Reductions produce a fresh value; templates are shared
/// snapshots, so cloning is cheap.
#[derive(Debug, Clone)]
pub struct EditorState {
    pub template: Arc<Template>,
    pub selection: Selection,
    pub active_tab: ActiveTab,
    pub history: History,
    pub is_dirty: bool,
    pub block_index: BlockIndex,
}

impl EditorState {
    pub fn new(template: Template) -> Self {
        let template = Arc::new(template);
        Self {
            block_index: BlockIndex::build(&template.sections),
            history: History::new(Arc::clone(&template)),
            template,
            selection: Selection::none(),
            active_tab: ActiveTab::default(),
            is_dirty: false,
        }
    }

    pub fn with_history_limit(template: Template, limit: usize) -> Self {
        let template = Arc::new(template);
        Self {
            block_index: BlockIndex::build(&template.sections),
            history: History::with_limit(Arc::clone(&template), limit),
            template,
            selection: Selection::none(),
            active_tab: ActiveTab::default(),
            is_dirty: false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_index(&self) -> usize {
        self.history.index()
    }
}
