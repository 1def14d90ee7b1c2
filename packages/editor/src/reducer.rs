//! The pure reducer: `(state, action) → state`.
//!
//! Never fails. Every no-op — boundary undo/redo, stale ids, redundant
//! selection changes — returns the same `Arc`, so callers detect "nothing
//! changed" by pointer equality.

use crate::actions::Action;
use crate::block_index::BlockIndex;
use crate::selection::repair_selection;
use crate::state::{EditorState, Selection};
use letterpress_parser::model::{Block, Column, Section, Template};
use letterpress_parser::{BlockRegistry, IdGenerator};
use std::sync::Arc;
use tracing::debug;

pub fn reduce(
    state: &Arc<EditorState>,
    action: &Action,
    registry: &BlockRegistry,
) -> Arc<EditorState> {
    match action {
        Action::AddSection { index } => structural(state, |template, ids| {
            let at = index
                .unwrap_or(template.sections.len())
                .min(template.sections.len());
            template.sections.insert(at, Section::new(ids));
            true
        }),

        Action::RemoveSection { section_id } => structural(state, |template, _| {
            let before = template.sections.len();
            template.sections.retain(|s| &s.id != section_id);
            template.sections.len() != before
        }),

        Action::MoveSection { from, to } => structural(state, |template, _| {
            if *from >= template.sections.len() || from == to {
                return false;
            }
            let section = template.sections.remove(*from);
            let at = (*to).min(template.sections.len());
            template.sections.insert(at, section);
            true
        }),

        Action::DuplicateSection { section_id } => structural(state, |template, ids| {
            match template.sections.iter().position(|s| &s.id == section_id) {
                Some(pos) => {
                    let copy = template.sections[pos].duplicate(ids);
                    template.sections.insert(pos + 1, copy);
                    true
                }
                None => false,
            }
        }),

        Action::AddBlock {
            section_id,
            column_id,
            block_type,
            index,
        } => structural(state, |template, ids| {
            let Some(block) = registry.create_block(block_type, ids) else {
                return false;
            };
            let Some(column) = find_column_mut(template, section_id, column_id) else {
                return false;
            };
            let at = index.unwrap_or(column.blocks.len()).min(column.blocks.len());
            column.blocks.insert(at, block);
            true
        }),

        Action::RemoveBlock { block_id } => {
            structural(state, |template, _| remove_block(template, block_id).is_some())
        }

        Action::MoveBlock {
            block_id,
            section_id,
            column_id,
            index,
        } => structural(state, |template, _| {
            move_block(template, block_id, section_id, column_id, *index)
        }),

        Action::DuplicateBlock { block_id } => structural(state, |template, ids| {
            for section in &mut template.sections {
                for column in &mut section.columns {
                    if let Some(pos) = column.blocks.iter().position(|b| &b.id == block_id) {
                        let copy = column.blocks[pos].duplicate(ids);
                        column.blocks.insert(pos + 1, copy);
                        return true;
                    }
                }
            }
            false
        }),

        Action::ReplaceTemplate { template } => structural(state, |current, _| {
            *current = template.clone();
            true
        }),

        Action::UpdateBlock { block_id, patch } => {
            let Some(location) = state.block_index.get(block_id).cloned() else {
                return Arc::clone(state);
            };
            merge_property_edit(state, |template| {
                let column =
                    find_column_mut(template, &location.section_id, &location.column_id)?;
                let block = column.blocks.iter_mut().find(|b| &b.id == block_id)?;
                block.merge_properties(patch);
                Some(())
            })
        }

        Action::UpdateSection { section_id, patch } => merge_property_edit(state, |template| {
            let section = template.sections.iter_mut().find(|s| &s.id == section_id)?;
            section.properties.apply(patch);
            Some(())
        }),

        Action::UpdateGlobalStyles { patch } => merge_property_edit(state, |template| {
            template.global_styles.apply(patch);
            Some(())
        }),

        Action::UpdateHeadMetadata { patch } => merge_property_edit(state, |template| {
            template.head_metadata.apply(patch);
            Some(())
        }),

        Action::SelectBlock { block_id } => match state.block_index.get(block_id) {
            Some(location) => with_selection(
                state,
                Selection::block(
                    location.section_id.clone(),
                    location.column_id.clone(),
                    block_id.clone(),
                ),
            ),
            None => Arc::clone(state),
        },

        Action::SelectSection { section_id } => {
            if state.template.sections.iter().any(|s| &s.id == section_id) {
                with_selection(state, Selection::section(section_id.clone()))
            } else {
                Arc::clone(state)
            }
        }

        Action::Deselect => {
            if state.selection.is_empty() {
                Arc::clone(state)
            } else {
                with_selection(state, Selection::none())
            }
        }

        Action::SetActiveTab { tab } => {
            if state.active_tab == *tab {
                Arc::clone(state)
            } else {
                let mut next = (**state).clone();
                next.active_tab = *tab;
                Arc::new(next)
            }
        }

        Action::Undo => step_history(state, false),
        Action::Redo => step_history(state, true),
        Action::PushHistory => push_history(state),
    }
}

/// Apply a structural mutation: new template, history push, index rebuild,
/// selection repair. The closure returns false to signal a no-op.
fn structural<F>(state: &Arc<EditorState>, mutate: F) -> Arc<EditorState>
where
    F: FnOnce(&mut Template, &mut IdGenerator) -> bool,
{
    let mut template = (*state.template).clone();
    let mut ids = IdGenerator::new();
    if !mutate(&mut template, &mut ids) {
        return Arc::clone(state);
    }

    let template = Arc::new(template);
    let mut history = state.history.clone();
    history.push(Arc::clone(&template));
    let block_index = BlockIndex::build(&template.sections);
    let selection = repair_selection(&state.selection, &template, &block_index);
    debug!(
        history_len = history.len(),
        blocks = block_index.len(),
        "applied structural action"
    );

    Arc::new(EditorState {
        template,
        selection,
        active_tab: state.active_tab,
        history,
        is_dirty: true,
        block_index,
    })
}

/// Apply a debounce-eligible property edit: template changes in place, no
/// history push, index and selection reused (membership never changes here).
fn merge_property_edit<F>(state: &Arc<EditorState>, mutate: F) -> Arc<EditorState>
where
    F: FnOnce(&mut Template) -> Option<()>,
{
    let mut template = (*state.template).clone();
    if mutate(&mut template).is_none() {
        return Arc::clone(state);
    }

    Arc::new(EditorState {
        template: Arc::new(template),
        selection: state.selection.clone(),
        active_tab: state.active_tab,
        history: state.history.clone(),
        is_dirty: true,
        block_index: state.block_index.clone(),
    })
}

fn with_selection(state: &Arc<EditorState>, selection: Selection) -> Arc<EditorState> {
    if state.selection == selection {
        return Arc::clone(state);
    }
    let mut next = (**state).clone();
    next.selection = selection;
    Arc::new(next)
}

/// Undo/redo: move the history cursor, restore its template, rebuild the
/// index (the restored tree may contain blocks the current index has never
/// seen), and re-validate the selection.
fn step_history(state: &Arc<EditorState>, forward: bool) -> Arc<EditorState> {
    let mut history = state.history.clone();
    let restored = if forward {
        history.step_forward()
    } else {
        history.step_back()
    };
    let Some(template) = restored else {
        return Arc::clone(state);
    };

    let block_index = BlockIndex::build(&template.sections);
    let selection = repair_selection(&state.selection, &template, &block_index);

    Arc::new(EditorState {
        template,
        selection,
        active_tab: state.active_tab,
        history,
        is_dirty: true,
        block_index,
    })
}

/// Commit the pending template as one history entry. No-op when nothing
/// changed since the last commit, so duplicate flushes cost nothing.
fn push_history(state: &Arc<EditorState>) -> Arc<EditorState> {
    if Arc::ptr_eq(&state.template, state.history.current()) {
        return Arc::clone(state);
    }

    let mut history = state.history.clone();
    history.push(Arc::clone(&state.template));
    debug!(history_len = history.len(), "committed coalesced edits");

    let mut next = (**state).clone();
    next.history = history;
    Arc::new(next)
}

fn find_column_mut<'a>(
    template: &'a mut Template,
    section_id: &str,
    column_id: &str,
) -> Option<&'a mut Column> {
    template
        .sections
        .iter_mut()
        .find(|s| s.id == section_id)?
        .columns
        .iter_mut()
        .find(|c| c.id == column_id)
}

fn remove_block(template: &mut Template, block_id: &str) -> Option<Block> {
    for section in &mut template.sections {
        for column in &mut section.columns {
            if let Some(pos) = column.blocks.iter().position(|b| b.id == block_id) {
                return Some(column.blocks.remove(pos));
            }
        }
    }
    None
}

/// Relocate a block. When source and target are the same column, the target
/// index is adjusted *before* removal: removing the block first shifts every
/// later index down by one.
fn move_block(
    template: &mut Template,
    block_id: &str,
    section_id: &str,
    column_id: &str,
    index: usize,
) -> bool {
    let mut source: Option<(usize, usize, usize)> = None;
    for (si, section) in template.sections.iter().enumerate() {
        for (ci, column) in section.columns.iter().enumerate() {
            if let Some(bi) = column.blocks.iter().position(|b| b.id == block_id) {
                source = Some((si, ci, bi));
            }
        }
    }
    let Some((si, ci, bi)) = source else {
        return false;
    };

    let target_exists = template
        .sections
        .iter()
        .any(|s| s.id == section_id && s.columns.iter().any(|c| c.id == column_id));
    if !target_exists {
        return false;
    }

    let same_column =
        template.sections[si].id == section_id && template.sections[si].columns[ci].id == column_id;
    let mut insert_at = index;
    if same_column && bi < insert_at {
        insert_at -= 1;
    }

    let block = template.sections[si].columns[ci].blocks.remove(bi);
    match find_column_mut(template, section_id, column_id) {
        Some(column) => {
            let at = insert_at.min(column.blocks.len());
            column.blocks.insert(at, block);
            true
        }
        None => {
            // Target vanished between the existence check and here; put the
            // block back and report a no-op.
            template.sections[si].columns[ci].blocks.insert(bi, block);
            false
        }
    }
}
