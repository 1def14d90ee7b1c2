//! Reducer integration tests: history bounds, boundary idempotence,
//! selection repair, debounce coalescing, move semantics.

use letterpress_editor::{reduce, Action, EditorState, EditorStore};
use letterpress_parser::model::{BlockType, Properties, Template};
use letterpress_parser::BlockRegistry;
use serde_json::json;
use std::sync::Arc;

fn props(value: serde_json::Value) -> Properties {
    value.as_object().cloned().unwrap_or_default()
}

/// Store with one section and one text block; returns their ids.
fn store_with_block() -> (EditorStore, String, String, String) {
    let mut store = EditorStore::new(Template::new());
    store.dispatch(Action::AddSection { index: None });
    let section_id = store.template().sections[0].id.clone();
    let column_id = store.template().sections[0].columns[0].id.clone();
    store.dispatch(Action::AddBlock {
        section_id: section_id.clone(),
        column_id: column_id.clone(),
        block_type: BlockType::Text,
        index: None,
    });
    let block_id = store.template().sections[0].columns[0].blocks[0].id.clone();
    (store, section_id, column_id, block_id)
}

#[test]
fn test_structural_actions_push_history_and_rebuild_index() {
    let (store, _, _, block_id) = store_with_block();

    // Initial entry + two structural pushes.
    assert_eq!(store.state().history_len(), 3);
    assert!(store.state().is_dirty);
    assert!(store.state().block_index.contains(&block_id));
}

#[test]
fn test_history_is_capped_with_fifo_eviction() {
    let registry = BlockRegistry::new();
    let mut state = Arc::new(EditorState::with_history_limit(Template::new(), 5));

    let mut snapshots = Vec::new();
    for _ in 0..10 {
        state = reduce(&state, &Action::AddSection { index: None }, &registry);
        snapshots.push(Arc::clone(&state.template));
    }

    assert_eq!(state.history_len(), 5);
    // The oldest retained entry is the template from five actions ago.
    assert!(Arc::ptr_eq(state.history.oldest(), &snapshots[5]));
    assert_eq!(state.history.oldest().sections.len(), 6);
}

#[test]
fn test_undo_redo_are_noops_at_the_boundaries() {
    let registry = BlockRegistry::new();
    let state = Arc::new(EditorState::new(Template::new()));

    let after_undo = reduce(&state, &Action::Undo, &registry);
    assert!(Arc::ptr_eq(&state, &after_undo));

    let after_redo = reduce(&state, &Action::Redo, &registry);
    assert!(Arc::ptr_eq(&state, &after_redo));
}

#[test]
fn test_undo_restores_previous_template_and_index() {
    let registry = BlockRegistry::new();
    let mut state = Arc::new(EditorState::new(Template::new()));
    state = reduce(&state, &Action::AddSection { index: None }, &registry);
    let section_id = state.template.sections[0].id.clone();
    let column_id = state.template.sections[0].columns[0].id.clone();
    state = reduce(
        &state,
        &Action::AddBlock {
            section_id,
            column_id,
            block_type: BlockType::Button,
            index: None,
        },
        &registry,
    );
    assert_eq!(state.block_index.len(), 1);

    state = reduce(&state, &Action::Undo, &registry);
    assert_eq!(state.template.sections[0].columns[0].blocks.len(), 0);
    assert_eq!(state.block_index.len(), 0);

    state = reduce(&state, &Action::Redo, &registry);
    assert_eq!(state.template.sections[0].columns[0].blocks.len(), 1);
    assert_eq!(state.block_index.len(), 1);
}

#[test]
fn test_removing_selected_block_clears_selection() {
    let (mut store, _, _, block_id) = store_with_block();
    store.dispatch(Action::SelectBlock {
        block_id: block_id.clone(),
    });
    assert_eq!(store.selection().block_id.as_deref(), Some(block_id.as_str()));

    store.dispatch(Action::RemoveBlock { block_id });

    assert!(store.selection().is_empty());
}

#[test]
fn test_moving_selected_block_corrects_selection_location() {
    let mut store = EditorStore::new(Template::new());
    store.dispatch(Action::AddSection { index: None });
    store.dispatch(Action::AddSection { index: None });
    let section_a = store.template().sections[0].id.clone();
    let column_a = store.template().sections[0].columns[0].id.clone();
    let section_b = store.template().sections[1].id.clone();
    let column_b = store.template().sections[1].columns[0].id.clone();
    store.dispatch(Action::AddBlock {
        section_id: section_a.clone(),
        column_id: column_a.clone(),
        block_type: BlockType::Text,
        index: None,
    });
    let block_id = store.template().sections[0].columns[0].blocks[0].id.clone();
    store.dispatch(Action::SelectBlock {
        block_id: block_id.clone(),
    });

    store.dispatch(Action::MoveBlock {
        block_id: block_id.clone(),
        section_id: section_b.clone(),
        column_id: column_b.clone(),
        index: 0,
    });

    let selection = store.selection();
    assert_eq!(selection.block_id.as_deref(), Some(block_id.as_str()));
    assert_eq!(selection.section_id.as_deref(), Some(section_b.as_str()));
    assert_eq!(selection.column_id.as_deref(), Some(column_b.as_str()));
}

#[test]
fn test_property_edits_coalesce_into_one_history_entry() {
    let (mut store, _, _, block_id) = store_with_block();
    let history_before = store.state().history_len();

    for patch in [
        json!({ "color": "#111111" }),
        json!({ "fontSize": "18px" }),
        json!({ "color": "#222222" }),
    ] {
        store.dispatch(Action::UpdateBlock {
            block_id: block_id.clone(),
            patch: props(patch),
        });
    }
    // No pushes yet; the template itself is already updated.
    assert_eq!(store.state().history_len(), history_before);

    assert!(store.dispatch(Action::PushHistory));
    assert_eq!(store.state().history_len(), history_before + 1);

    let block = &store.template().sections[0].columns[0].blocks[0];
    // Cumulative merge, later patches win on overlapping keys.
    assert_eq!(block.property_str("color"), Some("#222222"));
    assert_eq!(block.property_str("fontSize"), Some("18px"));
    // Untouched defaults survive the merges.
    assert_eq!(block.property_str("align"), Some("left"));

    // Flushing again with nothing new is a no-op.
    assert!(!store.dispatch(Action::PushHistory));
}

#[test]
fn test_update_with_stale_id_is_a_same_reference_noop() {
    let (mut store, _, _, block_id) = store_with_block();
    store.dispatch(Action::RemoveBlock {
        block_id: block_id.clone(),
    });

    let changed = store.dispatch(Action::UpdateBlock {
        block_id,
        patch: props(json!({ "color": "#333333" })),
    });

    assert!(!changed);
}

#[test]
fn test_same_column_move_adjusts_for_removal_shift() {
    let mut store = EditorStore::new(Template::new());
    store.dispatch(Action::AddSection { index: None });
    let section_id = store.template().sections[0].id.clone();
    let column_id = store.template().sections[0].columns[0].id.clone();
    for _ in 0..3 {
        store.dispatch(Action::AddBlock {
            section_id: section_id.clone(),
            column_id: column_id.clone(),
            block_type: BlockType::Text,
            index: None,
        });
    }
    let ids: Vec<String> = store.template().sections[0].columns[0]
        .blocks
        .iter()
        .map(|b| b.id.clone())
        .collect();

    // Move the first block to pre-removal index 2 (just before the third).
    store.dispatch(Action::MoveBlock {
        block_id: ids[0].clone(),
        section_id: section_id.clone(),
        column_id: column_id.clone(),
        index: 2,
    });
    let order: Vec<&str> = store.template().sections[0].columns[0]
        .blocks
        .iter()
        .map(|b| b.id.as_str())
        .collect();
    assert_eq!(order, vec![ids[1].as_str(), ids[0].as_str(), ids[2].as_str()]);

    // And to the end.
    store.dispatch(Action::MoveBlock {
        block_id: ids[0].clone(),
        section_id,
        column_id,
        index: 3,
    });
    let order: Vec<&str> = store.template().sections[0].columns[0]
        .blocks
        .iter()
        .map(|b| b.id.as_str())
        .collect();
    assert_eq!(order, vec![ids[1].as_str(), ids[2].as_str(), ids[0].as_str()]);
}

#[test]
fn test_duplicate_block_inserts_fresh_ids_after_original() {
    let (mut store, _, _, block_id) = store_with_block();

    store.dispatch(Action::DuplicateBlock {
        block_id: block_id.clone(),
    });

    let blocks = &store.template().sections[0].columns[0].blocks;
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].id, block_id);
    assert_ne!(blocks[1].id, block_id);
    assert_eq!(blocks[1].block_type, BlockType::Text);
}

#[test]
fn test_duplicate_section_regenerates_nested_ids() {
    let (mut store, section_id, column_id, block_id) = store_with_block();

    store.dispatch(Action::DuplicateSection {
        section_id: section_id.clone(),
    });

    let sections = &store.template().sections;
    assert_eq!(sections.len(), 2);
    assert_ne!(sections[1].id, section_id);
    assert_ne!(sections[1].columns[0].id, column_id);
    assert_ne!(sections[1].columns[0].blocks[0].id, block_id);
    // Both copies are indexed.
    assert_eq!(store.state().block_index.len(), 2);
}

#[test]
fn test_selection_actions_leave_history_alone() {
    let (mut store, section_id, _, block_id) = store_with_block();
    let history_before = store.state().history_len();

    store.dispatch(Action::SelectBlock { block_id });
    store.dispatch(Action::SelectSection { section_id });
    store.dispatch(Action::Deselect);
    store.dispatch(Action::SetActiveTab {
        tab: letterpress_editor::ActiveTab::Styles,
    });

    assert_eq!(store.state().history_len(), history_before);
}

#[test]
fn test_selecting_missing_ids_is_a_noop() {
    let (mut store, ..) = store_with_block();

    assert!(!store.dispatch(Action::SelectBlock {
        block_id: "block-nope".to_string(),
    }));
    assert!(!store.dispatch(Action::SelectSection {
        section_id: "section-nope".to_string(),
    }));
}

#[test]
fn test_replace_template_goes_through_history() {
    let (mut store, ..) = store_with_block();
    let history_before = store.state().history_len();

    let replacement = Template::new();
    store.dispatch(Action::ReplaceTemplate {
        template: replacement,
    });

    assert_eq!(store.state().history_len(), history_before + 1);
    assert!(store.template().sections.is_empty());
    assert!(store.state().block_index.is_empty());

    // The old document is one undo away.
    store.dispatch(Action::Undo);
    assert_eq!(store.template().sections.len(), 1);
}

#[test]
fn test_add_block_of_unregistered_type_is_a_noop() {
    let (mut store, section_id, column_id, _) = store_with_block();

    let changed = store.dispatch(Action::AddBlock {
        section_id,
        column_id,
        block_type: BlockType::Custom("teleporter".to_string()),
        index: None,
    });

    assert!(!changed);
}

#[test]
fn test_remove_missing_section_is_a_noop() {
    let (mut store, ..) = store_with_block();

    assert!(!store.dispatch(Action::RemoveSection {
        section_id: "section-nope".to_string(),
    }));
}

#[test]
fn test_structural_action_discards_redo_branch() {
    let (mut store, ..) = store_with_block();
    store.dispatch(Action::Undo);
    assert!(store.can_redo());

    store.dispatch(Action::AddSection { index: None });

    assert!(!store.can_redo());
}
