//! Store facade: owns the current state, dispatches actions, and wires the
//! transcoder and persistence through the reducer's replace-template path.

use crate::actions::Action;
use crate::debounce::DebounceClock;
use crate::errors::EditorError;
use crate::reducer::reduce;
use crate::state::{EditorState, Selection};
use crate::storage::TemplateStore;
use letterpress_parser::{
    generate_with, parse_with, sanitize_with, BlockRegistry, GenerateOptions, Template,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

pub struct EditorStore {
    state: Arc<EditorState>,
    registry: Arc<BlockRegistry>,
    debounce: DebounceClock,
}

impl EditorStore {
    /// Store over the built-in block registry.
    pub fn new(template: Template) -> Self {
        Self::with_registry(template, Arc::new(BlockRegistry::new()))
    }

    pub fn with_registry(template: Template, registry: Arc<BlockRegistry>) -> Self {
        Self {
            state: Arc::new(EditorState::new(template)),
            registry,
            debounce: DebounceClock::new(),
        }
    }

    pub fn state(&self) -> &Arc<EditorState> {
        &self.state
    }

    pub fn template(&self) -> &Template {
        &self.state.template
    }

    pub fn selection(&self) -> &Selection {
        &self.state.selection
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn can_undo(&self) -> bool {
        self.state.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.state.can_redo()
    }

    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty
    }

    /// Dispatch an action. Returns false when the reduction was a no-op (the
    /// state reference is unchanged).
    pub fn dispatch(&mut self, action: Action) -> bool {
        let next = reduce(&self.state, &action, &self.registry);
        let changed = !Arc::ptr_eq(&next, &self.state);
        self.state = next;
        changed
    }

    /// Dispatch, noting debounce-eligible edits against the clock so a later
    /// `flush_if_settled` can commit the burst.
    pub fn dispatch_at(&mut self, action: Action, now: Instant) -> bool {
        if action.is_debounce_eligible() {
            self.debounce.note_edit(now);
        }
        self.dispatch(action)
    }

    /// Commit pending property edits once the debounce window has elapsed.
    /// Returns true when a history entry was actually pushed.
    pub fn flush_if_settled(&mut self, now: Instant) -> bool {
        if !self.debounce.should_flush(now) {
            return false;
        }
        self.debounce.reset();
        self.dispatch(Action::PushHistory)
    }

    /// Parse markup and replace the whole template — the same action path
    /// undo history uses.
    pub fn import_markup(&mut self, source: &str) -> Result<(), EditorError> {
        let template = parse_with(source, &self.registry)?;
        info!(sections = template.sections.len(), "imported markup");
        self.dispatch(Action::ReplaceTemplate { template });
        Ok(())
    }

    pub fn export_markup(&self) -> String {
        generate_with(self.template(), &self.registry, GenerateOptions::default())
    }

    /// Load a stored value. Whatever the store returns is re-run through
    /// sanitize before it is trusted. Returns false when the key is absent.
    pub fn load_from(
        &mut self,
        store: &dyn TemplateStore,
        key: &str,
    ) -> Result<bool, EditorError> {
        let Some(raw) = store.load(key)? else {
            return Ok(false);
        };
        let template = sanitize_with(&raw, &self.registry);
        self.dispatch(Action::ReplaceTemplate { template });
        Ok(true)
    }

    pub fn save_to(
        &mut self,
        store: &mut dyn TemplateStore,
        key: &str,
    ) -> Result<(), EditorError> {
        store.save(key, self.template())?;
        if self.state.is_dirty {
            let mut next = (*self.state).clone();
            next.is_dirty = false;
            self.state = Arc::new(next);
        }
        Ok(())
    }
}
