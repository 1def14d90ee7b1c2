//! # Letterpress Editor
//!
//! Transactional state engine for the Letterpress email builder.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ parser: markup text ⇄ Template              │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: reduce(state, action) → state       │
//! │  - snapshot history with bounded undo/redo  │
//! │  - block index rebuilt on structural change │
//! │  - selection repaired in the same step      │
//! │  - debounced property-edit coalescing       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Reduction is synchronous and deterministic (fresh ids aside). No-op
//! reductions return the same `Arc`, so pointer equality answers "did
//! anything change".

mod actions;
mod block_index;
mod debounce;
mod errors;
mod history;
mod reducer;
mod selection;
mod state;
mod storage;
mod store;

pub use actions::Action;
pub use block_index::{BlockIndex, BlockLocation};
pub use debounce::{DebounceClock, DEFAULT_DEBOUNCE_WINDOW};
pub use errors::EditorError;
pub use history::{History, DEFAULT_HISTORY_LIMIT};
pub use reducer::reduce;
pub use selection::repair_selection;
pub use state::{ActiveTab, EditorState, Selection};
pub use storage::{MemoryStore, StorageError, TemplateStore};
pub use store::EditorStore;

// Re-export the document model for convenience.
pub use letterpress_parser::model::Template;
