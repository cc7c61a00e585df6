//! In-memory backend for development and tests.
//!
//! [`MemoryDiagramStore`] and [`MemoryBindingIndex`] share one
//! [`MemoryState`] so that deleting a diagram reaps its bindings and
//! binding upserts can reject unknown diagrams. Every operation holds the
//! state lock for its whole duration, which makes multi-step operations
//! atomic.

pub mod binding;
pub mod diagram;
mod state;

pub use binding::MemoryBindingIndex;
pub use diagram::MemoryDiagramStore;
pub use state::MemoryState;

/// Build a diagram store and binding index over fresh shared state.
pub fn memory_backend() -> (MemoryDiagramStore, MemoryBindingIndex) {
    let state = MemoryState::shared();
    (
        MemoryDiagramStore::new(state.clone()),
        MemoryBindingIndex::new(state),
    )
}
