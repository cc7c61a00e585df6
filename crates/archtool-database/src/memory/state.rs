//! Shared state behind the in-memory backend.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::sync::RwLock;

use archtool_core::types::{BindingId, DiagramId};
use archtool_entity::binding::DiagramBinding;
use archtool_entity::diagram::{Diagram, DiagramVersion};

/// Tables of the in-memory backend.
#[derive(Debug, Default)]
pub struct MemoryState {
    /// Current diagram rows.
    pub(crate) diagrams: HashMap<DiagramId, Diagram>,
    /// Snapshots keyed by `(diagram, revision)`.
    pub(crate) versions: BTreeMap<(DiagramId, i32), DiagramVersion>,
    /// Bindings keyed by `(diagram, element)`.
    pub(crate) bindings: HashMap<(DiagramId, String), DiagramBinding>,
    /// Last issued binding id.
    pub(crate) last_binding_id: BindingId,
}

impl MemoryState {
    /// Fresh empty state behind a lock.
    pub fn shared() -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self::default()))
    }

    pub(crate) fn next_binding_id(&mut self) -> BindingId {
        self.last_binding_id += 1;
        self.last_binding_id
    }
}
