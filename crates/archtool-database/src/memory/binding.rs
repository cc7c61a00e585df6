//! In-memory [`BindingIndex`].

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use archtool_core::error::AppError;
use archtool_core::result::AppResult;
use archtool_core::types::{BindingId, DiagramId};
use archtool_entity::binding::{DiagramBinding, UpsertBinding};

use super::state::MemoryState;
use crate::store::BindingIndex;

/// Binding index over [`MemoryState`].
#[derive(Debug, Clone)]
pub struct MemoryBindingIndex {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryBindingIndex {
    /// Create an index over shared state.
    pub fn new(state: Arc<RwLock<MemoryState>>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl BindingIndex for MemoryBindingIndex {
    async fn upsert(&self, data: &UpsertBinding) -> AppResult<DiagramBinding> {
        let mut state = self.state.write().await;
        if !state.diagrams.contains_key(&data.diagram_id) {
            return Err(AppError::not_found(format!(
                "Diagram {} not found",
                data.diagram_id
            )));
        }

        let key = (data.diagram_id, data.element_id.clone());
        let id = match state.bindings.get(&key) {
            Some(existing) => existing.id,
            None => state.next_binding_id(),
        };

        let binding = DiagramBinding {
            id,
            diagram_id: data.diagram_id,
            element_id: data.element_id.clone(),
            object_type: data.object_type.clone(),
            object_id: data.object_id.clone(),
            created_by: data.created_by,
        };
        state.bindings.insert(key, binding.clone());
        Ok(binding)
    }

    async fn find_by_element(
        &self,
        diagram_id: DiagramId,
        element_id: &str,
    ) -> AppResult<Option<DiagramBinding>> {
        Ok(self
            .state
            .read()
            .await
            .bindings
            .get(&(diagram_id, element_id.to_string()))
            .cloned())
    }

    async fn delete_by_element(&self, diagram_id: DiagramId, element_id: &str) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let removed = state
            .bindings
            .remove(&(diagram_id, element_id.to_string()))
            .is_some();
        Ok(u64::from(removed))
    }

    async fn delete_by_id(&self, diagram_id: DiagramId, id: BindingId) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let before = state.bindings.len();
        state
            .bindings
            .retain(|(d, _), b| !(*d == diagram_id && b.id == id));
        Ok((before - state.bindings.len()) as u64)
    }
}
