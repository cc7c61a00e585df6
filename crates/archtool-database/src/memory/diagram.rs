//! In-memory [`DiagramStore`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use archtool_core::error::AppError;
use archtool_core::result::AppResult;
use archtool_core::types::{DiagramId, PageRequest, PageResponse};
use archtool_entity::diagram::model::INITIAL_REVISION;
use archtool_entity::diagram::{CreateDiagram, Diagram, DiagramFilter, DiagramVersion, UpdateDiagram};

use super::state::MemoryState;
use crate::store::DiagramStore;

/// Diagram store over [`MemoryState`].
#[derive(Debug, Clone)]
pub struct MemoryDiagramStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryDiagramStore {
    /// Create a store over shared state.
    pub fn new(state: Arc<RwLock<MemoryState>>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl DiagramStore for MemoryDiagramStore {
    async fn create(&self, data: &CreateDiagram) -> AppResult<Diagram> {
        let now = Utc::now();
        let diagram = Diagram {
            id: DiagramId::new(),
            name: data.name.clone(),
            registry_type: data.registry_type.clone(),
            content: data.content.clone(),
            owner_id: data.owner_id,
            revision: INITIAL_REVISION,
            created_at: now,
            updated_at: now,
        };

        let mut state = self.state.write().await;
        state.diagrams.insert(diagram.id, diagram.clone());
        Ok(diagram)
    }

    async fn find_by_id(&self, id: DiagramId) -> AppResult<Option<Diagram>> {
        Ok(self.state.read().await.diagrams.get(&id).cloned())
    }

    async fn list(
        &self,
        filter: &DiagramFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Diagram>> {
        let state = self.state.read().await;
        let mut matches: Vec<&Diagram> = state
            .diagrams
            .values()
            .filter(|d| filter.matches(d))
            .collect();
        matches.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(a.id.cmp(&b.id)));

        let total = matches.len() as i64;
        let items = page.slice(matches.into_iter().cloned());
        Ok(PageResponse::new(items, total, page))
    }

    async fn update(&self, id: DiagramId, changes: &UpdateDiagram) -> AppResult<Diagram> {
        let mut state = self.state.write().await;

        let current = state
            .diagrams
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Diagram {id} not found")))?;

        if let Some(expected) = changes.expected_revision {
            if expected != current.revision {
                debug!(
                    diagram_id = %id,
                    expected,
                    current = current.revision,
                    "Revision mismatch"
                );
                return Err(AppError::revision_conflict(Some(current.revision)));
            }
        }

        let key = (id, current.revision);
        if state.versions.contains_key(&key) {
            return Err(AppError::revision_conflict(Some(current.revision)));
        }

        let now = Utc::now();
        let mut updated = current.clone();
        changes.apply_to(&mut updated);
        updated.revision = current.revision + 1;
        updated.updated_at = now;

        state
            .versions
            .insert(key, DiagramVersion::capture(&current, changes.modified_by, now));
        state.diagrams.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: DiagramId) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state.diagrams.remove(&id).is_none() {
            return Err(AppError::not_found(format!("Diagram {id} not found")));
        }
        state.bindings.retain(|(diagram_id, _), _| *diagram_id != id);
        Ok(())
    }

    async fn list_versions(
        &self,
        diagram_id: DiagramId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<DiagramVersion>> {
        let state = self.state.read().await;
        let versions = state
            .versions
            .range((diagram_id, i32::MIN)..=(diagram_id, i32::MAX))
            .map(|(_, v)| v);

        let total = versions.clone().count() as i64;
        let items = page.slice(versions.rev().cloned());
        Ok(PageResponse::new(items, total, page))
    }

    async fn find_version(
        &self,
        diagram_id: DiagramId,
        revision: i32,
    ) -> AppResult<Option<DiagramVersion>> {
        Ok(self
            .state
            .read()
            .await
            .versions
            .get(&(diagram_id, revision))
            .cloned())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
