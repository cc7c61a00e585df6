//! Diagram CRUD and the optimistic update protocol.

use std::sync::Arc;

use tracing::{debug, info, warn};

use archtool_core::error::{AppError, ErrorKind};
use archtool_core::types::{DiagramId, PageRequest, PageResponse, PrincipalId};
use archtool_database::DiagramStore;
use archtool_entity::diagram::{CreateDiagram, Diagram, DiagramFilter, UpdateDiagram};

use crate::context::RequestContext;

/// Handles diagram creation, lookup, listing, update, and deletion.
#[derive(Debug, Clone)]
pub struct DiagramService {
    store: Arc<dyn DiagramStore>,
}

/// Data for creating a diagram. The owner comes from the request context.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NewDiagram {
    /// Label.
    pub name: String,
    /// Classification tag.
    pub registry_type: Option<String>,
    /// Serialized payload.
    pub content: String,
}

/// Fields to change on a diagram. Omitted fields stay as they are.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct EditDiagram {
    /// New label.
    pub name: Option<String>,
    /// New payload.
    pub content: Option<String>,
}

impl DiagramService {
    /// Creates a new diagram service.
    pub fn new(store: Arc<dyn DiagramStore>) -> Self {
        Self { store }
    }

    /// Creates a diagram owned by the caller.
    pub async fn create(&self, ctx: &RequestContext, req: NewDiagram) -> Result<Diagram, AppError> {
        require_text("name", &req.name)?;
        require_text("content", &req.content)?;

        let diagram = self
            .store
            .create(&CreateDiagram {
                name: req.name,
                registry_type: req.registry_type.filter(|t| !t.trim().is_empty()),
                content: req.content,
                owner_id: ctx.principal,
            })
            .await?;

        info!(
            diagram_id = %diagram.id,
            principal = ?ctx.principal,
            revision = diagram.revision,
            "Diagram created"
        );
        Ok(diagram)
    }

    /// Gets a diagram by id.
    pub async fn get(&self, id: DiagramId) -> Result<Diagram, AppError> {
        debug!(diagram_id = %id, "Fetching diagram");
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Diagram {id} not found")))
    }

    /// Lists diagrams, newest update first.
    pub async fn list(
        &self,
        owner_id: Option<PrincipalId>,
        query: Option<String>,
        page: PageRequest,
    ) -> Result<PageResponse<Diagram>, AppError> {
        let filter = DiagramFilter { owner_id, query };
        self.store.list(&filter, &page).await
    }

    /// Applies an edit, advancing the diagram by exactly one revision.
    ///
    /// With `expected_revision` set, the edit only lands if nobody else
    /// updated the diagram since the caller read that revision.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: DiagramId,
        req: EditDiagram,
        expected_revision: Option<i32>,
    ) -> Result<Diagram, AppError> {
        if let Some(name) = &req.name {
            require_text("name", name)?;
        }
        if let Some(content) = &req.content {
            require_text("content", content)?;
        }

        let changes = UpdateDiagram {
            name: req.name,
            content: req.content,
            expected_revision,
            modified_by: ctx.principal,
        };

        match self.store.update(id, &changes).await {
            Ok(diagram) => {
                info!(
                    diagram_id = %id,
                    principal = ?ctx.principal,
                    revision = diagram.revision,
                    "Diagram updated"
                );
                Ok(diagram)
            }
            Err(e) if e.kind == ErrorKind::Conflict => {
                warn!(
                    diagram_id = %id,
                    principal = ?ctx.principal,
                    expected_revision = ?expected_revision,
                    current_revision = ?e.current_revision(),
                    "Rejected stale diagram update"
                );
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Deletes a diagram and its bindings. History is kept.
    pub async fn delete(&self, ctx: &RequestContext, id: DiagramId) -> Result<(), AppError> {
        self.store.delete(id).await?;
        info!(diagram_id = %id, principal = ?ctx.principal, "Diagram deleted");
        Ok(())
    }

    /// Checks that the store is reachable.
    pub async fn health_check(&self) -> Result<bool, AppError> {
        self.store.health_check().await
    }
}

/// Rejects missing or whitespace-only required text.
pub(crate) fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}
