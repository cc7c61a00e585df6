//! Binding index operations.

use std::sync::Arc;

use tracing::{debug, info};

use archtool_core::error::AppError;
use archtool_core::types::{BindingId, DiagramId};
use archtool_database::BindingIndex;
use archtool_entity::binding::{DiagramBinding, UpsertBinding};

use crate::context::RequestContext;
use crate::diagram::service::require_text;

/// Records which domain object a diagram element stands for.
#[derive(Debug, Clone)]
pub struct BindingService {
    index: Arc<dyn BindingIndex>,
}

/// Data for binding one element.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BindElement {
    /// Element within the diagram payload.
    pub element_id: String,
    /// Kind of domain object, e.g. `application`.
    pub object_type: String,
    /// Opaque reference to the domain object.
    pub object_id: String,
}

impl BindingService {
    /// Creates a new binding service.
    pub fn new(index: Arc<dyn BindingIndex>) -> Self {
        Self { index }
    }

    /// Binds an element, replacing any previous binding of the same element.
    pub async fn upsert(
        &self,
        ctx: &RequestContext,
        diagram_id: DiagramId,
        req: BindElement,
    ) -> Result<DiagramBinding, AppError> {
        require_text("element_id", &req.element_id)?;
        require_text("object_type", &req.object_type)?;
        require_text("object_id", &req.object_id)?;

        let binding = self
            .index
            .upsert(&UpsertBinding {
                diagram_id,
                element_id: req.element_id,
                object_type: req.object_type,
                object_id: req.object_id,
                created_by: ctx.principal,
            })
            .await?;

        info!(
            diagram_id = %diagram_id,
            element_id = %binding.element_id,
            binding_id = binding.id,
            principal = ?ctx.principal,
            "Element bound"
        );
        Ok(binding)
    }

    /// Gets the binding of one element.
    pub async fn get(
        &self,
        diagram_id: DiagramId,
        element_id: &str,
    ) -> Result<DiagramBinding, AppError> {
        require_text("element_id", element_id)?;
        debug!(diagram_id = %diagram_id, element_id, "Fetching binding");
        self.index
            .find_by_element(diagram_id, element_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "No binding for element {element_id} in diagram {diagram_id}"
                ))
            })
    }

    /// Removes the binding of one element. Absent bindings are not an error.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        diagram_id: DiagramId,
        element_id: &str,
    ) -> Result<u64, AppError> {
        require_text("element_id", element_id)?;
        let removed = self.index.delete_by_element(diagram_id, element_id).await?;
        info!(
            diagram_id = %diagram_id,
            element_id,
            removed,
            principal = ?ctx.principal,
            "Binding deleted"
        );
        Ok(removed)
    }

    /// Removes a binding by id. Absent bindings are not an error.
    pub async fn delete_by_id(
        &self,
        ctx: &RequestContext,
        diagram_id: DiagramId,
        id: BindingId,
    ) -> Result<u64, AppError> {
        let removed = self.index.delete_by_id(diagram_id, id).await?;
        info!(
            diagram_id = %diagram_id,
            binding_id = id,
            removed,
            principal = ?ctx.principal,
            "Binding deleted"
        );
        Ok(removed)
    }
}
