//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use archtool_core::types::PrincipalId;
use archtool_service::{BindElement, EditDiagram, NewDiagram};

use crate::extractors::LimitOffsetParams;
use crate::extractors::query::lenient;

/// Create diagram request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDiagramRequest {
    /// Label.
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    /// Classification tag.
    #[serde(default)]
    pub registry_type: Option<String>,
    /// Serialized diagram payload.
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}

impl From<CreateDiagramRequest> for NewDiagram {
    fn from(req: CreateDiagramRequest) -> Self {
        Self {
            name: req.name,
            registry_type: req.registry_type,
            content: req.content,
        }
    }
}

/// Update diagram request body. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateDiagramRequest {
    /// New label.
    #[serde(default)]
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    /// New payload.
    #[serde(default)]
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: Option<String>,
}

impl From<UpdateDiagramRequest> for EditDiagram {
    fn from(req: UpdateDiagramRequest) -> Self {
        Self {
            name: req.name,
            content: req.content,
        }
    }
}

/// Bind element request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpsertBindingRequest {
    /// Element within the diagram.
    #[validate(length(min = 1, message = "element_id is required"))]
    pub element_id: String,
    /// Kind of domain object.
    #[validate(length(min = 1, message = "object_type is required"))]
    pub object_type: String,
    /// Reference to the domain object.
    #[validate(length(min = 1, message = "object_id is required"))]
    pub object_id: String,
}

impl From<UpsertBindingRequest> for BindElement {
    fn from(req: UpsertBindingRequest) -> Self {
        Self {
            element_id: req.element_id,
            object_type: req.object_type,
            object_id: req.object_id,
        }
    }
}

/// Query parameters for `GET /api/diagrams`.
///
/// Numeric values that do not parse are ignored, like missing ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListDiagramsParams {
    /// Case-insensitive name search.
    pub q: Option<String>,
    /// Restrict to one owner.
    pub owner_id: Option<String>,
    /// Page size and offset.
    #[serde(flatten)]
    pub page: LimitOffsetParams,
}

impl ListDiagramsParams {
    /// The owner filter, if `owner_id` names a principal.
    pub fn owner(&self) -> Option<PrincipalId> {
        lenient(self.owner_id.as_deref())
    }
}

/// Query parameters selecting one element's binding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementQuery {
    /// Element within the diagram.
    pub element_id: Option<String>,
}
