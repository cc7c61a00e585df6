//! Diagram element binding model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use archtool_core::types::{BindingId, DiagramId, PrincipalId};

/// Links one diagram element to an external domain object.
///
/// At most one binding exists per `(diagram_id, element_id)`. The
/// referenced object is never validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DiagramBinding {
    /// Surrogate key, preserved across upserts of the same pair.
    pub id: BindingId,
    /// Owning diagram.
    pub diagram_id: DiagramId,
    /// Element (cell) id inside the diagram payload.
    pub element_id: String,
    /// Kind of domain object, e.g. `"application"`.
    pub object_type: String,
    /// Opaque reference to the domain object.
    pub object_id: String,
    /// Principal who last wrote the binding.
    pub created_by: Option<PrincipalId>,
}

/// Input of a binding upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertBinding {
    /// Owning diagram.
    pub diagram_id: DiagramId,
    /// Element id.
    pub element_id: String,
    /// Kind of domain object.
    pub object_type: String,
    /// Domain object reference.
    pub object_id: String,
    /// Writing principal.
    pub created_by: Option<PrincipalId>,
}
