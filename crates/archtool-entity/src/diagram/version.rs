//! Diagram version snapshot entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use archtool_core::types::{DiagramId, PrincipalId};

use super::model::Diagram;

/// The state of a diagram at a superseded revision. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DiagramVersion {
    /// The diagram this snapshot belongs to.
    pub diagram_id: DiagramId,
    /// The revision the diagram had before the update that superseded it.
    pub revision: i32,
    /// Label at that revision.
    pub name: String,
    /// Classification tag at that revision.
    pub registry_type: Option<String>,
    /// Payload at that revision.
    pub content: String,
    /// Principal whose update superseded this revision.
    pub modified_by: Option<PrincipalId>,
    /// When the snapshot was written.
    pub created_at: DateTime<Utc>,
}

impl DiagramVersion {
    /// Capture the pre-update state of `diagram`.
    pub fn capture(
        diagram: &Diagram,
        modified_by: Option<PrincipalId>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            diagram_id: diagram.id,
            revision: diagram.revision,
            name: diagram.name.clone(),
            registry_type: diagram.registry_type.clone(),
            content: diagram.content.clone(),
            modified_by,
            created_at: at,
        }
    }
}
