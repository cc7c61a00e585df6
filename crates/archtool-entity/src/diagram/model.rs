//! Diagram document model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use archtool_core::types::{DiagramId, PrincipalId};

/// Revision assigned to a freshly created diagram.
pub const INITIAL_REVISION: i32 = 1;

/// Current state of a diagram (one row per diagram).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Diagram {
    /// Stable identifier.
    pub id: DiagramId,
    /// Free-text label.
    pub name: String,
    /// Optional classification tag (which registry the diagram belongs to).
    pub registry_type: Option<String>,
    /// Serialized diagram payload. Never interpreted by the store.
    pub content: String,
    /// Principal who created the diagram.
    pub owner_id: Option<PrincipalId>,
    /// Number of accepted updates since creation, offset by
    /// [`INITIAL_REVISION`].
    pub revision: i32,
    /// When the diagram was created.
    pub created_at: DateTime<Utc>,
    /// When the last accepted update happened.
    pub updated_at: DateTime<Utc>,
}

impl Diagram {
    /// Entity tag for this revision, e.g. `"3"`.
    pub fn etag(&self) -> String {
        format!("\"{}\"", self.revision)
    }
}

/// Data required to create a diagram.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDiagram {
    /// Label.
    pub name: String,
    /// Classification tag.
    pub registry_type: Option<String>,
    /// Serialized payload.
    pub content: String,
    /// Creating principal.
    pub owner_id: Option<PrincipalId>,
}

/// A partial update of a diagram.
///
/// `None` means "leave unchanged"; there is no way to clear a field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDiagram {
    /// New label.
    pub name: Option<String>,
    /// New payload.
    pub content: Option<String>,
    /// Revision the caller based its edit on. `None` skips the optimistic
    /// check.
    pub expected_revision: Option<i32>,
    /// Principal performing the update, recorded on the snapshot.
    pub modified_by: Option<PrincipalId>,
}

impl UpdateDiagram {
    /// Apply the supplied fields to `current`, leaving the rest untouched.
    pub fn apply_to(&self, current: &mut Diagram) {
        if let Some(name) = &self.name {
            current.name.clone_from(name);
        }
        if let Some(content) = &self.content {
            current.content.clone_from(content);
        }
    }
}

/// Filters for listing diagrams.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagramFilter {
    /// Restrict to diagrams owned by this principal.
    pub owner_id: Option<PrincipalId>,
    /// Case-insensitive substring match on the name. Blank is ignored.
    pub query: Option<String>,
}

impl DiagramFilter {
    /// The trimmed search term, if one was given.
    pub fn search_term(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    /// Evaluate the filter against a diagram in memory.
    pub fn matches(&self, diagram: &Diagram) -> bool {
        if let Some(owner) = self.owner_id {
            if diagram.owner_id != Some(owner) {
                return false;
            }
        }
        match self.search_term() {
            Some(term) => diagram
                .name
                .to_lowercase()
                .contains(&term.to_lowercase()),
            None => true,
        }
    }
}
