//! Read access to the version archive.

use std::sync::Arc;

use tracing::debug;

use archtool_core::error::AppError;
use archtool_core::types::{DiagramId, PageRequest, PageResponse};
use archtool_database::DiagramStore;
use archtool_entity::diagram::DiagramVersion;

/// Lists and fetches historical snapshots of a diagram.
///
/// Snapshots are only ever written by [`super::DiagramService::update`].
#[derive(Debug, Clone)]
pub struct VersionService {
    store: Arc<dyn DiagramStore>,
}

impl VersionService {
    /// Creates a new version service.
    pub fn new(store: Arc<dyn DiagramStore>) -> Self {
        Self { store }
    }

    /// Lists snapshots, highest revision first.
    pub async fn list_versions(
        &self,
        diagram_id: DiagramId,
        page: PageRequest,
    ) -> Result<PageResponse<DiagramVersion>, AppError> {
        debug!(diagram_id = %diagram_id, "Listing diagram versions");
        self.store.list_versions(diagram_id, &page).await
    }

    /// Gets the snapshot taken at `revision`.
    pub async fn get_version(
        &self,
        diagram_id: DiagramId,
        revision: i32,
    ) -> Result<DiagramVersion, AppError> {
        self.store
            .find_version(diagram_id, revision)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Version {revision} of diagram {diagram_id} not found"
                ))
            })
    }
}
