//! Storage traits for the diagram store and the binding index.
//!
//! Both traits are implemented by the PostgreSQL repositories in
//! [`crate::repositories`] and by the in-memory backend in
//! [`crate::memory`]. Implementations hold no per-request state; every
//! coordination guarantee comes from the backing store.

use async_trait::async_trait;

use archtool_core::result::AppResult;
use archtool_core::types::{BindingId, DiagramId, PageRequest, PageResponse};
use archtool_entity::binding::{DiagramBinding, UpsertBinding};
use archtool_entity::diagram::{CreateDiagram, Diagram, DiagramFilter, DiagramVersion, UpdateDiagram};

/// Current-state table of diagrams plus their append-only version archive.
#[async_trait]
pub trait DiagramStore: Send + Sync + std::fmt::Debug {
    /// Insert a new diagram at the initial revision.
    async fn create(&self, data: &CreateDiagram) -> AppResult<Diagram>;

    /// Find a diagram by id.
    async fn find_by_id(&self, id: DiagramId) -> AppResult<Option<Diagram>>;

    /// List diagrams matching `filter`, newest update first.
    async fn list(
        &self,
        filter: &DiagramFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Diagram>>;

    /// Atomically snapshot the current state and advance the diagram by one
    /// revision.
    ///
    /// Fails with `NotFound` if the diagram does not exist and with
    /// `Conflict` if `expected_revision` is stale or a concurrent update
    /// advanced the row first. On failure nothing is written.
    async fn update(&self, id: DiagramId, changes: &UpdateDiagram) -> AppResult<Diagram>;

    /// Delete a diagram and every binding that references it.
    ///
    /// Fails with `NotFound` if no row was removed. Version history is kept.
    async fn delete(&self, id: DiagramId) -> AppResult<()>;

    /// List the snapshots of a diagram, highest revision first.
    async fn list_versions(
        &self,
        diagram_id: DiagramId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<DiagramVersion>>;

    /// Find the snapshot of a diagram at `revision`.
    async fn find_version(
        &self,
        diagram_id: DiagramId,
        revision: i32,
    ) -> AppResult<Option<DiagramVersion>>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// Secondary index from `(diagram_id, element_id)` to a domain object.
#[async_trait]
pub trait BindingIndex: Send + Sync + std::fmt::Debug {
    /// Insert a binding, or overwrite the existing one for the same pair
    /// while keeping its id.
    ///
    /// Fails with `NotFound` when the diagram does not exist.
    async fn upsert(&self, data: &UpsertBinding) -> AppResult<DiagramBinding>;

    /// Find the binding of one element.
    async fn find_by_element(
        &self,
        diagram_id: DiagramId,
        element_id: &str,
    ) -> AppResult<Option<DiagramBinding>>;

    /// Remove the binding of one element. Returns the number of rows
    /// removed (0 or 1).
    async fn delete_by_element(&self, diagram_id: DiagramId, element_id: &str) -> AppResult<u64>;

    /// Remove a binding by its surrogate id within a diagram. Returns the
    /// number of rows removed (0 or 1).
    async fn delete_by_id(&self, diagram_id: DiagramId, id: BindingId) -> AppResult<u64>;
}
