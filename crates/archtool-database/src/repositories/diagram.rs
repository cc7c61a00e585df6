//! Diagram and version archive repository.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;

use archtool_core::error::{AppError, ErrorKind};
use archtool_core::result::AppResult;
use archtool_core::types::{DiagramId, PageRequest, PageResponse};
use archtool_entity::diagram::model::INITIAL_REVISION;
use archtool_entity::diagram::{CreateDiagram, Diagram, DiagramFilter, DiagramVersion, UpdateDiagram};

use super::{db_error, like_pattern};
use crate::connection::ping;
use crate::store::DiagramStore;

/// PostgreSQL-backed [`DiagramStore`].
#[derive(Debug, Clone)]
pub struct PgDiagramRepository {
    pool: PgPool,
}

impl PgDiagramRepository {
    /// Create a new diagram repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Roll back an update that lost a race and report the revision that
    /// won it.
    async fn lost_race(&self, tx: Transaction<'_, Postgres>, id: DiagramId) -> AppError {
        if let Err(e) = tx.rollback().await {
            return AppError::with_source(ErrorKind::Database, "Failed to roll back diagram update", e);
        }
        match sqlx::query_scalar::<_, i32>("SELECT revision FROM diagrams WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
        {
            Ok(current) => AppError::revision_conflict(current),
            Err(e) => AppError::with_source(ErrorKind::Database, "Failed to read diagram revision", e),
        }
    }
}

#[async_trait]
impl DiagramStore for PgDiagramRepository {
    async fn create(&self, data: &CreateDiagram) -> AppResult<Diagram> {
        sqlx::query_as::<_, Diagram>(
            "INSERT INTO diagrams (id, name, registry_type, content, owner_id, revision) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(DiagramId::new())
        .bind(&data.name)
        .bind(&data.registry_type)
        .bind(&data.content)
        .bind(data.owner_id)
        .bind(INITIAL_REVISION)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create diagram"))
    }

    async fn find_by_id(&self, id: DiagramId) -> AppResult<Option<Diagram>> {
        sqlx::query_as::<_, Diagram>("SELECT * FROM diagrams WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find diagram"))
    }

    async fn list(
        &self,
        filter: &DiagramFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Diagram>> {
        let pattern = filter.search_term().map(like_pattern);

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM diagrams \
             WHERE ($1::BIGINT IS NULL OR owner_id = $1) \
               AND ($2::TEXT IS NULL OR name ILIKE $2)",
        )
        .bind(filter.owner_id)
        .bind(pattern.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count diagrams"))?;

        let items = sqlx::query_as::<_, Diagram>(
            "SELECT * FROM diagrams \
             WHERE ($1::BIGINT IS NULL OR owner_id = $1) \
               AND ($2::TEXT IS NULL OR name ILIKE $2) \
             ORDER BY updated_at DESC, id \
             LIMIT $3 OFFSET $4",
        )
        .bind(filter.owner_id)
        .bind(pattern.as_deref())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list diagrams"))?;

        Ok(PageResponse::new(items, total, page))
    }

    async fn update(&self, id: DiagramId, changes: &UpdateDiagram) -> AppResult<Diagram> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let current = sqlx::query_as::<_, Diagram>("SELECT * FROM diagrams WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error("Failed to read diagram"))?
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

        let snapshot = sqlx::query(
            "INSERT INTO diagram_versions (diagram_id, revision, name, registry_type, content, modified_by) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(current.id)
        .bind(current.revision)
        .bind(&current.name)
        .bind(&current.registry_type)
        .bind(&current.content)
        .bind(changes.modified_by)
        .execute(&mut *tx)
        .await;
        match snapshot {
            Ok(_) => {}
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return Err(self.lost_race(tx, id).await);
            }
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Database,
                    "Failed to write diagram version",
                    e,
                ));
            }
        }

        // Guarded by the revision read above: a row advanced by a competing
        // writer matches nothing and the snapshot is rolled back with it.
        let advanced = sqlx::query_as::<_, Diagram>(
            "UPDATE diagrams SET \
                name = COALESCE($2, name), \
                content = COALESCE($3, content), \
                revision = revision + 1, \
                updated_at = NOW() \
             WHERE id = $1 AND revision = $4 \
             RETURNING *",
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(changes.content.as_deref())
        .bind(current.revision)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Failed to update diagram"))?;
        let Some(updated) = advanced else {
            return Err(self.lost_race(tx, id).await);
        };

        tx.commit()
            .await
            .map_err(db_error("Failed to commit diagram update"))?;

        debug!(diagram_id = %id, revision = updated.revision, "Diagram row advanced");
        Ok(updated)
    }

    async fn delete(&self, id: DiagramId) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let bindings = sqlx::query("DELETE FROM diagram_bindings WHERE diagram_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete diagram bindings"))?;

        let result = sqlx::query("DELETE FROM diagrams WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete diagram"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Diagram {id} not found")));
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit diagram delete"))?;

        debug!(diagram_id = %id, bindings = bindings.rows_affected(), "Diagram deleted");
        Ok(())
    }

    async fn list_versions(
        &self,
        diagram_id: DiagramId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<DiagramVersion>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM diagram_versions WHERE diagram_id = $1")
                .bind(diagram_id)
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("Failed to count diagram versions"))?;

        let items = sqlx::query_as::<_, DiagramVersion>(
            "SELECT * FROM diagram_versions WHERE diagram_id = $1 \
             ORDER BY revision DESC LIMIT $2 OFFSET $3",
        )
        .bind(diagram_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list diagram versions"))?;

        Ok(PageResponse::new(items, total, page))
    }

    async fn find_version(
        &self,
        diagram_id: DiagramId,
        revision: i32,
    ) -> AppResult<Option<DiagramVersion>> {
        sqlx::query_as::<_, DiagramVersion>(
            "SELECT * FROM diagram_versions WHERE diagram_id = $1 AND revision = $2",
        )
        .bind(diagram_id)
        .bind(revision)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find diagram version"))
    }

    async fn health_check(&self) -> AppResult<bool> {
        ping(&self.pool).await
    }
}
