//! Diagram element binding repository.

use async_trait::async_trait;
use sqlx::PgPool;

use archtool_core::error::{AppError, ErrorKind};
use archtool_core::result::AppResult;
use archtool_core::types::{BindingId, DiagramId};
use archtool_entity::binding::{DiagramBinding, UpsertBinding};

use super::db_error;
use crate::store::BindingIndex;

/// PostgreSQL-backed [`BindingIndex`].
#[derive(Debug, Clone)]
pub struct PgBindingRepository {
    pool: PgPool,
}

impl PgBindingRepository {
    /// Create a new binding repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BindingIndex for PgBindingRepository {
    async fn upsert(&self, data: &UpsertBinding) -> AppResult<DiagramBinding> {
        sqlx::query_as::<_, DiagramBinding>(
            "INSERT INTO diagram_bindings (diagram_id, element_id, object_type, object_id, created_by) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (diagram_id, element_id) DO UPDATE SET \
                object_type = EXCLUDED.object_type, \
                object_id = EXCLUDED.object_id, \
                created_by = EXCLUDED.created_by \
             RETURNING *",
        )
        .bind(data.diagram_id)
        .bind(&data.element_id)
        .bind(&data.object_type)
        .bind(&data.object_id)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found(format!("Diagram {} not found", data.diagram_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to upsert binding", e),
        })
    }

    async fn find_by_element(
        &self,
        diagram_id: DiagramId,
        element_id: &str,
    ) -> AppResult<Option<DiagramBinding>> {
        sqlx::query_as::<_, DiagramBinding>(
            "SELECT * FROM diagram_bindings WHERE diagram_id = $1 AND element_id = $2",
        )
        .bind(diagram_id)
        .bind(element_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find binding"))
    }

    async fn delete_by_element(&self, diagram_id: DiagramId, element_id: &str) -> AppResult<u64> {
        let result =
            sqlx::query("DELETE FROM diagram_bindings WHERE diagram_id = $1 AND element_id = $2")
                .bind(diagram_id)
                .bind(element_id)
                .execute(&self.pool)
                .await
                .map_err(db_error("Failed to delete binding"))?;
        Ok(result.rows_affected())
    }

    async fn delete_by_id(&self, diagram_id: DiagramId, id: BindingId) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM diagram_bindings WHERE diagram_id = $1 AND id = $2")
            .bind(diagram_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete binding"))?;
        Ok(result.rows_affected())
    }
}
