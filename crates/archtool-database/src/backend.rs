//! Backend selection from configuration.

use std::sync::Arc;

use tracing::info;

use archtool_core::config::{DatabaseConfig, StoreBackend};
use archtool_core::error::AppError;

use crate::connection::DatabasePool;
use crate::memory;
use crate::migration;
use crate::repositories::{PgBindingRepository, PgDiagramRepository};
use crate::store::{BindingIndex, DiagramStore};

/// The store handles shared by every request.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Diagram store and version archive.
    pub diagrams: Arc<dyn DiagramStore>,
    /// Element binding index.
    pub bindings: Arc<dyn BindingIndex>,
    /// The PostgreSQL pool, when that backend is in use.
    pub pool: Option<DatabasePool>,
}

impl Stores {
    /// Open the configured backend, running migrations if enabled.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        match config.backend {
            StoreBackend::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    migration::run_migrations(pool.pool()).await?;
                }
                Ok(Self::postgres(pool))
            }
            StoreBackend::Memory => {
                info!("Using in-memory diagram store; data will not survive a restart");
                Ok(Self::memory())
            }
        }
    }

    /// Stores over an existing PostgreSQL pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        Self {
            diagrams: Arc::new(PgDiagramRepository::new(pool.pool().clone())),
            bindings: Arc::new(PgBindingRepository::new(pool.pool().clone())),
            pool: Some(pool),
        }
    }

    /// Stores over fresh in-memory state.
    pub fn memory() -> Self {
        let (diagrams, bindings) = memory::memory_backend();
        Self {
            diagrams: Arc::new(diagrams),
            bindings: Arc::new(bindings),
            pool: None,
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
