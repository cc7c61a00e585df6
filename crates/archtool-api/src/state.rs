//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use archtool_auth::JwtDecoder;
use archtool_core::config::AppConfig;
use archtool_database::Stores;
use archtool_service::{BindingService, DiagramService, VersionService};

/// Shared application state passed to every Axum handler via `State`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Store handles.
    pub stores: Stores,
    /// Bearer token validation.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Diagram CRUD and updates.
    pub diagram_service: Arc<DiagramService>,
    /// Version archive reads.
    pub version_service: Arc<VersionService>,
    /// Element bindings.
    pub binding_service: Arc<BindingService>,
}

impl AppState {
    /// Wires the services over `stores`.
    pub fn new(config: AppConfig, stores: Stores) -> Self {
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let diagram_service = Arc::new(DiagramService::new(Arc::clone(&stores.diagrams)));
        let version_service = Arc::new(VersionService::new(Arc::clone(&stores.diagrams)));
        let binding_service = Arc::new(BindingService::new(Arc::clone(&stores.bindings)));

        Self {
            config: Arc::new(config),
            stores,
            jwt_decoder,
            diagram_service,
            version_service,
            binding_service,
        }
    }
}
