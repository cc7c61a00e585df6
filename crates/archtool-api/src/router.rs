//! Route definitions for the diagram HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState`
//! and passes it to handlers via Axum's `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{delete, get},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let server = &state.config.server;

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(diagram_routes())
        .merge(version_routes())
        .merge(binding_routes());

    // A timed-out request drops its handler future, which rolls back any
    // open transaction.
    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(server.max_body_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.request_timeout_seconds),
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&server.cors))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Diagram CRUD
fn diagram_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/diagrams",
            get(handlers::diagram::list_diagrams).post(handlers::diagram::create_diagram),
        )
        .route(
            "/diagrams/{id}",
            get(handlers::diagram::get_diagram)
                .put(handlers::diagram::update_diagram)
                .delete(handlers::diagram::delete_diagram),
        )
}

/// Read-only version history
fn version_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/diagrams/{id}/versions",
            get(handlers::version::list_versions),
        )
        .route(
            "/diagrams/{id}/versions/{revision}",
            get(handlers::version::get_version),
        )
}

/// Element bindings
fn binding_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/diagrams/{id}/bindings",
            get(handlers::binding::get_binding)
                .post(handlers::binding::upsert_binding)
                .delete(handlers::binding::delete_binding),
        )
        .route(
            "/diagrams/{id}/bindings/{binding_id}",
            delete(handlers::binding::delete_binding_by_id),
        )
}
