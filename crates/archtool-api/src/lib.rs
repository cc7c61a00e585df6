//! # archtool-api
//!
//! HTTP API layer for the diagram backend built on Axum.
//!
//! Provides the REST endpoints for diagrams, their version history, and
//! element bindings, plus middleware (CORS, logging, timeouts),
//! extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
