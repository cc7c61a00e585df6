//! Version history handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::path::{parse_diagram_id, parse_revision};
use crate::extractors::{Caller, LimitOffsetParams, QueryParams};
use crate::state::AppState;

/// GET /api/diagrams/{id}/versions
pub async fn list_versions(
    State(state): State<AppState>,
    _caller: Caller,
    Path(id): Path<String>,
    QueryParams(params): QueryParams<LimitOffsetParams>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_diagram_id(&id)?;
    let versions = state
        .version_service
        .list_versions(id, params.page_request())
        .await?;
    Ok(Json(ApiResponse::ok(versions)))
}

/// GET /api/diagrams/{id}/versions/{revision}
pub async fn get_version(
    State(state): State<AppState>,
    _caller: Caller,
    Path((id, revision)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_diagram_id(&id)?;
    let revision = parse_revision(&revision)?;
    let version = state.version_service.get_version(id, revision).await?;
    Ok(Json(ApiResponse::ok(version)))
}
