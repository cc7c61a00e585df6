//! Element binding handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use archtool_core::error::AppError;

use crate::dto::request::{ElementQuery, UpsertBindingRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::path::{parse_binding_id, parse_diagram_id};
use crate::extractors::{Caller, QueryParams, ValidatedJson};
use crate::state::AppState;

fn require_element(query: ElementQuery) -> Result<String, AppError> {
    query
        .element_id
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| AppError::validation("element_id is required"))
}

/// POST /api/diagrams/{id}/bindings
pub async fn upsert_binding(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpsertBindingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_diagram_id(&id)?;
    let binding = state.binding_service.upsert(&caller, id, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(binding))))
}

/// GET /api/diagrams/{id}/bindings?element_id=
pub async fn get_binding(
    State(state): State<AppState>,
    _caller: Caller,
    Path(id): Path<String>,
    QueryParams(query): QueryParams<ElementQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_diagram_id(&id)?;
    let element_id = require_element(query)?;
    let binding = state.binding_service.get(id, &element_id).await?;
    Ok(Json(ApiResponse::ok(binding)))
}

/// DELETE /api/diagrams/{id}/bindings?element_id=
pub async fn delete_binding(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
    QueryParams(query): QueryParams<ElementQuery>,
) -> Result<StatusCode, ApiError> {
    let id = parse_diagram_id(&id)?;
    let element_id = require_element(query)?;
    state.binding_service.delete(&caller, id, &element_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/diagrams/{id}/bindings/{binding_id}
pub async fn delete_binding_by_id(
    State(state): State<AppState>,
    caller: Caller,
    Path((id, binding_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let id = parse_diagram_id(&id)?;
    let binding_id = parse_binding_id(&binding_id)?;
    state
        .binding_service
        .delete_by_id(&caller, id, binding_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
