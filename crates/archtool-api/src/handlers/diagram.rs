//! Diagram CRUD handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

use crate::dto::request::{CreateDiagramRequest, ListDiagramsParams, UpdateDiagramRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::path::parse_diagram_id;
use crate::extractors::{Caller, IfMatch, QueryParams, ValidatedJson};
use crate::state::AppState;

/// POST /api/diagrams
pub async fn create_diagram(
    State(state): State<AppState>,
    caller: Caller,
    ValidatedJson(req): ValidatedJson<CreateDiagramRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let diagram = state.diagram_service.create(&caller, req.into()).await?;
    Ok((
        StatusCode::CREATED,
        [(header::ETAG, diagram.etag())],
        Json(ApiResponse::ok(diagram)),
    ))
}

/// GET /api/diagrams?q=&owner_id=&limit=&offset=
pub async fn list_diagrams(
    State(state): State<AppState>,
    _caller: Caller,
    QueryParams(params): QueryParams<ListDiagramsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = params.page.page_request();
    let diagrams = state
        .diagram_service
        .list(params.owner(), params.q, page)
        .await?;
    Ok(Json(ApiResponse::ok(diagrams)))
}

/// GET /api/diagrams/{id}
pub async fn get_diagram(
    State(state): State<AppState>,
    _caller: Caller,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_diagram_id(&id)?;
    let diagram = state.diagram_service.get(id).await?;
    Ok(([(header::ETAG, diagram.etag())], Json(ApiResponse::ok(diagram))))
}

/// PUT /api/diagrams/{id}
pub async fn update_diagram(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
    IfMatch(expected_revision): IfMatch,
    ValidatedJson(req): ValidatedJson<UpdateDiagramRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_diagram_id(&id)?;
    let diagram = state
        .diagram_service
        .update(&caller, id, req.into(), expected_revision)
        .await?;
    Ok(([(header::ETAG, diagram.etag())], Json(ApiResponse::ok(diagram))))
}

/// DELETE /api/diagrams/{id}
pub async fn delete_diagram(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_diagram_id(&id)?;
    state.diagram_service.delete(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
