//! Grade-year assignment endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::xlsx_response;
use crate::AppState;

fn not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("assignment {}", id))
}

/// POST /api/assignments
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateAssignmentRequest>,
) -> Result<(StatusCode, Json<AssignmentResponse>)> {
    let selection = req.into_selection();
    let table = state.store.table().await?;
    let grid = selection.resolve(&state.catalog)?.assignment(&table)?;

    let (id, session) = state.sessions.create(selection, grid).await;
    Ok((StatusCode::CREATED, Json(AssignmentResponse::new(id, &session))))
}

/// GET /api/assignments/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<AssignmentResponse>> {
    let session = state.sessions.get(id).await.ok_or_else(|| not_found(id))?;
    Ok(Json(AssignmentResponse::new(id, &session)))
}

/// PATCH /api/assignments/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAssignmentRequest>,
) -> Result<Json<AssignmentResponse>> {
    let response = state
        .sessions
        .update(id, |session| {
            session.grid.apply(&req.edits)?;
            Ok::<_, ApiError>(AssignmentResponse::new(id, session))
        })
        .await
        .ok_or_else(|| not_found(id))??;
    tracing::debug!(%id, edits = req.edits.len(), "assignment updated");
    Ok(Json(response))
}

/// DELETE /api/assignments/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// GET /api/assignments/:id/export
pub async fn export(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Response> {
    let session = state.sessions.get(id).await.ok_or_else(|| not_found(id))?;
    let bytes = svp_core::export_assignment(&session.grid)?;
    let resolved = session.selection.resolve(&state.catalog)?;
    let filename = resolved.download_name().replace(".xlsx", "_rocniky.xlsx");
    xlsx_response(&filename, bytes)
}
