//! Browse endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use svp_core::Document;

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /api/browse
pub async fn browse(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<Document>> {
    let selection = query.into_selection()?;
    let resolved = selection.resolve(&state.catalog)?;
    let table = state.store.table().await?;
    Ok(Json(resolved.browse(&table)))
}
