//! Standards download

use axum::{
    extract::{Query, State},
    response::Response,
};

use crate::error::Result;
use crate::models::*;
use crate::routes::xlsx_response;
use crate::AppState;

/// GET /api/export
pub async fn export(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Response> {
    let selection = query.into_selection()?;
    let resolved = selection.resolve(&state.catalog)?;
    let table = state.store.table().await?;

    let rows = resolved.export_table(&table);
    let bytes = svp_core::export_standards(&rows)?;
    tracing::info!(subject = %selection.subject, cycle = selection.cycle, rows = rows.len(), "standards exported");
    xlsx_response(&resolved.download_name(), bytes)
}
