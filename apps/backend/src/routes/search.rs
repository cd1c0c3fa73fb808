//! Search endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use svp_core::SearchOutcome;

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /api/search?q=
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchOutcome>> {
    let table = state.store.table().await?;
    let outcome = svp_core::search(&table, &query.q, state.scorer.as_ref());
    tracing::debug!(
        query = %outcome.query,
        exact = outcome.exact.as_ref().map(|s| s.total),
        fuzzy = outcome.fuzzy.as_ref().map(|s| s.total),
        "search"
    );
    Ok(Json(outcome))
}
