//! Catalogue endpoints

use axum::{extract::State, Json};
use svp_core::{Discipline, LiteracyFilter};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /api/catalog
pub async fn get(State(state): State<AppState>) -> Json<CatalogResponse> {
    let catalog = &state.catalog;
    let legend = LiteracyFilter::ALL
        .into_iter()
        .filter(|f| *f != LiteracyFilter::All)
        .map(|f| format!("{} {}", f.label(), f.icons()))
        .collect();

    Json(CatalogResponse {
        areas: catalog.areas.clone(),
        groups: catalog.groups.clone(),
        subjects: catalog.subjects.clone(),
        literacies: LiteracyFilter::ALL.into_iter().map(LiteracyOption::from).collect(),
        legend,
        disciplines: Discipline::ALL
            .into_iter()
            .map(|d| DisciplineOption {
                code: d.code(),
                label: d.label(),
            })
            .collect(),
        source: state.store.info(),
    })
}

/// POST /api/catalog/reload
pub async fn reload(State(state): State<AppState>) -> Result<Json<ReloadResponse>> {
    state.store.reload().await?;
    let source = state
        .store
        .info()
        .ok_or_else(|| crate::error::ApiError::Internal("source info missing after reload".into()))?;
    Ok(Json(ReloadResponse { source }))
}
