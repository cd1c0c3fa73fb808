pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use svp_core::{DataSource, SimilarityScorer, SubjectCatalog, TokenSetRatio};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::catalog::CatalogStore;
use crate::services::sessions::AssignmentSessions;
use crate::services::watcher::SourceWatcher;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<SubjectCatalog>,
    pub store: Arc<CatalogStore>,
    pub sessions: Arc<AssignmentSessions>,
    pub scorer: Arc<dyn SimilarityScorer>,
}

impl AppState {
    pub fn new(store: CatalogStore, session_ttl: chrono::Duration) -> Self {
        Self {
            catalog: Arc::new(SubjectCatalog::standard()),
            store: Arc::new(store),
            sessions: Arc::new(AssignmentSessions::new(session_ttl)),
            scorer: Arc::new(TokenSetRatio),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/catalog", get(routes::catalog::get))
        .route("/api/catalog/reload", post(routes::catalog::reload))
        .route("/api/browse", get(routes::browse::browse))
        .route("/api/search", get(routes::search::search))
        .route("/api/export", get(routes::export::export))
        .route("/api/assignments", post(routes::assignments::create))
        .route(
            "/api/assignments/:id",
            get(routes::assignments::get)
                .patch(routes::assignments::update)
                .delete(routes::assignments::delete),
        )
        .route("/api/assignments/:id/export", get(routes::assignments::export))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let source = config.source();

    tracing::info!(%source, "Loading standards table...");
    let store = CatalogStore::new(source.clone());
    store.table().await?;

    // Held for the lifetime of the server.
    let _watcher = match &source {
        DataSource::File(path) if config.watch => {
            Some(SourceWatcher::start(path.clone(), store.cache())?)
        }
        _ => None,
    };

    let app = router(AppState::new(store, config.session_ttl));

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
