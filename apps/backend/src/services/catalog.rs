//! Loading and caching of the standards table.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use sha2::{Digest, Sha256};
use svp_core::{CatalogCache, DataSource, StandardTable};

use crate::error::{ApiError, Result};

/// What is currently loaded.
#[derive(Debug, Clone, Serialize)]
pub struct SourceInfo {
    pub location: String,
    pub rows: usize,
    /// SHA-256 of the loaded text.
    pub fingerprint: String,
}

/// The configured data source and its cached table.
pub struct CatalogStore {
    source: DataSource,
    cache: CatalogCache,
    client: reqwest::Client,
    info: Mutex<Option<SourceInfo>>,
}

impl CatalogStore {
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            cache: CatalogCache::new(),
            client: reqwest::Client::new(),
            info: Mutex::new(None),
        }
    }

    /// Shared handle to the cache, for invalidation from outside.
    pub fn cache(&self) -> CatalogCache {
        self.cache.clone()
    }

    /// The loaded table, reading the source on a cache miss.
    pub async fn table(&self) -> Result<Arc<StandardTable>> {
        if let Some(table) = self.cache.get(&self.source) {
            return Ok(table);
        }

        let content = self.read_source().await?;
        self.cache.get_or_load(&self.source, |source| -> Result<StandardTable> {
            let table = svp_core::load(&content)?;
            let info = SourceInfo {
                location: source.to_string(),
                rows: table.len(),
                fingerprint: hash_content(&content),
            };
            tracing::info!(source = %info.location, rows = info.rows, fingerprint = %info.fingerprint, "standards table loaded");

            if let Ok(mut current) = self.info.lock() {
                *current = Some(info);
            }
            Ok(table)
        })
    }

    /// Drop the cached table and load it again.
    pub async fn reload(&self) -> Result<Arc<StandardTable>> {
        self.cache.invalidate(&self.source);
        if let Ok(mut current) = self.info.lock() {
            *current = None;
        }
        self.table().await
    }

    pub fn info(&self) -> Option<SourceInfo> {
        self.info.lock().ok().and_then(|info| info.clone())
    }

    async fn read_source(&self) -> Result<String> {
        match &self.source {
            DataSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| ApiError::Fetch(format!("{}: {}", path.display(), e))),
            DataSource::Url(url) => {
                let response = self
                    .client
                    .get(url)
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| ApiError::Fetch(e.to_string()))?;
                response.text().await.map_err(|e| ApiError::Fetch(e.to_string()))
            }
        }
    }
}

/// Hex SHA-256 of the source text.
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
