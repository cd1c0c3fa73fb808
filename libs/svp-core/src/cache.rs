//! Memoized loading of standards tables with explicit invalidation.

use crate::table::StandardTable;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

/// Where a standards table is read from. Doubles as the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Loaded tables keyed by source. Cloning the cache shares the entries.
#[derive(Debug, Clone, Default)]
pub struct CatalogCache {
    entries: Arc<Mutex<HashMap<DataSource, Arc<StandardTable>>>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<DataSource, Arc<StandardTable>>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self, source: &DataSource) -> Option<Arc<StandardTable>> {
        self.entries().get(source).cloned()
    }

    pub fn insert(&self, source: DataSource, table: StandardTable) -> Arc<StandardTable> {
        let table = Arc::new(table);
        self.entries().insert(source, Arc::clone(&table));
        table
    }

    /// Return the cached table or load, cache and return it. A failed load
    /// caches nothing.
    pub fn get_or_load<F, E>(&self, source: &DataSource, load: F) -> Result<Arc<StandardTable>, E>
    where
        F: FnOnce(&DataSource) -> Result<StandardTable, E>,
    {
        if let Some(table) = self.get(source) {
            tracing::debug!(%source, "catalog cache hit");
            return Ok(table);
        }
        tracing::debug!(%source, "catalog cache miss");
        let table = load(source)?;
        Ok(self.insert(source.clone(), table))
    }

    /// Drop one entry; returns whether it was cached.
    pub fn invalidate(&self, source: &DataSource) -> bool {
        let removed = self.entries().remove(source).is_some();
        if removed {
            tracing::info!(%source, "catalog cache invalidated");
        }
        removed
    }

    pub fn clear(&self) {
        self.entries().clear();
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}
