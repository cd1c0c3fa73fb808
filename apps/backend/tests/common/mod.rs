//! Common test utilities for integration tests.
//!
//! Every context writes a small standards table into its own temporary
//! directory, so tests run without network access and in parallel.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use axum::Router;
use tempfile::TempDir;

use svp_backend::services::catalog::CatalogStore;
use svp_backend::{router, AppState};
use svp_core::DataSource;

/// Columns and rows of the fixture table, tab-separated.
pub const FIXTURE_TABLE: &str = concat!(
    "predmet\tcyklus\ttyp\tkomponent\ttema\ttyp_standardu\tid\tdefinicia\tFinančná gramotnosť\n",
    "Matematika\t3\tHlavný cieľ\t\t\t\tmt3-hc-001\trozvíjať matematické myslenie\t\n",
    "Matematika\t3\tCieľ\t\t\t\tmt3-c-001\triešiť úlohy z praxe\t\n",
    "Matematika\t3\tVýkonový štandard\tČísla\t\t\tmt3-v-001\tpočítať so zlomkami\tx\n",
    "Matematika\t3\tObsahový štandard\tČísla\tÚvod\t\tmt3-o-004\túvod do čísel\t\n",
    "Matematika\t3\tObsahový štandard\tČísla\tZlomky\tPojmy\tmt3-o-001\tzlomok, čitateľ, menovateľ\t\n",
    "Matematika\t3\tObsahový štandard\tČísla\tZlomky\tVzťahy\tmt3-o-002\tporovnávanie zlomkov\t\n",
    "Matematika\t3\tObsahový štandard\tGeometria\tKruh\tPojmy\tmt3-o-003\tkruh a kružnica\tx\n",
    "Matematika\t2\tObsahový štandard\tČísla\tNásobenie\t\tmt2-o-001\tmalá násobilka\t\n",
    "Človek a príroda\t3\tObsahový štandard\tLátky\tZmesi\t\tcp3-o-001\troztoky<sup>CH</sup>\t\n",
    "Človek a príroda\t3\tObsahový štandard\tSily\tPohyb\t\tcp3-o-002\tgravitačná sila<sup>F</sup>\t\n",
);

/// Rows in [`FIXTURE_TABLE`].
pub const FIXTURE_ROWS: usize = 10;

/// Test context: a data file in a temporary directory and a router over it.
pub struct TestContext {
    dir: TempDir,
    path: PathBuf,
    app: Router,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_table(FIXTURE_TABLE).await
    }

    pub async fn with_table(content: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("standardy_svp.csv");
        std::fs::write(&path, content).expect("Failed to write fixture table");

        let store = CatalogStore::new(DataSource::File(path.clone()));
        store.table().await.expect("Failed to load fixture table");

        let state = AppState::new(store, chrono::Duration::minutes(30));
        let app = router(state);

        Self { dir, path, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn data_path(&self) -> &Path {
        &self.path
    }

    /// Replace the data file on disk.
    pub fn rewrite_table(&self, content: &str) {
        std::fs::write(&self.path, content).expect("Failed to rewrite fixture table");
    }
}
