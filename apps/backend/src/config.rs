//! Server configuration from environment variables.

use std::path::PathBuf;

use anyhow::Context;
use svp_core::DataSource;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_PATH: &str = "standardy_svp.csv";
const DEFAULT_SESSION_TTL_MINUTES: i64 = 240;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_path: PathBuf,
    /// Remote table; wins over `data_path` when set.
    pub data_url: Option<String>,
    /// Invalidate the cache when the data file changes.
    pub watch: bool,
    pub session_ttl: chrono::Duration,
}

impl Config {
    /// Read `HOST`, `PORT`, `SVP_DATA_PATH`, `SVP_DATA_URL`, `SVP_WATCH` and
    /// `SVP_SESSION_TTL_MINUTES`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(raw) => raw.parse().with_context(|| format!("invalid PORT: {}", raw))?,
            None => DEFAULT_PORT,
        };
        let watch = match var("SVP_WATCH") {
            Some(raw) => parse_flag(&raw).with_context(|| format!("invalid SVP_WATCH: {}", raw))?,
            None => true,
        };
        let ttl_minutes = match var("SVP_SESSION_TTL_MINUTES") {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|m| *m > 0)
                .with_context(|| format!("invalid SVP_SESSION_TTL_MINUTES: {}", raw))?,
            None => DEFAULT_SESSION_TTL_MINUTES,
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            data_path: PathBuf::from(var("SVP_DATA_PATH").unwrap_or_else(|| DEFAULT_DATA_PATH.to_string())),
            data_url: var("SVP_DATA_URL"),
            watch,
            session_ttl: chrono::Duration::minutes(ttl_minutes),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn source(&self) -> DataSource {
        match &self.data_url {
            Some(url) => DataSource::Url(url.clone()),
            None => DataSource::File(self.data_path.clone()),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
