// ⚙️ Configuration - environment variables with fallbacks
//
// A `.env` file in the working directory is loaded first when present.
// Values that fail to parse fall back to their defaults.

use crate::store::{MemoryStore, SharedStore, SqliteStore};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DB_PATH: &str = "swift_codes.db";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_MIGRATION_FILE: &str = "data/swift_codes.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite,
    Memory,
}

impl StoreBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Some(StoreBackend::Sqlite),
            "memory" => Some(StoreBackend::Memory),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub public_host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub store_backend: StoreBackend,
    /// Per-key fetch limit inside an aggregation; unset means none
    pub fetch_timeout: Option<Duration>,
    /// Deadline of the context each HTTP request runs under
    pub request_timeout: Duration,
    pub migration_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            public_host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            store_backend: StoreBackend::Sqlite,
            fetch_timeout: None,
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            migration_file: PathBuf::from(DEFAULT_MIGRATION_FILE),
        }
    }
}

impl Config {
    /// Read the process environment (after `.env`, if any)
    pub fn from_env() -> Self {
        // Missing .env is the normal case
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Config::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Config {
            public_host: get("PUBLIC_HOST").unwrap_or(defaults.public_host),
            port: parse_or("PORT", get("PORT"), defaults.port),
            db_path: get("DB_PATH").map(PathBuf::from).unwrap_or(defaults.db_path),
            store_backend: match get("STORE_BACKEND") {
                Some(raw) => StoreBackend::parse(&raw).unwrap_or_else(|| {
                    warn!(value = %raw, "unknown STORE_BACKEND, using sqlite");
                    defaults.store_backend
                }),
                None => defaults.store_backend,
            },
            fetch_timeout: get("FETCH_TIMEOUT_MS")
                .and_then(|raw| raw.trim().parse::<u64>().ok())
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis),
            request_timeout: Duration::from_millis(parse_or(
                "REQUEST_TIMEOUT_MS",
                get("REQUEST_TIMEOUT_MS"),
                DEFAULT_REQUEST_TIMEOUT_MS,
            )),
            migration_file: get("MIGRATION_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.migration_file),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.public_host, self.port)
    }

    /// Open the configured backend
    pub fn open_store(&self) -> Result<SharedStore> {
        match self.store_backend {
            StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
            StoreBackend::Sqlite => {
                let store = if self.db_path.as_os_str() == ":memory:" {
                    SqliteStore::open_in_memory()?
                } else {
                    SqliteStore::open(&self.db_path).with_context(|| {
                        format!("Failed to open database at {}", self.db_path.display())
                    })?
                };
                Ok(Arc::new(store))
            }
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "unparseable value, using default");
            default
        }),
        None => default,
    }
}
