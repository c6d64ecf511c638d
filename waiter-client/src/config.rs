//! Client configuration

use std::path::PathBuf;

use crate::error::ClientResult;
use crate::http::NetworkHttpClient;
use crate::store::{JsonFileStore, KeyValueStore, MemoryStore};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variables read by [`ClientConfig::from_env`]
pub const ENV_TIMEOUT: &str = "WAITER_HTTP_TIMEOUT";
pub const ENV_STORE_PATH: &str = "WAITER_STORE_PATH";
pub const ENV_LOG: &str = "WAITER_LOG";

/// Client configuration
///
/// The backend endpoint is not part of this: it is entered by staff at
/// runtime and lives in the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Request timeout in seconds
    pub timeout: u64,

    /// JSON file backing the key-value store (`None` keeps everything in memory)
    pub store_path: Option<PathBuf>,

    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT_SECS,
            store_path: None,
            log_level: "info".to_string(),
        }
    }

    /// Load configuration from the environment (and `.env` if present)
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    ///
    /// Unset, blank or unparseable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();

        if let Some(raw) = lookup(ENV_TIMEOUT) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = secs,
                _ => tracing::warn!(value = %raw, "Ignoring invalid {}", ENV_TIMEOUT),
            }
        }
        if let Some(path) = lookup(ENV_STORE_PATH).filter(|p| !p.trim().is_empty()) {
            config.store_path = Some(PathBuf::from(path));
        }
        if let Some(level) = lookup(ENV_LOG).filter(|l| !l.trim().is_empty()) {
            config.log_level = level;
        }

        config
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Persist the key-value store to this file
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = Some(path.into());
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::new(self.timeout)
    }

    /// Open the configured key-value store
    pub fn open_store(&self) -> ClientResult<Box<dyn KeyValueStore>> {
        match &self.store_path {
            Some(path) => Ok(Box::new(JsonFileStore::open(path)?)),
            None => Ok(Box::new(MemoryStore::new())),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
