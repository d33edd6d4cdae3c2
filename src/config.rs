//! Runtime configuration, read from the environment with defaults.
//!
//! Resolution order: CLI flag > env var > default.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_LOADING_DELAY_MS: u64 = 1000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_STORAGE_PATH: &str = ".data/wandersync.db";

pub const API_URL_VAR: &str = "WANDERSYNC_API_URL";
pub const GOOGLE_CLIENT_ID_VAR: &str = "GOOGLE_CLIENT_ID";
pub const LOADING_DELAY_VAR: &str = "WANDERSYNC_LOADING_DELAY_MS";
pub const TIMEOUT_VAR: &str = "WANDERSYNC_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    /// OAuth client id. `None` disables login.
    pub google_client_id: Option<String>,
    /// Minimum time the "generating" indicator stays up after a plan
    /// request settles.
    pub loading_delay: Duration,
    pub request_timeout: Duration,
    pub storage_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            google_client_id: None,
            loading_delay: Duration::from_millis(DEFAULT_LOADING_DELAY_MS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any variable source. Blank values count as
    /// unset; unparseable numbers fall back to the default with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        Self {
            api_url: get(API_URL_VAR).unwrap_or(defaults.api_url),
            google_client_id: get(GOOGLE_CLIENT_ID_VAR),
            loading_delay: get(LOADING_DELAY_VAR)
                .and_then(|v| parse_number(LOADING_DELAY_VAR, &v))
                .map(Duration::from_millis)
                .unwrap_or(defaults.loading_delay),
            request_timeout: get(TIMEOUT_VAR)
                .and_then(|v| parse_number(TIMEOUT_VAR, &v))
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            storage_path: defaults.storage_path,
        }
    }

    pub fn login_enabled(&self) -> bool {
        self.google_client_id.is_some()
    }
}

fn parse_number(key: &str, value: &str) -> Option<u64> {
    match value.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::warn!(key, value, "ignoring non-numeric setting");
            None
        }
    }
}
