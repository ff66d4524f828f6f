//! Client configuration parsed from environment variables.
//!
//! Only the backend base URL is required in practice; it defaults to a
//! local development server when unset. Requests carry no timeout unless
//! `COURTSIDE_REQUEST_TIMEOUT_SECS` is set.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const API_VERSION_PREFIX: &str = "/api/v1";
pub const STATE_DIR_NAME: &str = "courtside";

pub const API_URL_VAR: &str = "COURTSIDE_API_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "COURTSIDE_REQUEST_TIMEOUT_SECS";
pub const STATE_DIR_VAR: &str = "COURTSIDE_STATE_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin without the version prefix, trailing slash trimmed.
    pub api_url: String,
    pub request_timeout: Option<Duration>,
    /// Directory holding the persisted token slot.
    pub state_dir: PathBuf,
}

impl ClientConfig {
    /// Build config from process environment.
    ///
    /// - `COURTSIDE_API_URL`: backend origin, default `http://localhost:8000`
    /// - `COURTSIDE_REQUEST_TIMEOUT_SECS`: per-request timeout, unset = none
    /// - `COURTSIDE_STATE_DIR`: token directory, default platform data dir
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. `from_env` delegates here.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup(API_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());

        let request_timeout = lookup(REQUEST_TIMEOUT_VAR)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let state_dir = lookup(STATE_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .map_or_else(default_state_dir, PathBuf::from);

        Self { api_url: normalize_base_url(&api_url), request_timeout, state_dir }
    }

    /// Config pointing at an explicit origin with no timeout. Used by tests
    /// and embedders that manage their own storage.
    #[must_use]
    pub fn with_api_url(api_url: &str) -> Self {
        Self { api_url: normalize_base_url(api_url), request_timeout: None, state_dir: default_state_dir() }
    }

    /// Point at another origin, normalized like the env value.
    pub fn set_api_url(&mut self, api_url: &str) {
        self.api_url = normalize_base_url(api_url);
    }

    /// Versioned API root: origin + `/api/v1`.
    #[must_use]
    pub fn api_root(&self) -> String {
        format!("{}{API_VERSION_PREFIX}", self.api_url)
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn default_state_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(STATE_DIR_NAME)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
