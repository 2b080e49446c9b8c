//! Client configuration
//!
//! A single `Config { base_url }` with a compiled-in default; `Config::new`
//! exists so tests can point the client at an in-process mock backend. No
//! flags, no environment variables, no persisted state.

/// Compiled-in default backend base URL.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/v1";

/// Configuration for the backend client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL the API client targets (no trailing slash).
    pub base_url: String,
}

impl Config {
    /// Build a config pointing at an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}
