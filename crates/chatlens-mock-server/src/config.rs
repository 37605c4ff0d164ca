//! Mock server configuration loaded from environment variables.
//!
//! All settings have defaults so the mock can start with zero configuration
//! next to a local client.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Mock server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockConfig {
    /// Socket address for the HTTP (axum) API server.
    /// Env: `HTTP_ADDR`
    /// Default: `127.0.0.1:8000`
    pub http_addr: SocketAddr,

    /// JSON file with canned `topics` and `sentiment` payloads.
    /// Env: `MOCK_INSIGHTS_PATH`
    /// Default: none (built-in payloads).
    pub insights_path: Option<PathBuf>,

    /// Answer every analysis request with `503`.
    /// Env: `MOCK_FAIL_ANALYSIS` (true/1)
    /// Default: `false`
    pub fail_analysis: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            http_addr: ([127, 0, 0, 1], 8000).into(),
            insights_path: None,
            fail_analysis: false,
        }
    }
}

impl MockConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = lookup("HTTP_ADDR") {
            if let Ok(parsed) = addr.parse::<SocketAddr>() {
                config.http_addr = parsed;
            } else {
                tracing::warn!(value = %addr, "Invalid HTTP_ADDR, using default");
            }
        }

        if let Some(path) = lookup("MOCK_INSIGHTS_PATH") {
            if !path.trim().is_empty() {
                config.insights_path = Some(PathBuf::from(path));
            }
        }

        if let Some(val) = lookup("MOCK_FAIL_ANALYSIS") {
            config.fail_analysis = val == "true" || val == "1";
        }

        config
    }
}
