//! Client configuration loaded from environment variables.
//!
//! Defaults point at a backend on localhost so the dashboard runs with zero
//! configuration during development. Command-line flags override these.

use std::path::PathBuf;

use chatlens_shared::constants::{DEFAULT_API_BASE, DEFAULT_SAMPLE_PATH};

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the insights REST API, including the `/api/v1` prefix.
    /// Env: `CHATLENS_API_BASE`
    /// Default: `http://localhost:8000/api/v1`
    pub api_base: String,

    /// JSON file holding the sample batch uploaded by "Load Sample Data".
    /// Env: `CHATLENS_SAMPLE_PATH`
    /// Default: `fixtures/sample_messages.json`
    pub sample_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            sample_path: PathBuf::from(DEFAULT_SAMPLE_PATH),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(base) = lookup("CHATLENS_API_BASE") {
            match normalize_base(&base) {
                Some(base) => config.api_base = base,
                None => {
                    tracing::warn!(value = %base, "Invalid CHATLENS_API_BASE, using default");
                }
            }
        }

        if let Some(path) = lookup("CHATLENS_SAMPLE_PATH") {
            if !path.trim().is_empty() {
                config.sample_path = PathBuf::from(path);
            }
        }

        config
    }

    /// Override the API base, ignoring values that are not http(s) URLs.
    pub fn with_api_base(mut self, base: &str) -> Self {
        match normalize_base(base) {
            Some(base) => self.api_base = base,
            None => tracing::warn!(value = %base, "Invalid API base, keeping {}", self.api_base),
        }
        self
    }

    pub fn with_sample_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.sample_path = path.into();
        self
    }
}

/// Trim whitespace and trailing slashes; reject anything that is not http(s).
fn normalize_base(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Some(trimmed.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base, "http://localhost:8000/api/v1");
        assert_eq!(config.sample_path, PathBuf::from("fixtures/sample_messages.json"));
    }

    #[test]
    fn test_env_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("CHATLENS_API_BASE", "https://insights.example.com/api/v1/"),
            ("CHATLENS_SAMPLE_PATH", "/tmp/batch.json"),
        ]));
        assert_eq!(config.api_base, "https://insights.example.com/api/v1");
        assert_eq!(config.sample_path, PathBuf::from("/tmp/batch.json"));
    }

    #[test]
    fn test_invalid_base_falls_back() {
        let config = ClientConfig::from_lookup(lookup_from(&[("CHATLENS_API_BASE", "localhost:8000")]));
        assert_eq!(config.api_base, ClientConfig::default().api_base);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::default()
            .with_api_base("http://127.0.0.1:9000/api/v1")
            .with_sample_path("demo.json");
        assert_eq!(config.api_base, "http://127.0.0.1:9000/api/v1");
        assert_eq!(config.sample_path, PathBuf::from("demo.json"));
    }
}
