//! Configuration management for docdex
//!
//! This crate handles loading and validating the optional `docdex.toml`
//! configuration file. Every field has a default, so running without a config
//! file is the normal case.

use docdex_common::{DocdexError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Environment variable holding the search API credential.
pub const API_KEY_ENV: &str = "SERPER_API_KEY";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Search API settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Page fetcher settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Extra library registry entries
    #[serde(default)]
    pub registry: RegistryConfig,
}

/// Search API configuration ([search])
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search API endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Number of organic results requested per query
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://google.serper.dev/search".to_string()
}
fn default_result_limit() -> usize {
    2
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            result_limit: default_result_limit(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Page fetcher configuration ([fetch])
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with outbound requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_user_agent() -> String {
    concat!("docdex/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Registry configuration ([registry])
///
/// Entries here are merged over the built-in library table at startup.
/// The registry is immutable once the process is serving.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// library name -> documentation domain path
    #[serde(default)]
    pub libraries: HashMap<String, String>,
}

impl Config {
    /// Load configuration from an optional file path
    ///
    /// `None` or a missing file yields the default configuration. A file that
    /// exists but fails to read or parse is a `ConfigError`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p,
            None => return Ok(Self::default()),
        };

        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| DocdexError::ConfigError(format!("Failed to read config: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| DocdexError::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Read the search API key from the process environment
    ///
    /// A missing key is not an error here: searches will fail upstream and
    /// degrade to empty results, which is the documented behavior.
    pub fn api_key() -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_file() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.search.endpoint, "https://google.serper.dev/search");
        assert_eq!(config.search.result_limit, 2);
        assert_eq!(config.search.timeout_secs, 30);
        assert_eq!(config.fetch.timeout_secs, 30);
        assert!(config.registry.libraries.is_empty());
    }

    #[test]
    fn missing_file_is_defaults() {
        let config = Config::load(Some(Path::new("/nonexistent/docdex.toml"))).unwrap();
        assert_eq!(config.search.result_limit, 2);
    }

    #[test]
    fn parses_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[search]
result_limit = 5

[registry.libraries]
fastapi = "fastapi.tiangolo.com"
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.search.result_limit, 5);
        // Unset fields keep their defaults
        assert_eq!(config.search.timeout_secs, 30);
        assert_eq!(
            config.registry.libraries.get("fastapi").map(String::as_str),
            Some("fastapi.tiangolo.com")
        );
    }

    #[test]
    fn malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [[[").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, DocdexError::ConfigError(_)));
    }
}
