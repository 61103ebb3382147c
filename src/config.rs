//! Configuration for the YouTube Data API client.
//!
//! A host application either builds a [`Config`] in code or loads one from a
//! JSONC file. The API key stored here is the default used by every request
//! that does not carry its own key.

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default number of results requested per page of a channel listing.
pub const DEFAULT_MAX_PER_PAGE: u32 = 15;

/// Base URL of the YouTube Data API v3.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Client configuration.
///
/// Every field has a default, so a config file only needs the keys it
/// wants to change.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// YouTube Data API v3 key used when a query does not set one
    pub api_key: String,
    /// Skip TLS certificate verification on outbound requests
    pub accept_invalid_certs: bool,
    /// Default page size for channel listings
    pub max_per_page: u32,
    /// Request timeout in seconds, unset means the transport default
    pub timeout_secs: Option<u64>,
    /// API base URL, without a trailing slash
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            accept_invalid_certs: false,
            max_per_page: DEFAULT_MAX_PER_PAGE,
            timeout_secs: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Default configuration with the given API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Load configuration from file.
    ///
    /// # Arguments
    /// * `path` - Optional path to config file. If None, uses default location.
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    ///
    /// # Details
    /// Searches for config file in:
    /// 1. Provided path (if given)
    /// 2. `$XDG_CONFIG_HOME/youtube-data-api/config.jsonc`
    ///
    /// If no config file exists, returns default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = serde_json::from_str(&strip_line_comments(&content))
            .with_context(|| format!("Failed to deserialize config: {}", config_path.display()))?;

        Ok(config)
    }

    /// Get default configuration file path.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - `$XDG_CONFIG_HOME/youtube-data-api/config.jsonc` or error
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir =
            config_dir().ok_or_else(|| anyhow::anyhow!("Failed to determine config directory"))?;
        Ok(config_dir.join("youtube-data-api").join("config.jsonc"))
    }
}

/// Remove `//` comments from JSONC text.
///
/// A `//` preceded by an odd number of quotes on its line is treated as part
/// of a string. Escaped quotes are not handled.
fn strip_line_comments(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            line.match_indices("//")
                .map(|(pos, _)| pos)
                .find(|&pos| line[..pos].matches('"').count() % 2 == 0)
                .map_or(line, |pos| line[..pos].trim_end())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.api_key.is_empty());
        assert!(!config.accept_invalid_certs);
        assert_eq!(config.max_per_page, 15);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, None);
    }

    #[test]
    fn test_config_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Config::load(Some(&temp_dir.path().join("absent.jsonc"))).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_config_load_all_fields() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.jsonc");

        fs::write(
            &config_path,
            r#"{
                "api_key": "test_key",
                "accept_invalid_certs": true,
                "max_per_page": 40,
                "timeout_secs": 10,
                "base_url": "http://localhost:8080/v3"
            }"#,
        )
        .unwrap();

        let loaded = Config::load(Some(&config_path)).unwrap();
        assert_eq!(
            loaded,
            Config {
                accept_invalid_certs: true,
                max_per_page: 40,
                timeout_secs: Some(10),
                base_url: "http://localhost:8080/v3".to_string(),
                ..Config::with_api_key("test_key")
            }
        );
    }

    #[test]
    fn test_config_jsonc_with_comments() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.jsonc");

        let jsonc_content = r#"{
            // API key for YouTube Data API v3
            "api_key": "test_key",
            "base_url": "http://localhost:8080/v3" // local proxy
        }"#;

        fs::write(&config_path, jsonc_content).unwrap();

        let loaded = Config::load(Some(&config_path)).unwrap();
        assert_eq!(loaded.api_key, "test_key");
        assert_eq!(loaded.base_url, "http://localhost:8080/v3");
        assert_eq!(loaded.max_per_page, DEFAULT_MAX_PER_PAGE);
    }

    #[test]
    fn test_strip_line_comments_keeps_slashes_in_strings() {
        let stripped = strip_line_comments(r#""url": "https://example.com" // trailing"#);
        assert_eq!(stripped, r#""url": "https://example.com""#);
    }
}
