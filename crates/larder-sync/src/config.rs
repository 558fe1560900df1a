//! # Client Configuration
//!
//! Configuration management for the catalog client.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     LARDER_API_URL=https://example.mockapi.io                          │
//! │     LARDER_DEBOUNCE_MS=300                                             │
//! │     LARDER_PAGE_SIZE=8                                                 │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/catalog/client.toml (Linux)                              │
//! │     ~/Library/Application Support/com.larder.catalog/client.toml       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # client.toml
//! [api]
//! base_url = "https://6852821e0594059b23cdd834.mockapi.io"
//! collection = "Food"
//!
//! [search]
//! debounce_ms = 300
//!
//! [display]
//! page_size = 8
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Default remote collection host.
pub const DEFAULT_API_BASE_URL: &str = "https://6852821e0594059b23cdd834.mockapi.io";

/// Default collection path segment.
pub const DEFAULT_COLLECTION: &str = "Food";

/// Default search debounce window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

// =============================================================================
// API Settings
// =============================================================================

/// Where the remote collection lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Scheme and host (optionally a path prefix) of the API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Collection name appended to `base_url`.
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            collection: default_collection(),
        }
    }
}

impl ApiSettings {
    /// Full URL of the collection, e.g. `https://host/Food`.
    pub fn collection_url(&self) -> ClientResult<Url> {
        let mut base = Url::parse(&self.base_url)?;
        base.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(format!("cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .push(&self.collection);
        Ok(base)
    }
}

// =============================================================================
// Search Settings
// =============================================================================

/// Search box behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Quiet window before a search term is sent (milliseconds).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl SearchSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

// =============================================================================
// Display Settings
// =============================================================================

/// List presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Items revealed per "load more" step.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    larder_core::ITEMS_PER_PAGE
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            page_size: default_page_size(),
        }
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub search: SearchSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (client.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file, creating the parent directory.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Client config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.collection.trim().is_empty() {
            return Err(ClientError::InvalidConfig(
                "collection must not be empty".into(),
            ));
        }

        self.api.collection_url()?;

        if self.display.page_size == 0 {
            return Err(ClientError::InvalidConfig(
                "page_size must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("LARDER_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Ok(ms) = std::env::var("LARDER_DEBOUNCE_MS") {
            match ms.parse::<u64>() {
                Ok(ms) => self.search.debounce_ms = ms,
                Err(_) => warn!(value = %ms, "Ignoring non-numeric LARDER_DEBOUNCE_MS"),
            }
        }

        if let Ok(size) = std::env::var("LARDER_PAGE_SIZE") {
            match size.parse::<usize>() {
                Ok(size) => self.display.page_size = size,
                Err(_) => warn!(value = %size, "Ignoring non-numeric LARDER_PAGE_SIZE"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "larder", "catalog")
            .map(|dirs| dirs.config_dir().join("client.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the debounce window.
    pub fn debounce(&self) -> Duration {
        self.search.debounce()
    }

    /// Returns the collection URL.
    pub fn collection_url(&self) -> ClientResult<Url> {
        self.api.collection_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.api.collection, "Food");
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.display.page_size, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_collection_url() {
        let mut api = ApiSettings::default();
        assert_eq!(
            api.collection_url().unwrap().as_str(),
            "https://6852821e0594059b23cdd834.mockapi.io/Food"
        );

        api.base_url = "http://localhost:8080/api/v1/".into();
        assert_eq!(
            api.collection_url().unwrap().as_str(),
            "http://localhost:8080/api/v1/Food"
        );
    }

    #[test]
    fn test_config_validation() {
        let mut config = ClientConfig::default();

        config.api.base_url = "ftp://example.com".into();
        assert!(matches!(config.validate(), Err(ClientError::InvalidUrl(_))));

        config.api.base_url = "http://localhost:3000".into();
        config.display.page_size = 0;
        assert!(matches!(config.validate(), Err(ClientError::InvalidConfig(_))));

        config.display.page_size = 8;
        config.api.collection = " ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
            [search]
            debounce_ms = 150
            "#,
        )
        .unwrap();
        assert_eq!(config.search.debounce_ms, 150);
        assert_eq!(config.api, ApiSettings::default());
        assert_eq!(config.display.page_size, 8);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("client.toml");

        let mut config = ClientConfig::default();
        config.api.base_url = "http://127.0.0.1:9000".into();
        config.display.page_size = 12;

        let written = config.save(Some(path.clone())).unwrap();
        assert_eq!(written, path);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[api]"));
        assert!(contents.contains("[search]"));

        let parsed: ClientConfig = toml::from_str(&contents).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();
        assert!(matches!(
            ClientConfig::load(Some(path)),
            Err(ClientError::ConfigLoadFailed(_))
        ));
    }
}
