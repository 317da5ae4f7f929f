//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::maps::MapsConfig;
use crate::store::SupabaseConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub maps: MapsSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Hosted venue store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_url")]
    pub url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_table")]
    pub table: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_store_url() -> String {
    "http://localhost:54321".to_string()
}

fn default_table() -> String {
    "venues".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: default_store_url(),
            api_key: String::new(),
            table: default_table(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl StoreConfig {
    pub fn client_config(&self) -> SupabaseConfig {
        SupabaseConfig {
            base_url: self.url.clone(),
            api_key: self.api_key.clone(),
            table: self.table.clone(),
            request_timeout_ms: self.request_timeout_secs * 1000,
        }
    }
}

/// Maps API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MapsSettings {
    /// Shared key for place search and routes; empty disables both
    #[serde(default)]
    pub api_key: Option<String>,

    /// Address drive times are measured from
    #[serde(default)]
    pub origin: String,

    #[serde(default = "default_places_url")]
    pub places_url: String,

    #[serde(default = "default_routes_url")]
    pub routes_url: String,

    #[serde(default = "default_maps_timeout")]
    pub request_timeout_secs: u64,
}

fn default_places_url() -> String {
    "https://places.googleapis.com".to_string()
}

fn default_routes_url() -> String {
    "https://routes.googleapis.com".to_string()
}

fn default_maps_timeout() -> u64 {
    10
}

impl Default for MapsSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            origin: String::new(),
            places_url: default_places_url(),
            routes_url: default_routes_url(),
            request_timeout_secs: default_maps_timeout(),
        }
    }
}

impl MapsSettings {
    pub fn client_config(&self) -> MapsConfig {
        MapsConfig {
            api_key: self.api_key.clone().filter(|k| !k.trim().is_empty()),
            origin: self.origin.clone(),
            places_base_url: self.places_url.clone(),
            routes_base_url: self.routes_url.clone(),
            request_timeout_ms: self.request_timeout_secs * 1000,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("venuebook").join("config.toml")),
            Some(PathBuf::from("./venuebook.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Store overrides
        if let Some(url) = lookup("VENUEBOOK_STORE_URL") {
            self.store.url = url;
        }
        if let Some(key) = lookup("VENUEBOOK_STORE_KEY") {
            self.store.api_key = key;
        }

        // Maps overrides
        if let Some(key) = lookup("VENUEBOOK_MAPS_API_KEY") {
            self.maps.api_key = Some(key);
        }
        if let Some(origin) = lookup("VENUEBOOK_MAPS_ORIGIN") {
            self.maps.origin = origin;
        }

        // Logging overrides
        if let Some(level) = lookup("VENUEBOOK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("VENUEBOOK_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Venuebook Configuration
#
# Environment variables override these settings:
# - VENUEBOOK_STORE_URL
# - VENUEBOOK_STORE_KEY
# - VENUEBOOK_MAPS_API_KEY
# - VENUEBOOK_MAPS_ORIGIN
# - VENUEBOOK_LOG_LEVEL
# - VENUEBOOK_LOG_FORMAT

[store]
# Hosted project URL
url = "http://localhost:54321"

# Project API key
api_key = ""

# Table holding venue rows
table = "venues"

# Request timeout in seconds
request_timeout_secs = 30

[maps]
# Maps API key used for location search and drive times.
# Leave empty to disable both.
api_key = ""

# Address drive times are measured from
origin = ""

# Request timeout in seconds
request_timeout_secs = 10

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
