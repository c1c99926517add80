use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub resources: ResourcesConfig,
    pub aggregator: AggregatorConfig,
    pub logging: LoggingConfig,
    pub sources: Vec<SourceConfig>,
}

/// Reference data location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig {
    /// Load dictionaries and the reference database from here instead of the
    /// bundled copies.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Listings per page for fixture storefronts.
    pub page_size: usize,
    /// Capacity of the merged result channel.
    pub channel_capacity: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_dir: Option<PathBuf>,
}

/// One storefront to query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Listings from a local JSON file.
    Fixture { name: String, path: PathBuf },
    /// Paginated JSON search endpoint.
    JsonFeed {
        name: String,
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_pages: Option<u32>,
    },
}

impl SourceConfig {
    pub fn name(&self) -> &str {
        match self {
            Self::Fixture { name, .. } | Self::JsonFeed { name, .. } => name,
        }
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            page_size: 25,
            channel_capacity: 256,
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/cardscout/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match Self::load_from(&config_path) {
            Ok(config) => {
                log::info!("Loaded config from {}", config_path.display());
                config
            }
            Err(ConfigError::Io { .. }) => {
                log::debug!("No config file at {}, using defaults", config_path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    /// Load configuration from an explicit path. Unlike [`load`](Self::load),
    /// a missing or broken file is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("cardscout").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
