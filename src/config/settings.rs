//! Query settings loading
//!
//! Settings are layered: built-in defaults, then an optional settings file
//! (TOML or JSON, picked by extension), then environment variables such as
//! `VECDB_EXPLORER_DEFAULT_TOP_K=250`.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::config::{DEFAULT_SORT_ATTRIBUTE, DEFAULT_TOP_K, SEARCH_TEXT_ATTRIBUTE};
use crate::core::error::ConfigError;
use crate::core::types::SortDirection;

/// Environment variable prefix for settings overrides
pub const ENV_PREFIX: &str = "VECDB_EXPLORER";

/// Configuration result type
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Defaults the converter applies where a query leaves something unset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySettings {
    /// `top_k` for flat-builder queries and for imported queries without one
    pub default_top_k: u32,

    /// Sort attribute when neither search nor ranking is configured
    pub default_sort_attribute: String,

    pub default_sort_direction: SortDirection,

    /// Attribute the free-text search box matches against
    pub search_text_attribute: String,

    /// Whether flat-builder queries request every attribute
    pub include_all_attributes: bool,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            default_top_k: DEFAULT_TOP_K,
            default_sort_attribute: DEFAULT_SORT_ATTRIBUTE.to_string(),
            default_sort_direction: SortDirection::Asc,
            search_text_attribute: SEARCH_TEXT_ATTRIBUTE.to_string(),
            include_all_attributes: true,
        }
    }
}

impl QuerySettings {
    /// Load settings from the default file location and the environment
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&default_settings_path())
    }

    /// Load settings from `path` (optional) and the environment
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    /// Load settings from `path` (optional) and environment variables with `prefix`
    pub fn load_with_prefix(path: &Path, prefix: &str) -> ConfigResult<Self> {
        debug!("Loading query settings from {:?}", path);

        let settings: QuerySettings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        info!(
            default_top_k = settings.default_top_k,
            sort_attribute = %settings.default_sort_attribute,
            "Query settings loaded"
        );
        Ok(settings)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_top_k == 0 {
            return Err(ConfigError::Invalid {
                reason: "default_top_k must be greater than 0".to_string(),
            });
        }
        if self.default_sort_attribute.trim().is_empty() {
            return Err(ConfigError::Invalid {
                reason: "default_sort_attribute must not be empty".to_string(),
            });
        }
        if self.search_text_attribute.trim().is_empty() {
            return Err(ConfigError::Invalid {
                reason: "search_text_attribute must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn with_default_top_k(mut self, top_k: u32) -> Self {
        self.default_top_k = top_k;
        self
    }

    pub fn with_default_sort(
        mut self,
        attribute: impl Into<String>,
        direction: SortDirection,
    ) -> Self {
        self.default_sort_attribute = attribute.into();
        self.default_sort_direction = direction;
        self
    }

    pub fn with_search_text_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.search_text_attribute = attribute.into();
        self
    }
}

/// `<config dir>/vecdb-explorer/query.toml`
pub fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vecdb-explorer")
        .join("query.toml")
}
