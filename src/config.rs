use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::ScoutError;

/// Main application configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct ScoutConfig {
    /// Recipe API client settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Random-recipe loader settings
    #[serde(default)]
    pub loader: LoaderConfig,
    /// Favorites persistence settings
    #[serde(default)]
    pub favorites: FavoritesConfig,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            loader: LoaderConfig::default(),
            favorites: FavoritesConfig::default(),
        }
    }
}

/// Configuration for the upstream recipe API client
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the recipe API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Delay before the single automatic retry, in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// Configuration for the batched random-recipe loader
#[derive(Debug, Deserialize, Clone)]
pub struct LoaderConfig {
    /// How many unique recipes the loader aims for
    #[serde(default = "default_target")]
    pub target: usize,
    /// How many concurrent random fetches per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Pause between batches in milliseconds
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,
    /// Search term used when every batch comes back empty
    #[serde(default = "default_fallback_term")]
    pub fallback_term: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            batch_size: default_batch_size(),
            batch_delay_ms: default_batch_delay_ms(),
            fallback_term: default_fallback_term(),
        }
    }
}

impl LoaderConfig {
    /// Check that the target/batch pair can drive the batch loop.
    pub fn validate(&self) -> Result<(), ScoutError> {
        if self.target == 0 {
            return Err(ScoutError::InvalidConfig(
                "loader.target must be positive".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(ScoutError::InvalidConfig(
                "loader.batch_size must be positive".to_string(),
            ));
        }
        if self.batch_size > self.target {
            return Err(ScoutError::InvalidConfig(format!(
                "loader.batch_size ({}) must not exceed loader.target ({})",
                self.batch_size, self.target
            )));
        }
        Ok(())
    }
}

/// Configuration for favorites persistence
#[derive(Debug, Deserialize, Clone)]
pub struct FavoritesConfig {
    /// Path of the JSON file holding the favorites list
    #[serde(default = "default_favorites_path")]
    pub path: String,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            path: default_favorites_path(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://www.themealdb.com/api/json/v1/1".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_target() -> usize {
    20
}

fn default_batch_size() -> usize {
    5
}

fn default_batch_delay_ms() -> u64 {
    200
}

fn default_fallback_term() -> String {
    "chicken".to_string()
}

fn default_favorites_path() -> String {
    "favorites.json".to_string()
}

impl ScoutConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with SCOUT__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: SCOUT__LOADER__BATCH_SIZE
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            // Environment variables with SCOUT prefix
            // Use double underscore for nested: SCOUT__API__BASE_URL
            .add_source(
                Environment::with_prefix("SCOUT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
