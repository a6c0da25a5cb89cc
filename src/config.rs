use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::env;

use crate::types::Network;

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub collection: CollectionConfig,
    pub assets: AssetConfig,
}

/// Explorer backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub network: Network,
    pub timeout_seconds: u64,
    pub max_retries: usize,
    pub initial_backoff_ms: u64,
    pub backoff_multiplier: f64,
    pub max_backoff_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            network: Network::Mainnet,
            timeout_seconds: 30,
            max_retries: 2,
            initial_backoff_ms: 200,
            backoff_multiplier: 2.0,
            max_backoff_seconds: 10,
        }
    }
}

/// Paged collection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    pub page_size: usize,
    pub max_pages: usize,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            page_size: 500,
            max_pages: 10_000,
        }
    }
}

/// Assets taken into the multi-asset combination
///
/// The native asset and its 10^8 scaling are fixed by the codec.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    pub recognised: Vec<String>,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            recognised: vec!["CKB".to_string(), "RUSD".to_string(), "USDI".to_string()],
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration using an explicit file stem (without extension)
    pub fn load_from(file_stem: &str) -> Result<Self, ConfigError> {
        let api = ApiConfig::default();
        let collection = CollectionConfig::default();
        let assets = AssetConfig::default();

        let config = Config::builder()
            .set_default("api.base_url", api.base_url)?
            .set_default("api.network", "mainnet")?
            .set_default("api.timeout_seconds", api.timeout_seconds)?
            .set_default("api.max_retries", api.max_retries as i64)?
            .set_default("api.initial_backoff_ms", api.initial_backoff_ms)?
            .set_default("api.backoff_multiplier", api.backoff_multiplier)?
            .set_default("api.max_backoff_seconds", api.max_backoff_seconds)?
            .set_default("collection.page_size", collection.page_size as i64)?
            .set_default("collection.max_pages", collection.max_pages as i64)?
            .set_default("assets.recognised", assets.recognised)?
            .add_source(File::with_name(file_stem).required(false))
            // FIBER_API__BASE_URL, FIBER_COLLECTION__PAGE_SIZE, ...
            .add_source(
                config::Environment::with_prefix("FIBER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        if let Ok(url) = env::var("FIBER_API_URL") {
            if !url.is_empty() {
                app_config.api.base_url = url;
            }
        }

        if let Ok(net) = env::var("FIBER_NETWORK") {
            app_config.api.network = net
                .parse()
                .map_err(|e: String| ConfigError::Message(e))?;
        }

        if app_config.collection.page_size == 0 {
            return Err(ConfigError::Message(
                "collection.page_size must be greater than zero".to_string(),
            ));
        }

        if app_config.collection.max_pages == 0 {
            return Err(ConfigError::Message(
                "collection.max_pages must be greater than zero".to_string(),
            ));
        }

        Ok(app_config)
    }

    /// Get default config values for CLI argument defaults
    pub fn get_defaults() -> Result<Self, ConfigError> {
        match Self::load() {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::debug!("Falling back to built-in configuration: {}", e);
                Ok(Self::default())
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            collection: CollectionConfig::default(),
            assets: AssetConfig::default(),
        }
    }
}
