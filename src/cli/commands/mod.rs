//! Subcommand implementations
//!
//! Every network-facing command shares [`CommonArgs`] so `--format`, `--net`
//! and `--api-url` behave the same everywhere.

pub mod assets;
pub mod decode;
pub mod geo;
pub mod history;
pub mod test_api;

use clap::Args;
use tracing::debug;

use crate::analysis::{AnalysisEngine, OutputFormat};
use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::types::Network;

/// Options accepted by every command
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Output format (console or json)
    #[arg(long, default_value = "console")]
    pub format: String,

    /// Network to query (mainnet or testnet, overrides config.toml)
    #[arg(long)]
    pub net: Option<Network>,

    /// Explorer backend base URL (overrides config.toml)
    #[arg(long)]
    pub api_url: Option<String>,
}

impl CommonArgs {
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::parse(&self.format)
    }

    /// Configuration with command-line overrides applied
    pub fn config(&self) -> AppResult<AppConfig> {
        let mut config = AppConfig::get_defaults()?;
        if let Some(net) = self.net {
            config.api.network = net;
        }
        if let Some(url) = &self.api_url {
            config.api.base_url = url.clone();
        }
        debug!(
            "Using explorer at {} ({})",
            config.api.base_url, config.api.network
        );
        Ok(config)
    }

    pub fn engine(&self) -> AppResult<AnalysisEngine> {
        AnalysisEngine::new(self.config()?)
    }
}
