use clap::Args;
use tracing::{error, info};

use super::CommonArgs;
use crate::api::ExplorerClient;
use crate::errors::AppResult;

/// Test explorer backend connectivity
#[derive(Args)]
pub struct TestApiCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

impl TestApiCommand {
    pub async fn run(&self) -> AppResult<()> {
        info!("=== Testing Explorer API Connection ===");

        let config = self.common.config()?;
        info!("Testing connection to: {}", config.api.base_url);
        let client = ExplorerClient::new(&config.api)?;

        match client.test_connection().await {
            Ok(total) => {
                println!("Explorer API connection test PASSED");
                println!(
                    "{} reports {} active nodes on {}",
                    client.base_url(),
                    total,
                    client.network()
                );
                Ok(())
            }
            Err(e) => {
                error!("Explorer API connection test failed: {}", e);
                Err(e.into())
            }
        }
    }
}
