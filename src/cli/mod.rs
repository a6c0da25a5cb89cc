use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;

/// Fiber network explorer analytics
#[derive(Parser)]
#[command(name = "fiber-analytics")]
#[command(about = "Fiber payment-channel network analytics")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Nodes and channel capacity by country
    Countries(commands::geo::CountriesCommand),
    /// Nodes and channel capacity by city
    Cities(commands::geo::CitiesCommand),
    /// Nodes ranked by total channel capacity
    TopNodes(commands::geo::TopNodesCommand),
    /// Top hosting providers by node count
    Isps(commands::geo::IspsCommand),
    /// Combined capacity statistics across assets
    AssetSummary(commands::assets::AssetSummaryCommand),
    /// Daily and cumulative growth of nodes or channels
    History(commands::history::HistoryCommand),
    /// Decode a hex capacity amount
    Decode(commands::decode::DecodeCommand),
    /// Test explorer API connectivity
    TestApi(commands::test_api::TestApiCommand),
}

pub async fn run() -> AppResult<()> {
    // Initialise tracing subscriber to capture info!() macros
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Countries(command) => command.run().await,
        Commands::Cities(command) => command.run().await,
        Commands::TopNodes(command) => command.run().await,
        Commands::Isps(command) => command.run().await,
        Commands::AssetSummary(command) => command.run().await,
        Commands::History(command) => command.run().await,
        Commands::Decode(command) => command.run().await,
        Commands::TestApi(command) => command.run().await,
    }
}
