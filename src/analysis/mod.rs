//! Centralised analysis module for the Fiber network explorer
//!
//! The analysis module is organised around the `AnalysisEngine`, which
//! collects records from the explorer backend and hands them to the pure
//! analysers:
//!
//! - **Geographic Aggregation** - Countries, cities, node ranking and ISPs
//! - **Asset Statistics** - Multi-asset capacity summary combination
//! - **Timeline** - Daily and cumulative growth of nodes and channels
//! - **Report Generation** - Formatted output for console and JSON export
//!
//! ## Usage
//!
//! ```no_run
//! use fiber_analytics::analysis::{AggregationOptions, AnalysisEngine};
//! use fiber_analytics::config::AppConfig;
//! use fiber_analytics::errors::AppResult;
//!
//! async fn example() -> AppResult<()> {
//!     let engine = AnalysisEngine::new(AppConfig::default())?;
//!
//!     let report = engine.geographic_report(&AggregationOptions::default()).await;
//!     if !report.complete {
//!         println!("data may be incomplete");
//!     }
//!     let summary = engine.asset_summary(None).await?;
//!     println!("{} channels", summary.combined.channel_len);
//!     Ok(())
//! }
//! ```

pub mod asset_stats;
pub mod dedup;
pub mod geo;
pub mod isp;
pub mod reports;
pub mod timeline;

// Re-export main types and interfaces
pub use asset_stats::{approximate_median, AssetCombiner};
pub use dedup::{dedup_by_id, Identified};
pub use geo::{parse_loc, AggregationOptions, GeoAggregator};
pub use isp::{infer_isp, match_isp};
pub use reports::{OutputFormat, ReportFormatter};
pub use timeline::{bucket_and_accumulate, bucket_by_day, channel_date, daily_counts, node_date};

use futures::future::join;
use std::fmt;
use tracing::info;

use crate::api::{DateRange, ExplorerClient};
use crate::collector::{collect_all, Collection, CollectorOptions, PaginationStrategy};
use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::types::analysis_results::{AssetSummaryReport, GeographicReport, HistoryReport};
use crate::types::{Channel, Network, Node};

/// Which historical collection a growth series is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum HistoryEntity {
    Nodes,
    Channels,
}

impl HistoryEntity {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryEntity::Nodes => "nodes",
            HistoryEntity::Channels => "channels",
        }
    }
}

impl fmt::Display for HistoryEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main analysis engine that coordinates collection and analysis
pub struct AnalysisEngine {
    client: ExplorerClient,
    config: AppConfig,
}

impl AnalysisEngine {
    /// Create a new analysis engine talking to the configured backend
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let client = ExplorerClient::new(&config.api)?;
        Ok(Self { client, config })
    }

    /// Create an engine around an existing client
    pub fn with_client(client: ExplorerClient, config: AppConfig) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> &ExplorerClient {
        &self.client
    }

    pub fn network(&self) -> Network {
        self.client.network()
    }

    fn options(&self, strategy: PaginationStrategy) -> CollectorOptions {
        CollectorOptions::new(strategy, &self.config.collection)
    }

    /// Drain the active node listing
    pub async fn collect_active_nodes(&self) -> Collection<Node> {
        let options = self.options(PaginationStrategy::Cursor);
        collect_all("nodes_hourly", &options, |req| self.client.nodes_hourly(req)).await
    }

    /// Drain the active channel listing
    pub async fn collect_active_channels(&self) -> Collection<Channel> {
        let options = self.options(PaginationStrategy::Cursor);
        collect_all("channels_hourly", &options, |req| {
            self.client.channels_hourly(req)
        })
        .await
    }

    /// Drain the historical node listing (may contain duplicates)
    pub async fn collect_historical_nodes(&self, range: &DateRange) -> Collection<Node> {
        let options = self.options(PaginationStrategy::Heuristic);
        collect_all("nodes_nearly_monthly", &options, |req| {
            self.client.nodes_monthly(req, range)
        })
        .await
    }

    /// Drain the historical channel listing (may contain duplicates)
    pub async fn collect_historical_channels(&self, range: &DateRange) -> Collection<Channel> {
        let options = self.options(PaginationStrategy::Heuristic);
        collect_all("channels_nearly_monthly", &options, |req| {
            self.client.channels_monthly(req, range)
        })
        .await
    }

    /// Country, city, node and ISP views of the active network
    ///
    /// Nodes and channels are collected concurrently. A collection that
    /// stopped early still contributes what it gathered; the report is then
    /// marked incomplete.
    pub async fn geographic_report(&self, options: &AggregationOptions) -> GeographicReport {
        let (nodes, channels) =
            join(self.collect_active_nodes(), self.collect_active_channels()).await;
        let complete = nodes.is_complete() && channels.is_complete();

        let nodes = dedup_by_id(nodes.records);
        let channels = dedup_by_id(channels.records);
        info!(
            "Collected {} nodes and {} channels on {} (complete: {})",
            nodes.len(),
            channels.len(),
            self.network(),
            complete
        );

        let aggregator = GeoAggregator::new(&nodes, &channels, options);
        GeographicReport {
            network: self.network(),
            asset: options.asset.clone(),
            total_nodes: aggregator.node_count(),
            total_channels: aggregator.channel_count(),
            total_capacity: aggregator.total_capacity(),
            assets: aggregator.assets(),
            complete,
            countries: aggregator.by_country(),
            cities: aggregator.by_city(),
            top_nodes: aggregator.node_locations(),
            isps: aggregator.isp_ranking(),
        }
    }

    /// Daily and cumulative growth of one historical collection
    pub async fn history(&self, entity: HistoryEntity, range: &DateRange) -> HistoryReport {
        let (raw_records, complete, buckets) = match entity {
            HistoryEntity::Nodes => {
                let collection = self.collect_historical_nodes(range).await;
                let complete = collection.is_complete();
                let raw = collection.len();
                (raw, complete, bucket_by_day(collection.records, node_date))
            }
            HistoryEntity::Channels => {
                let collection = self.collect_historical_channels(range).await;
                let complete = collection.is_complete();
                let raw = collection.len();
                (raw, complete, bucket_by_day(collection.records, channel_date))
            }
        };

        info!(
            "History of {}: {} raw records, {} unique, {} days",
            entity,
            raw_records,
            buckets.unique_records,
            buckets.daily.points.len()
        );

        HistoryReport {
            network: self.network(),
            entity: entity.to_string(),
            raw_records,
            unique_records: buckets.unique_records,
            undated_records: buckets.undated_records,
            complete,
            daily: buckets.daily,
            cumulative: buckets.cumulative,
        }
    }

    /// Combined capacity statistics of the recognised assets
    pub async fn asset_summary(&self, asset_filter: Option<&str>) -> AppResult<AssetSummaryReport> {
        let rows = self.client.analysis_hourly().await?;
        let combiner = AssetCombiner::new(self.config.assets.recognised.iter().cloned());

        let assets: Vec<String> = combiner
            .select(&rows, asset_filter)
            .into_iter()
            .map(|row| row.name.clone())
            .collect();
        let combined = combiner.combine(&rows, asset_filter);

        Ok(AssetSummaryReport {
            network: self.network(),
            asset_filter: asset_filter.map(String::from),
            median_is_approximate: assets.len() > 1,
            assets,
            combined,
        })
    }
}
