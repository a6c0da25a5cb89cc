//! Analysis result types and data structures
//!
//! Every view here is derived, constructed fresh on each aggregation call and
//! never persisted. Capacity totals are display-unit decimals (native asset
//! already divided by its subdivision factor).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AssetAnalysis, Network};

/// Nodes and channel capacity attributed to one country or region
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoAggregate {
    pub country: String,
    pub node_count: usize,
    /// Channels with at least one endpoint in this country
    pub channel_count: usize,
    /// Half of every touching channel's capacity per endpoint located here
    pub total_capacity: Decimal,
    pub percentage: f64,
}

/// Nodes and channel capacity attributed to one city
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityAggregate {
    pub city: String,
    pub country: String,
    pub node_count: usize,
    pub channel_count: usize,
    pub total_capacity: Decimal,
    pub latitude: f64,
    pub longitude: f64,
}

/// A single node with coordinates and its full channel exposure
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLocation {
    pub node_id: String,
    pub node_name: String,
    pub country: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub channel_count: usize,
    /// Full capacity of every channel this node is an endpoint of
    pub total_capacity: Decimal,
}

/// Hosting provider ranking entry
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct IspRanking {
    pub isp: String,
    pub node_count: usize,
    pub total_capacity: Decimal,
    pub percentage: f64,
}

/// All four aggregate views produced from one node/channel snapshot
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct GeographicReport {
    pub network: Network,
    /// Asset the capacity totals are restricted to, if any
    pub asset: Option<String>,
    pub total_nodes: usize,
    pub total_channels: usize,
    pub total_capacity: Decimal,
    /// Distinct assets of the aggregated channels; more than one means the
    /// capacity totals add amounts of different units
    #[serde(default)]
    pub assets: Vec<String>,
    /// False when either collection stopped early on a page failure
    pub complete: bool,
    pub countries: Vec<GeoAggregate>,
    pub cities: Vec<CityAggregate>,
    pub top_nodes: Vec<NodeLocation>,
    pub isps: Vec<IspRanking>,
}

/// One point of a daily series (ISO date `YYYY-MM-DD`)
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePoint {
    pub date: String,
    pub value: u64,
}

/// Daily series in ascending date order
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub points: Vec<TimePoint>,
}

impl TimeSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_value(&self) -> u64 {
        self.points.last().map(|p| p.value).unwrap_or(0)
    }
}

/// Historical growth of a deduplicated collection
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct HistoryReport {
    pub network: Network,
    pub entity: String,
    pub raw_records: usize,
    pub unique_records: usize,
    /// Records skipped because no date could be derived
    pub undated_records: usize,
    pub complete: bool,
    pub daily: TimeSeries,
    pub cumulative: TimeSeries,
}

/// Combined multi-asset capacity statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetSummaryReport {
    pub network: Network,
    pub asset_filter: Option<String>,
    /// Rows that took part in the combination
    pub assets: Vec<String>,
    pub combined: AssetAnalysis,
    /// True when `combined.median` is a mean of per-asset medians
    pub median_is_approximate: bool,
}

/// Body of the range analysis endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// e.g. `1M`, `3M`, `1Y`
    pub range: String,
    /// e.g. `day`, `week`
    pub interval: String,
    pub fields: Vec<String>,
    pub net: Network,
}

/// Named series returned by the range analysis endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSeries {
    pub name: String,
    #[serde(default)]
    pub points: Vec<AnalysisPoint>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisPoint {
    pub timestamp: String,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub series: Vec<AnalysisSeries>,
}
