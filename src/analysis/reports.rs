//! Report formatting and output generation
//!
//! Console output is a set of aligned tables; JSON output is the serialised
//! report struct, so scripted consumers see exactly what the engine produced.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::{AppError, AppResult};
use crate::types::analysis_results::{
    AssetSummaryReport, GeographicReport, HistoryReport, TimeSeries,
};
use crate::utils::currency::format_display_amount;

/// Output format options for analysis reports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable console tables
    #[default]
    Console,
    /// JSON format for programmatic use
    Json,
}

impl OutputFormat {
    /// Parse a `--format` value; anything unrecognised falls back to console
    pub fn parse(format_str: &str) -> Self {
        match format_str.trim().to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Console,
        }
    }
}

const INCOMPLETE_NOTE: &str =
    "Note: data may be incomplete (collection stopped before the last page)\n";

const MIXED_UNITS: &str = "mixed units";

/// Report formatter for analysis results
pub struct ReportFormatter;

impl ReportFormatter {
    /// Format number with thousand separators for console output
    ///
    /// # Examples
    ///
    /// ```
    /// # use fiber_analytics::analysis::ReportFormatter;
    /// assert_eq!(ReportFormatter::format_number(1234), "1,234");
    /// assert_eq!(ReportFormatter::format_number(1234567), "1,234,567");
    /// assert_eq!(ReportFormatter::format_number(904), "904");
    /// ```
    pub fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let chars: Vec<char> = s.chars().collect();

        for (i, c) in chars.iter().enumerate() {
            if i > 0 && (chars.len() - i) % 3 == 0 {
                result.push(',');
            }
            result.push(*c);
        }

        result
    }

    /// Capacity labelled with its unit, or marked as mixed when the report
    /// adds amounts of several assets
    fn capacity(amount: Decimal, report: &GeographicReport) -> String {
        if let Some(asset) = &report.asset {
            return format_display_amount(amount, asset);
        }
        match report.assets.as_slice() {
            [] => format_display_amount(amount, ""),
            [only] => format_display_amount(amount, only),
            _ => format!("{} ({})", amount.normalize(), MIXED_UNITS),
        }
    }

    fn header(title: &str, report: &GeographicReport) -> String {
        let mut output = format!("=== {} ({}) ===\n", title, report.network);
        if let Some(asset) = &report.asset {
            output.push_str(&format!("Asset: {}\n", asset));
        } else if report.assets.len() > 1 {
            output.push_str(&format!(
                "Assets: {} (capacity adds {}; use --asset to pick one)\n",
                report.assets.join(", "),
                MIXED_UNITS
            ));
        }
        output.push_str(&format!(
            "Nodes: {} | Channels: {} | Capacity: {}\n",
            Self::format_number(report.total_nodes),
            Self::format_number(report.total_channels),
            Self::capacity(report.total_capacity, report)
        ));
        if !report.complete {
            output.push_str(INCOMPLETE_NOTE);
        }
        output.push('\n');
        output
    }

    /// Format the country view
    pub fn format_countries(report: &GeographicReport, format: &OutputFormat) -> AppResult<String> {
        match format {
            OutputFormat::Console => {
                let mut output = Self::header("NODES BY COUNTRY", report);
                output.push_str(&format!(
                    "{:<24} | {:>8} | {:>8} | {:>28} | {:>8}\n",
                    "Country", "Nodes", "Channels", "Capacity", "Share"
                ));
                output.push_str(&format!("{}\n", "-".repeat(88)));
                for country in &report.countries {
                    output.push_str(&format!(
                        "{:<24} | {:>8} | {:>8} | {:>28} | {:>7.2}%\n",
                        country.country,
                        Self::format_number(country.node_count),
                        Self::format_number(country.channel_count),
                        Self::capacity(country.total_capacity, report),
                        country.percentage
                    ));
                }
                Ok(output)
            }
            OutputFormat::Json => Self::export_json(&report.countries),
        }
    }

    /// Format the city view
    pub fn format_cities(report: &GeographicReport, format: &OutputFormat) -> AppResult<String> {
        match format {
            OutputFormat::Console => {
                let mut output = Self::header("NODES BY CITY", report);
                output.push_str(&format!(
                    "{:<24} | {:<16} | {:>8} | {:>28} | {:>20}\n",
                    "City", "Country", "Nodes", "Capacity", "Location"
                ));
                output.push_str(&format!("{}\n", "-".repeat(108)));
                for city in &report.cities {
                    output.push_str(&format!(
                        "{:<24} | {:<16} | {:>8} | {:>28} | {:>9.4},{:>9.4}\n",
                        city.city,
                        city.country,
                        Self::format_number(city.node_count),
                        Self::capacity(city.total_capacity, report),
                        city.latitude,
                        city.longitude
                    ));
                }
                Ok(output)
            }
            OutputFormat::Json => Self::export_json(&report.cities),
        }
    }

    /// Format the node ranking, limited to the first `limit` entries
    pub fn format_top_nodes(
        report: &GeographicReport,
        limit: usize,
        format: &OutputFormat,
    ) -> AppResult<String> {
        let nodes = &report.top_nodes[..limit.min(report.top_nodes.len())];
        match format {
            OutputFormat::Console => {
                let mut output = Self::header("TOP NODES BY CAPACITY", report);
                output.push_str(&format!(
                    "{:>4} | {:<20} | {:<18} | {:<16} | {:>8} | {:>28}\n",
                    "#", "Node", "City", "Country", "Channels", "Capacity"
                ));
                output.push_str(&format!("{}\n", "-".repeat(108)));
                for (rank, node) in nodes.iter().enumerate() {
                    let label = if node.node_name.is_empty() {
                        Self::short_id(&node.node_id)
                    } else {
                        node.node_name.clone()
                    };
                    output.push_str(&format!(
                        "{:>4} | {:<20} | {:<18} | {:<16} | {:>8} | {:>28}\n",
                        rank + 1,
                        label,
                        node.city,
                        node.country,
                        Self::format_number(node.channel_count),
                        Self::capacity(node.total_capacity, report)
                    ));
                }
                Ok(output)
            }
            OutputFormat::Json => Self::export_json(&nodes),
        }
    }

    /// Format the hosting-provider ranking
    pub fn format_isps(report: &GeographicReport, format: &OutputFormat) -> AppResult<String> {
        match format {
            OutputFormat::Console => {
                let mut output = Self::header("TOP HOSTING PROVIDERS", report);
                output.push_str(&format!(
                    "{:<20} | {:>8} | {:>8} | {:>28}\n",
                    "Provider", "Nodes", "Share", "Capacity"
                ));
                output.push_str(&format!("{}\n", "-".repeat(72)));
                for isp in &report.isps {
                    output.push_str(&format!(
                        "{:<20} | {:>8} | {:>7.2}% | {:>28}\n",
                        isp.isp,
                        Self::format_number(isp.node_count),
                        isp.percentage,
                        Self::capacity(isp.total_capacity, report)
                    ));
                }
                Ok(output)
            }
            OutputFormat::Json => Self::export_json(&report.isps),
        }
    }

    /// Format combined asset statistics
    pub fn format_asset_summary(
        report: &AssetSummaryReport,
        format: &OutputFormat,
    ) -> AppResult<String> {
        match format {
            OutputFormat::Console => {
                let combined = &report.combined;
                let mut output = format!("=== CHANNEL CAPACITY SUMMARY ({}) ===\n", report.network);
                output.push_str(&format!(
                    "Assets: {}\n\n",
                    if report.assets.is_empty() {
                        "none".to_string()
                    } else {
                        report.assets.join(", ")
                    }
                ));
                output.push_str(&format!(
                    "Channels:        {}\n\
                     Total capacity:  {}\n\
                     Average:         {}\n\
                     Median:          {}{}\n\
                     Minimum:         {}\n\
                     Maximum:         {}\n",
                    combined.channel_len,
                    combined.total,
                    combined.avg,
                    combined.median,
                    if report.median_is_approximate {
                        " (approximate: mean of per-asset medians)"
                    } else {
                        ""
                    },
                    combined.min,
                    combined.max
                ));
                output.push_str("\nAmounts are in base units of each asset.\n");
                Ok(output)
            }
            OutputFormat::Json => Self::export_json(report),
        }
    }

    /// Format a growth history
    pub fn format_history(report: &HistoryReport, format: &OutputFormat) -> AppResult<String> {
        match format {
            OutputFormat::Console => {
                let mut output = format!(
                    "=== {} GROWTH ({}) ===\n",
                    report.entity.to_uppercase(),
                    report.network
                );
                output.push_str(&format!(
                    "Records fetched: {} | Unique: {} | Undated: {}\n",
                    Self::format_number(report.raw_records),
                    Self::format_number(report.unique_records),
                    Self::format_number(report.undated_records)
                ));
                if !report.complete {
                    output.push_str(INCOMPLETE_NOTE);
                }
                output.push('\n');
                output.push_str(&Self::format_series_table(&report.daily, &report.cumulative));
                Ok(output)
            }
            OutputFormat::Json => Self::export_json(report),
        }
    }

    fn format_series_table(daily: &TimeSeries, cumulative: &TimeSeries) -> String {
        let mut output = format!("{:<12} | {:>8} | {:>10}\n", "Date", "New", "Total");
        output.push_str(&format!("{}\n", "-".repeat(36)));
        for (day, total) in daily.points.iter().zip(cumulative.points.iter()) {
            output.push_str(&format!(
                "{:<12} | {:>8} | {:>10}\n",
                day.date, day.value, total.value
            ));
        }
        output
    }

    fn short_id(id: &str) -> String {
        if id.len() > 14 {
            format!("{}...{}", &id[..8], &id[id.len() - 4..])
        } else {
            id.to_string()
        }
    }

    /// Serialise any report as pretty JSON
    pub fn export_json<T: Serialize + ?Sized>(data: &T) -> AppResult<String> {
        serde_json::to_string_pretty(data)
            .map_err(|e| AppError::InvalidData(format!("JSON export failed: {}", e)))
    }
}
