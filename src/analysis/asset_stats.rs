//! Multi-asset capacity statistics combiner
//!
//! The backend reports one [`AssetAnalysis`] row per asset. This module folds
//! several rows into one summary using base-unit integer arithmetic.
//!
//! Sums, counts, extremes and the channel-weighted average are exact. The
//! median is not: the true median would need every individual channel, so the
//! combined value is the plain mean of the per-asset medians (see
//! [`approximate_median`]).

use num_bigint::BigUint;
use num_traits::Zero;
use tracing::{debug, warn};

use crate::types::AssetAnalysis;

/// Name given to a summary built from more than one asset
pub const COMBINED_ASSET_NAME: &str = "ALL";

/// Parse a non-negative decimal string, truncating any fractional part
///
/// Unparseable input is logged and counts as zero.
fn parse_amount(value: &str, field: &str, asset: &str) -> BigUint {
    let trimmed = value.trim();
    let integral = trimmed.split('.').next().unwrap_or("");
    if integral.is_empty() && trimmed.starts_with('.') {
        return BigUint::zero();
    }
    match BigUint::parse_bytes(integral.as_bytes(), 10) {
        Some(n) => n,
        None => {
            warn!(
                "Field {} of asset {} is not a number ({:?}), counting as zero",
                field, asset, value
            );
            BigUint::zero()
        }
    }
}

/// Parsed numeric fields of one row
struct RowValues {
    max: BigUint,
    min: BigUint,
    avg: BigUint,
    median: BigUint,
    total: BigUint,
    channel_len: BigUint,
}

impl RowValues {
    fn parse(row: &AssetAnalysis) -> Self {
        let name = row.name.as_str();
        Self {
            max: parse_amount(&row.max, "max", name),
            min: parse_amount(&row.min, "min", name),
            avg: parse_amount(&row.avg, "avg", name),
            median: parse_amount(&row.median, "median", name),
            total: parse_amount(&row.total, "total", name),
            channel_len: parse_amount(&row.channel_len, "channel_len", name),
        }
    }
}

/// Mean of per-asset medians, truncated
///
/// This is an approximation of the combined median. It is exact only when
/// every row has the same distribution.
pub fn approximate_median(medians: &[BigUint]) -> BigUint {
    if medians.is_empty() {
        return BigUint::zero();
    }
    let sum: BigUint = medians.iter().sum();
    sum / BigUint::from(medians.len())
}

/// Combines per-asset summaries restricted to a known asset list
#[derive(Debug, Clone)]
pub struct AssetCombiner {
    recognised: Vec<String>,
}

impl AssetCombiner {
    pub fn new<I, S>(recognised: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            recognised: recognised.into_iter().map(Into::into).collect(),
        }
    }

    fn is_recognised(&self, name: &str) -> bool {
        let name = name.trim();
        self.recognised.iter().any(|r| r.eq_ignore_ascii_case(name))
    }

    /// Rows that take part in a combination, in input order
    pub fn select<'a>(
        &self,
        rows: &'a [AssetAnalysis],
        asset_filter: Option<&str>,
    ) -> Vec<&'a AssetAnalysis> {
        rows.iter()
            .filter(|row| self.is_recognised(&row.name))
            .filter(|row| match asset_filter {
                Some(asset) => row.name.trim().eq_ignore_ascii_case(asset.trim()),
                None => true,
            })
            .collect()
    }

    /// Combine the selected rows into one summary
    ///
    /// # Arguments
    /// * `rows` - Per-asset summaries from the backend
    /// * `asset_filter` - Optional single asset to keep (case-insensitive)
    ///
    /// # Returns
    /// * `AssetAnalysis` - All-zero when nothing matches, the row itself when
    ///   exactly one matches, otherwise the combined summary
    pub fn combine(&self, rows: &[AssetAnalysis], asset_filter: Option<&str>) -> AssetAnalysis {
        let selected = self.select(rows, asset_filter);
        debug!(
            "Combining {} of {} asset rows (filter: {:?})",
            selected.len(),
            rows.len(),
            asset_filter
        );

        match selected.as_slice() {
            [] => AssetAnalysis::zero(asset_filter.unwrap_or(COMBINED_ASSET_NAME)),
            [only] => (*only).clone(),
            many => combine_rows(many),
        }
    }
}

fn combine_rows(rows: &[&AssetAnalysis]) -> AssetAnalysis {
    let values: Vec<RowValues> = rows.iter().map(|row| RowValues::parse(row)).collect();

    let mut total = BigUint::zero();
    let mut channel_len = BigUint::zero();
    let mut weighted = BigUint::zero();
    let mut max = BigUint::zero();
    // Seeded from the first row so a genuine zero minimum survives
    let mut min = values[0].min.clone();

    for v in &values {
        total += &v.total;
        channel_len += &v.channel_len;
        weighted += &v.avg * &v.channel_len;
        if v.max > max {
            max = v.max.clone();
        }
        if v.min < min {
            min = v.min.clone();
        }
    }

    let avg = if channel_len.is_zero() {
        BigUint::zero()
    } else {
        &weighted / &channel_len
    };

    let medians: Vec<BigUint> = values.iter().map(|v| v.median.clone()).collect();
    let median = approximate_median(&medians);

    AssetAnalysis {
        name: COMBINED_ASSET_NAME.to_string(),
        max: max.to_string(),
        min: min.to_string(),
        avg: avg.to_string(),
        median: median.to_string(),
        total: total.to_string(),
        channel_len: channel_len.to_string(),
    }
}
