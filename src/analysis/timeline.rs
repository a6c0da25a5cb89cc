//! Daily bucketing of historical records into growth series

use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::dedup::{dedup_by_id, Identified};
use crate::types::analysis_results::{TimePoint, TimeSeries};
use crate::types::{Channel, Node};
use crate::utils::time::{millis_to_iso_date, rfc3339_to_iso_date};

/// Daily and cumulative counts for one deduplicated collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyBuckets {
    pub daily: TimeSeries,
    pub cumulative: TimeSeries,
    pub unique_records: usize,
    /// Unique records with no derivable date
    pub undated_records: usize,
}

/// Deduplicate, group by UTC date and accumulate
///
/// # Arguments
/// * `records` - Raw records, possibly with duplicates across pages
/// * `date_of` - Extracts the `YYYY-MM-DD` date of a record
///
/// # Returns
/// * `DailyBuckets` - Per-day counts and their running total, both ascending
pub fn bucket_by_day<T, I, F>(records: I, date_of: F) -> DailyBuckets
where
    T: Identified,
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> Option<String>,
{
    let unique = dedup_by_id(records);
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut undated = 0usize;

    for record in &unique {
        match date_of(record) {
            Some(date) => *counts.entry(date).or_insert(0) += 1,
            None => undated += 1,
        }
    }

    if undated > 0 {
        warn!(
            "{} of {} records have no usable timestamp and were skipped",
            undated,
            unique.len()
        );
    }

    let mut running = 0u64;
    let mut daily = Vec::with_capacity(counts.len());
    let mut cumulative = Vec::with_capacity(counts.len());
    for (date, count) in counts {
        running += count;
        daily.push(TimePoint {
            date: date.clone(),
            value: count,
        });
        cumulative.push(TimePoint {
            date,
            value: running,
        });
    }

    debug!(
        "Bucketed {} records into {} days",
        unique.len() - undated,
        daily.len()
    );

    DailyBuckets {
        daily: TimeSeries { points: daily },
        cumulative: TimeSeries { points: cumulative },
        unique_records: unique.len(),
        undated_records: undated,
    }
}

/// Cumulative daily series of unique records
pub fn bucket_and_accumulate<T, I, F>(records: I, date_of: F) -> TimeSeries
where
    T: Identified,
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> Option<String>,
{
    bucket_by_day(records, date_of).cumulative
}

/// Per-day counts of unique records, not accumulated
pub fn daily_counts<T, I, F>(records: I, date_of: F) -> TimeSeries
where
    T: Identified,
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> Option<String>,
{
    bucket_by_day(records, date_of).daily
}

/// Date of a node record: snapshot commit time, else its announcement time
pub fn node_date(node: &Node) -> Option<String> {
    node.commit_timestamp
        .as_deref()
        .and_then(rfc3339_to_iso_date)
        .or_else(|| node.announce_timestamp.and_then(millis_to_iso_date))
}

/// Date of a channel record: its funding time
pub fn channel_date(channel: &Channel) -> Option<String> {
    channel.created_timestamp.and_then(millis_to_iso_date)
}
