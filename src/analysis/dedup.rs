//! Deduplication of node and channel records
//!
//! Historical listings are assembled from overlapping snapshot buckets, so the
//! same node or channel can appear on several pages. Records are keyed by
//! their canonical identifier and the first occurrence wins.

use std::collections::HashSet;
use tracing::debug;

use crate::types::{Channel, Node};

/// Record with a canonical identity
pub trait Identified {
    fn canonical_id(&self) -> &str;
}

impl Identified for Node {
    fn canonical_id(&self) -> &str {
        &self.node_id
    }
}

impl Identified for Channel {
    fn canonical_id(&self) -> &str {
        &self.channel_outpoint
    }
}

/// Identifiers are hex strings; compare them trimmed and case-insensitively
fn normalise_id(id: &str) -> String {
    id.trim().to_ascii_lowercase()
}

/// Remove duplicates by canonical identifier, preserving first-seen order
pub fn dedup_by_id<T, I>(records: I) -> Vec<T>
where
    T: Identified,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    let mut dropped = 0usize;

    for record in records {
        if seen.insert(normalise_id(record.canonical_id())) {
            unique.push(record);
        } else {
            dropped += 1;
        }
    }

    if dropped > 0 {
        debug!(
            "Dropped {} duplicate records, {} unique remain",
            dropped,
            unique.len()
        );
    }
    unique
}
