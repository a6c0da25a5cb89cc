//! Fiber Network Explorer Analytics - Type System
//!
//! - `network`: Target network selector attached to every backend request
//! - `node`: Node records as returned by the node listings
//! - `channel`: Channel records, channel state and asset naming
//! - `asset`: Per-asset capacity summaries consumed by the combiner
//! - `pages`: Paged response envelopes and the lenient cursor decoding
//! - `analysis_results`: Derived, per-call aggregate views and time series

mod asset;
mod channel;
mod network;
mod node;
pub mod pages;

pub mod analysis_results;

pub use asset::AssetAnalysis;
pub use channel::{Channel, ChannelState};
pub use network::Network;
pub use node::Node;
pub use pages::{ChannelPage, NodePage, Page};

use serde::{Deserialize, Deserializer};

/// Timestamps arrive either as JSON numbers (milliseconds) or as
/// `0x`-prefixed hex strings, depending on the endpoint revision.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Number(u64),
    Text(String),
}

pub(crate) fn de_opt_timestamp<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawTimestamp> = Option::deserialize(deserializer)?;
    Ok(match raw {
        None => None,
        Some(RawTimestamp::Number(ms)) => Some(ms),
        Some(RawTimestamp::Text(text)) => {
            let trimmed = text.trim();
            if let Some(hex_digits) = trimmed.strip_prefix("0x") {
                u64::from_str_radix(hex_digits, 16).ok()
            } else {
                trimmed.parse::<u64>().ok()
            }
        }
    })
}

/// Decimal fields arrive as JSON strings or plain JSON numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDecimal {
    Text(String),
    Unsigned(u64),
    Float(f64),
}

pub(crate) fn de_decimal_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawDecimal::deserialize(deserializer)? {
        RawDecimal::Text(text) => text,
        RawDecimal::Unsigned(n) => n.to_string(),
        RawDecimal::Float(f) => f.to_string(),
    })
}
