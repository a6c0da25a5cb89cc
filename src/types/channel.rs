use serde::{Deserialize, Serialize};

use crate::codec::NATIVE_ASSET;

/// Funded payment channel between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Funding transaction output; the canonical identity of a channel
    pub channel_outpoint: String,
    pub node1: String,
    pub node2: String,
    /// Hex-encoded amount in the asset's smallest unit
    pub capacity: String,
    /// Asset name; absent means the native asset
    #[serde(default, alias = "asset_name", alias = "udt_name")]
    pub asset: Option<String>,
    /// Block header time of the funding transaction, milliseconds since epoch
    #[serde(default, deserialize_with = "super::de_opt_timestamp")]
    pub created_timestamp: Option<u64>,
    #[serde(default)]
    pub commit_timestamp: Option<String>,
    #[serde(default)]
    pub last_commit_time: Option<String>,
}

impl Channel {
    pub fn new(
        channel_outpoint: impl Into<String>,
        node1: impl Into<String>,
        node2: impl Into<String>,
        capacity: impl Into<String>,
    ) -> Self {
        Self {
            channel_outpoint: channel_outpoint.into(),
            node1: node1.into(),
            node2: node2.into(),
            capacity: capacity.into(),
            asset: None,
            created_timestamp: None,
            commit_timestamp: None,
            last_commit_time: None,
        }
    }

    /// Asset name with the native-asset default applied
    pub fn asset_name(&self) -> &str {
        match self.asset.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => NATIVE_ASSET,
        }
    }

    pub fn is_asset(&self, asset: &str) -> bool {
        self.asset_name().eq_ignore_ascii_case(asset.trim())
    }
}

/// Lifecycle state and transaction history of a single channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelState {
    #[serde(default)]
    pub channel_outpoint: Option<String>,
    pub state: String,
    #[serde(default)]
    pub txs: Vec<serde_json::Value>,
}
