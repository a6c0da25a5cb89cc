use serde::{Deserialize, Serialize};

/// Fiber node as listed by the explorer backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub node_id: String,
    #[serde(default)]
    pub node_name: String,
    /// Multiaddr strings, e.g. `/ip4/1.2.3.4/tcp/8228/p2p/Qm...`
    #[serde(default)]
    pub addresses: Vec<String>,
    #[serde(default, alias = "country")]
    pub country_or_region: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    /// "lat,lon"
    #[serde(default)]
    pub loc: Option<String>,
    /// Owner-set announcement time, milliseconds since epoch
    #[serde(default, deserialize_with = "super::de_opt_timestamp")]
    pub announce_timestamp: Option<u64>,
    /// RFC 3339 time of the snapshot bucket this record came from
    #[serde(default)]
    pub commit_timestamp: Option<String>,
}

impl Node {
    /// Create a node with only its identity set
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            node_name: String::new(),
            addresses: Vec::new(),
            country_or_region: None,
            city: None,
            region: None,
            loc: None,
            announce_timestamp: None,
            commit_timestamp: None,
        }
    }

    pub fn first_address(&self) -> Option<&str> {
        self.addresses.first().map(String::as_str)
    }
}
