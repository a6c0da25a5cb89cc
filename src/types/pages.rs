//! Paged response envelopes
//!
//! Listing endpoints return one page of records plus, for cursor-paged
//! endpoints, a `next_page` pointer. The pointer is decoded leniently: anything
//! that is not a non-negative JSON integer becomes `None`, which the collector
//! treats as "no valid forward cursor".

use serde::{Deserialize, Deserializer, Serialize};

use super::{Channel, Node};

/// One page of records in endpoint-independent form
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub records: Vec<T>,
    pub next_page: Option<u64>,
    pub total_count: Option<usize>,
}

impl<T> Page<T> {
    /// Page from an endpoint that returns a forward cursor
    pub fn with_cursor(records: Vec<T>, next_page: u64) -> Self {
        Self {
            records,
            next_page: Some(next_page),
            total_count: None,
        }
    }

    /// Page from an endpoint without pagination metadata
    pub fn without_cursor(records: Vec<T>) -> Self {
        Self {
            records,
            next_page: None,
            total_count: None,
        }
    }
}

/// Node listing response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodePage {
    #[serde(default, deserialize_with = "de_cursor")]
    pub next_page: Option<u64>,
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub total_count: Option<usize>,
}

impl From<NodePage> for Page<Node> {
    fn from(page: NodePage) -> Self {
        Page {
            records: page.nodes,
            next_page: page.next_page,
            total_count: page.total_count,
        }
    }
}

/// Channel listing response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelPage {
    #[serde(default, deserialize_with = "de_cursor")]
    pub next_page: Option<u64>,
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub total_count: Option<usize>,
}

impl From<ChannelPage> for Page<Channel> {
    fn from(page: ChannelPage) -> Self {
        Page {
            records: page.channels,
            next_page: page.next_page,
            total_count: page.total_count,
        }
    }
}

fn de_cursor<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_u64()))
}
