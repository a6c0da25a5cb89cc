use chrono::NaiveDate;
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use super::retry::RetryPolicy;
use crate::collector::PageRequest;
use crate::config::ApiConfig;
use crate::errors::{ApiError, ApiResult};
use crate::types::analysis_results::{AnalysisRequest, AnalysisResponse};
use crate::types::{AssetAnalysis, Channel, ChannelPage, ChannelState, Network, Node, NodePage, Page};

/// Optional date window of the historical listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(start) = self.start {
            pairs.push(("start", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end {
            pairs.push(("end", end.format("%Y-%m-%d").to_string()));
        }
        pairs
    }
}

#[derive(Deserialize)]
struct NodeInfoEnvelope {
    #[serde(default)]
    node_info: Option<Node>,
}

#[derive(Deserialize)]
struct ChannelInfoEnvelope {
    #[serde(default)]
    channel_info: Option<Channel>,
}

fn page_query(request: PageRequest) -> Vec<(&'static str, String)> {
    vec![
        ("page", request.page.to_string()),
        ("page_size", request.page_size.to_string()),
    ]
}

/// HTTP client for the Fiber explorer backend
///
/// Every request carries the configured `net` parameter and goes through the
/// [`RetryPolicy`]. Responses are classified into the [`ApiError`] taxonomy:
/// non-2xx statuses, bodies that fail to parse into the expected shape, and
/// payloads carrying an explicit failure flag.
#[derive(Debug, Clone)]
pub struct ExplorerClient {
    http: reqwest::Client,
    base_url: Url,
    network: Network,
    retry: RetryPolicy,
}

impl ExplorerClient {
    /// Create a client from the `[api]` configuration section
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let mut base = config.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url =
            Url::parse(&base).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base, e)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ApiError::Transport {
                endpoint: base_url.to_string(),
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        debug!("Explorer client for {} ({})", base_url, config.network);

        Ok(Self {
            http,
            base_url,
            network: config.network,
            retry: RetryPolicy::from_config(config),
        })
    }

    pub fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint_url(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{}{}: {}", self.base_url, path, e)))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        mut query: Vec<(&'static str, String)>,
    ) -> ApiResult<T> {
        let url = self.endpoint_url(path)?;
        query.push(("net", self.network.as_str().to_string()));

        self.retry
            .run(path, || {
                execute(path, self.http.get(url.clone()).query(&query))
            })
            .await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ApiResult<T> {
        let url = self.endpoint_url(path)?;
        let net = [("net", self.network.as_str())];

        self.retry
            .run(path, || {
                execute(path, self.http.post(url.clone()).query(&net).json(body))
            })
            .await
    }

    /// One page of currently active nodes (cursor paged)
    pub async fn nodes_hourly(&self, request: PageRequest) -> ApiResult<Page<Node>> {
        let page: NodePage = self.get("nodes_hourly", page_query(request)).await?;
        Ok(page.into())
    }

    /// One page of currently active channels (cursor paged)
    pub async fn channels_hourly(&self, request: PageRequest) -> ApiResult<Page<Channel>> {
        let page: ChannelPage = self.get("channels_hourly", page_query(request)).await?;
        Ok(page.into())
    }

    /// One page of the historical node listing
    ///
    /// The backend builds this from overlapping snapshots so its cursor is not
    /// trustworthy; the returned page never carries one.
    pub async fn nodes_monthly(
        &self,
        request: PageRequest,
        range: &DateRange,
    ) -> ApiResult<Page<Node>> {
        let mut query = page_query(request);
        query.extend(range.query_pairs());
        let page: NodePage = self.get("nodes_nearly_monthly", query).await?;
        Ok(Page::without_cursor(page.nodes))
    }

    /// One page of the historical channel listing (no usable cursor)
    pub async fn channels_monthly(
        &self,
        request: PageRequest,
        range: &DateRange,
    ) -> ApiResult<Page<Channel>> {
        let mut query = page_query(request);
        query.extend(range.query_pairs());
        let page: ChannelPage = self.get("channels_nearly_monthly", query).await?;
        Ok(Page::without_cursor(page.channels))
    }

    pub async fn node_info(&self, node_id: &str) -> ApiResult<Option<Node>> {
        let envelope: NodeInfoEnvelope = self
            .get("node_info", vec![("node_id", node_id.to_string())])
            .await?;
        Ok(envelope.node_info)
    }

    pub async fn channel_info(&self, channel_outpoint: &str) -> ApiResult<Option<Channel>> {
        let envelope: ChannelInfoEnvelope = self
            .get(
                "channel_info",
                vec![("channel_outpoint", channel_outpoint.to_string())],
            )
            .await?;
        Ok(envelope.channel_info)
    }

    pub async fn channel_state(&self, channel_outpoint: &str) -> ApiResult<ChannelState> {
        self.get(
            "channel_state",
            vec![("channel_outpoint", channel_outpoint.to_string())],
        )
        .await
    }

    /// One page of the channels a node is an endpoint of
    pub async fn channels_by_node_id(
        &self,
        node_id: &str,
        request: PageRequest,
    ) -> ApiResult<Page<Channel>> {
        let mut query = page_query(request);
        query.push(("node_id", node_id.to_string()));
        let page: ChannelPage = self.get("channels_by_node_id", query).await?;
        Ok(page.into())
    }

    /// Channels grouped by lifecycle state, optionally narrowed by asset and
    /// a fuzzy name match
    pub async fn channels_by_state(
        &self,
        state: &str,
        request: PageRequest,
        asset_name: Option<&str>,
        fuzz_name: Option<&str>,
    ) -> ApiResult<Value> {
        let mut query = page_query(request);
        query.push(("state", state.to_string()));
        if let Some(asset) = asset_name {
            query.push(("asset_name", asset.to_string()));
        }
        if let Some(name) = fuzz_name {
            query.push(("fuzz_name", name.to_string()));
        }
        self.get("channels_by_state", query).await
    }

    pub async fn capacity_distribution(&self) -> ApiResult<Value> {
        self.get("channel_capacity_distribution", Vec::new()).await
    }

    pub async fn channel_count_by_state(&self) -> ApiResult<Value> {
        self.get("channel_count_by_state", Vec::new()).await
    }

    pub async fn channel_count_by_asset(&self) -> ApiResult<Value> {
        self.get("channel_count_by_asset", Vec::new()).await
    }

    /// Per-asset capacity summaries of the latest hourly snapshot
    pub async fn analysis_hourly(&self) -> ApiResult<Vec<AssetAnalysis>> {
        self.get("analysis_hourly", Vec::new()).await
    }

    /// Time-bucketed metrics over a range
    pub async fn analysis(
        &self,
        range: &str,
        interval: &str,
        fields: &[String],
    ) -> ApiResult<AnalysisResponse> {
        let body = AnalysisRequest {
            range: range.to_string(),
            interval: interval.to_string(),
            fields: fields.to_vec(),
            net: self.network,
        };
        self.post("analysis", &body).await
    }

    /// Fetch a single active-node record to prove the backend is reachable
    pub async fn test_connection(&self) -> ApiResult<usize> {
        let page = self
            .nodes_hourly(PageRequest {
                page: 0,
                page_size: 1,
            })
            .await?;
        info!(
            "Explorer backend reachable at {} ({}), total nodes reported: {:?}",
            self.base_url, self.network, page.total_count
        );
        Ok(page.total_count.unwrap_or(page.records.len()))
    }
}

/// Send one request and classify the outcome
async fn execute<T: DeserializeOwned>(endpoint: &str, request: RequestBuilder) -> ApiResult<T> {
    let response = request.send().await.map_err(|e| ApiError::Transport {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|e| ApiError::Transport {
        endpoint: endpoint.to_string(),
        message: format!("Failed to read body: {}", e),
    })?;

    parse_body(endpoint, &body)
}

/// Parse a response body into `T`, honouring an explicit failure flag first
pub(crate) fn parse_body<T: DeserializeOwned>(endpoint: &str, body: &str) -> ApiResult<T> {
    let validation = |e: serde_json::Error| ApiError::Validation {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    };

    let value: Value = serde_json::from_str(body).map_err(validation)?;
    check_failure_flag(endpoint, &value)?;
    serde_json::from_value(value).map_err(validation)
}

/// `{"success": false, ...}` or a non-null `"error"` member marks a failed call
fn check_failure_flag(endpoint: &str, value: &Value) -> ApiResult<()> {
    let Some(object) = value.as_object() else {
        return Ok(());
    };

    let failed = object.get("success").and_then(Value::as_bool) == Some(false);
    let error = object.get("error").filter(|e| !e.is_null());

    if !failed && error.is_none() {
        return Ok(());
    }

    let message = object
        .get("message")
        .or(error)
        .map(|m| match m.as_str() {
            Some(text) => text.to_string(),
            None => m.to_string(),
        })
        .unwrap_or_else(|| "request reported failure".to_string());

    Err(ApiError::Application {
        endpoint: endpoint.to_string(),
        message,
    })
}
