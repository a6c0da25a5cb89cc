//! Unit tests for the explorer HTTP client against a mock backend
//!
//! Each test starts its own `wiremock` server and checks request shape
//! (path, `net`, paging parameters) and the error classification.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use fiber_analytics::api::{DateRange, ExplorerClient, RetryPolicy};
use fiber_analytics::collector::PageRequest;
use fiber_analytics::errors::ApiError;
use fiber_analytics::types::{Network, Node};

use crate::common::{channel_page_json, mock_config, native_channel, node_page_json};

fn client_for(server: &MockServer) -> ExplorerClient {
    ExplorerClient::new(&mock_config(&server.uri(), 2).api).unwrap()
}

fn first_page() -> PageRequest {
    PageRequest {
        page: 0,
        page_size: 2,
    }
}

#[tokio::test]
async fn test_nodes_hourly_request_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nodes_hourly"))
        .and(query_param("page", "0"))
        .and(query_param("page_size", "2"))
        .and(query_param("net", "testnet"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(node_page_json(&[Node::new("0x02aa")], 1, 17)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).with_network(Network::Testnet);
    let page = client.nodes_hourly(first_page()).await.unwrap();

    assert_eq!(page.records.len(), 1);
    assert_eq!(page.records[0].node_id, "0x02aa");
    assert_eq!(page.next_page, Some(1));
    assert_eq!(page.total_count, Some(17));
}

#[tokio::test]
async fn test_monthly_listing_drops_cursor_and_sends_range() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/channels_nearly_monthly"))
        .and(query_param("start", "2025-01-01"))
        .and(query_param("net", "mainnet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(channel_page_json(
            &[native_channel("0xc1", "0xa", "0xb", 100)],
            5,
            1,
        )))
        .mount(&server)
        .await;

    let range = DateRange {
        start: chrono::NaiveDate::from_ymd_opt(2025, 1, 1),
        end: None,
    };
    let page = client_for(&server)
        .channels_monthly(first_page(), &range)
        .await
        .unwrap();

    assert_eq!(page.records.len(), 1);
    assert_eq!(page.next_page, None);
}

#[tokio::test]
async fn test_channels_by_node_id_request_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/channels_by_node_id"))
        .and(query_param("node_id", "0x02aa"))
        .and(query_param("page", "3"))
        .and(query_param("page_size", "2"))
        .and(query_param("net", "testnet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(channel_page_json(
            &[native_channel("0xc1", "0x02aa", "0x03bb", 10)],
            4,
            7,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .with_network(Network::Testnet)
        .channels_by_node_id("0x02aa", PageRequest { page: 3, page_size: 2 })
        .await
        .unwrap();
    assert_eq!(page.records[0].node1, "0x02aa");
    assert_eq!(page.next_page, Some(4));
}

#[tokio::test]
async fn test_channels_by_state_optional_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/channels_by_state"))
        .and(query_param("state", "open"))
        .and(query_param("asset_name", "RUSD"))
        .and(query_param("fuzz_name", "hk"))
        .and(query_param("net", "mainnet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"list": [], "total": 0})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/channels_by_state"))
        .and(query_param("state", "closed"))
        .and(query_param("net", "mainnet"))
        .respond_with(|request: &Request| {
            let unfiltered = !request
                .url
                .query_pairs()
                .any(|(key, _)| key == "asset_name" || key == "fuzz_name");
            ResponseTemplate::new(200).set_body_json(json!({ "unfiltered": unfiltered }))
        })
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let filtered = client
        .channels_by_state("open", first_page(), Some("RUSD"), Some("hk"))
        .await
        .unwrap();
    assert_eq!(filtered["total"], json!(0));

    let plain = client
        .channels_by_state("closed", first_page(), None, None)
        .await
        .unwrap();
    assert_eq!(plain["unfiltered"], json!(true));
}

#[tokio::test]
async fn test_channel_count_by_asset_tagged_with_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/channel_count_by_asset"))
        .and(query_param("net", "testnet"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"name": "CKB", "count": 12}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let counts = client_for(&server)
        .with_network(Network::Testnet)
        .channel_count_by_asset()
        .await
        .unwrap();
    assert_eq!(counts[0]["count"], json!(12));
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/analysis_hourly"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/analysis_hourly"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let rows = client_for(&server).analysis_hourly().await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/channel_state"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).channel_state("0xmissing").await;
    assert!(matches!(
        result,
        Err(ApiError::Status { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_retries_exhausted_returns_last_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nodes_hourly"))
        .respond_with(ResponseTemplate::new(500))
        // first attempt plus one retry
        .expect(2)
        .mount(&server)
        .await;

    let result = client_for(&server).nodes_hourly(first_page()).await;
    assert!(matches!(
        result,
        Err(ApiError::Status { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_failure_flag_and_shape_mismatch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/channel_count_by_state"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "db offline"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/channels_hourly"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rows": []})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.channel_count_by_state().await {
        Err(ApiError::Application { message, .. }) => assert_eq!(message, "db offline"),
        other => panic!("expected application error, got {:?}", other),
    }
    assert!(matches!(
        client.channels_hourly(first_page()).await,
        Err(ApiError::Validation { .. })
    ));
}

#[tokio::test]
async fn test_info_envelopes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/node_info"))
        .and(query_param("node_id", "0x02aa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "node_info": {"node_id": "0x02aa", "node_name": "hk-1", "addresses": []}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/channel_info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "channel_info": null })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let node = client.node_info("0x02aa").await.unwrap().unwrap();
    assert_eq!(node.node_name, "hk-1");
    assert!(client.channel_info("0xnone").await.unwrap().is_none());
}

#[tokio::test]
async fn test_range_analysis_posts_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analysis"))
        .and(body_partial_json(json!({"range": "1M", "interval": "day", "net": "testnet"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "series": [{"name": "capacity", "points": [{"timestamp": "2025-01-01", "value": 10}]}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .with_network(Network::Testnet)
        .analysis("1M", "day", &["capacity".to_string()])
        .await
        .unwrap();
    assert_eq!(response.series.len(), 1);
    assert_eq!(response.series[0].points[0].value, json!(10));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let mut config = mock_config("http://127.0.0.1:9", 2);
    config.api.timeout_seconds = 2;
    let client = ExplorerClient::new(&config.api)
        .unwrap()
        .with_retry_policy(RetryPolicy::none());

    let result = client.capacity_distribution().await;
    assert!(matches!(result, Err(ApiError::Transport { .. })));
}
