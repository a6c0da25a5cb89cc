//! End-to-end tests of the analysis engine against a mock explorer backend
//!
//! These drive collection, deduplication and aggregation together, with the
//! backend served by `wiremock`.

use anyhow::Result;
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fiber_analytics::analysis::{
    AggregationOptions, AnalysisEngine, HistoryEntity, OutputFormat, ReportFormatter,
};
use fiber_analytics::api::DateRange;
use fiber_analytics::types::{Channel, Node};

use crate::common::{asset_row, channel_page_json, mock_config, node_page_json, sample_network};

async fn mount_page(server: &MockServer, endpoint: &str, page: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", endpoint)))
        .and(query_param("page", page))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Active listings spread over cursor pages, with one node repeated
async fn mount_active_nodes(server: &MockServer, nodes: &[Node]) {
    let second: Vec<Node> = vec![nodes[2].clone(), nodes[3].clone(), nodes[0].clone()];
    mount_page(server, "nodes_hourly", "0", node_page_json(&nodes[..2], 1, 4)).await;
    mount_page(server, "nodes_hourly", "1", node_page_json(&second, 2, 4)).await;
    mount_page(server, "nodes_hourly", "2", node_page_json(&[], 3, 4)).await;
}

fn dated_node(id: &str, commit: &str) -> Node {
    let mut node = Node::new(id);
    node.commit_timestamp = Some(commit.to_string());
    node
}

#[tokio::test]
async fn test_geographic_report_over_cursor_pages() -> Result<()> {
    let server = MockServer::start().await;
    let (nodes, channels) = sample_network();
    mount_active_nodes(&server, &nodes).await;
    mount_page(&server, "channels_hourly", "0", channel_page_json(&channels, 1, 4)).await;
    mount_page(&server, "channels_hourly", "1", channel_page_json(&[], 2, 4)).await;

    let engine = AnalysisEngine::new(mock_config(&server.uri(), 3))?;
    let options = AggregationOptions {
        asset: Some("ckb".to_string()),
    };
    let report = engine.geographic_report(&options).await;

    assert!(report.complete);
    assert_eq!(report.total_nodes, 4);
    assert_eq!(report.total_capacity, Decimal::from(1_700));

    let countries: Vec<&str> = report.countries.iter().map(|c| c.country.as_str()).collect();
    assert_eq!(countries, vec!["HK", "DE", "US"]);
    // ch1 half + ch2 in full (both ends local) + ch3 half
    assert_eq!(report.countries[0].total_capacity, Decimal::from(1_100));
    assert_eq!(report.countries[0].node_count, 2);

    // c1 has no coordinates
    assert_eq!(report.top_nodes.len(), 3);
    assert_eq!(report.top_nodes[0].node_id, "0xa1");
    assert!(report.cities.iter().all(|c| !c.city.is_empty()));
    Ok(())
}

#[tokio::test]
async fn test_unfiltered_report_flags_mixed_assets() -> Result<()> {
    let server = MockServer::start().await;
    let (nodes, channels) = sample_network();
    mount_active_nodes(&server, &nodes).await;
    mount_page(&server, "channels_hourly", "0", channel_page_json(&channels, 1, 4)).await;
    mount_page(&server, "channels_hourly", "1", channel_page_json(&[], 2, 4)).await;

    let engine = AnalysisEngine::new(mock_config(&server.uri(), 3))?;
    let report = engine.geographic_report(&AggregationOptions::default()).await;
    assert_eq!(report.assets, vec!["CKB", "RUSD"]);

    let output = ReportFormatter::format_countries(&report, &OutputFormat::Console)?;
    assert!(output.contains("(mixed units)"));
    assert!(!output.contains(" CKB\n"));
    Ok(())
}

#[tokio::test]
async fn test_page_failure_marks_report_incomplete() -> Result<()> {
    let server = MockServer::start().await;
    let (nodes, channels) = sample_network();
    mount_active_nodes(&server, &nodes).await;
    mount_page(&server, "channels_hourly", "0", channel_page_json(&channels[..2], 1, 4)).await;
    Mock::given(method("GET"))
        .and(path("/channels_hourly"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let engine = AnalysisEngine::new(mock_config(&server.uri(), 2))?;
    let report = engine.geographic_report(&AggregationOptions::default()).await;

    assert!(!report.complete);
    assert_eq!(report.total_nodes, 4);
    assert_eq!(report.total_channels, 2);
    assert!(!report.countries.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_history_deduplicates_overlapping_snapshots() -> Result<()> {
    let server = MockServer::start().await;
    let page0 = vec![
        dated_node("0x01", "2025-01-01T10:00:00Z"),
        dated_node("0x02", "2025-01-01T23:59:59Z"),
    ];
    let page1 = vec![
        dated_node("0x02", "2025-01-03T00:00:00Z"),
        dated_node("0x03", "2025-01-03T08:00:00Z"),
    ];
    let page2 = vec![dated_node("0x04", "2025-01-05T00:00:00Z")];
    mount_page(&server, "nodes_nearly_monthly", "0", node_page_json(&page0, 7, 0)).await;
    mount_page(&server, "nodes_nearly_monthly", "1", node_page_json(&page1, 0, 0)).await;
    mount_page(&server, "nodes_nearly_monthly", "2", node_page_json(&page2, 0, 0)).await;

    let engine = AnalysisEngine::new(mock_config(&server.uri(), 2))?;
    let report = engine
        .history(HistoryEntity::Nodes, &DateRange::default())
        .await;

    assert!(report.complete);
    assert_eq!(report.raw_records, 5);
    assert_eq!(report.unique_records, 4);
    let cumulative: Vec<(&str, u64)> = report
        .cumulative
        .points
        .iter()
        .map(|p| (p.date.as_str(), p.value))
        .collect();
    assert_eq!(
        cumulative,
        vec![("2025-01-01", 2), ("2025-01-03", 3), ("2025-01-05", 4)]
    );
    Ok(())
}

#[tokio::test]
async fn test_channel_history_skips_undated() -> Result<()> {
    let server = MockServer::start().await;
    let mut dated = Channel::new("0xc1", "0xa", "0xb", "0x64");
    // 2024-01-01T00:00:00Z
    dated.created_timestamp = Some(1_704_067_200_000);
    let undated = Channel::new("0xc2", "0xa", "0xb", "0x64");
    mount_page(
        &server,
        "channels_nearly_monthly",
        "0",
        channel_page_json(&[dated, undated], 0, 0),
    )
    .await;
    mount_page(&server, "channels_nearly_monthly", "1", channel_page_json(&[], 0, 0)).await;

    let engine = AnalysisEngine::new(mock_config(&server.uri(), 2))?;
    let report = engine
        .history(HistoryEntity::Channels, &DateRange::default())
        .await;

    assert_eq!(report.unique_records, 2);
    assert_eq!(report.undated_records, 1);
    assert_eq!(report.cumulative.last_value(), 1);
    Ok(())
}

#[tokio::test]
async fn test_asset_summary_combines_recognised_rows() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/analysis_hourly"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            asset_row("CKB", 1000, 10, 100, 90),
            asset_row("RUSD", 3000, 10, 300, 310),
            asset_row("DOGE", 99999, 1, 99999, 99999),
        ])))
        .mount(&server)
        .await;

    let engine = AnalysisEngine::new(mock_config(&server.uri(), 2))?;

    let summary = engine.asset_summary(None).await?;
    assert_eq!(summary.assets, vec!["CKB", "RUSD"]);
    assert!(summary.median_is_approximate);
    assert_eq!(summary.combined.total, "4000");
    assert_eq!(summary.combined.avg, "200");
    assert_eq!(summary.combined.max, "600");
    assert_eq!(summary.combined.min, "50");

    let single = engine.asset_summary(Some("ckb")).await?;
    assert_eq!(single.assets, vec!["CKB"]);
    assert!(!single.median_is_approximate);
    assert_eq!(single.combined.median, "90");
    Ok(())
}

#[tokio::test]
async fn test_asset_summary_propagates_backend_failure() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/analysis_hourly"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let engine = AnalysisEngine::new(mock_config(&server.uri(), 2))?;
    assert!(engine.asset_summary(None).await.is_err());
    Ok(())
}
