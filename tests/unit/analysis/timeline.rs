//! Unit tests for historical growth series

use fiber_analytics::analysis::{bucket_and_accumulate, bucket_by_day, channel_date, node_date};
use fiber_analytics::types::{Channel, Node};

fn channels_from_json(json: &str) -> Vec<Channel> {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_hex_created_timestamps_are_bucketed() {
    // 0x18cc251f400 = 1704067200000 (2024-01-01T00:00:00Z)
    let channels = channels_from_json(
        r#"[
            {"channel_outpoint":"0x1","node1":"0xa","node2":"0xb","capacity":"0x1","created_timestamp":"0x18cc251f400"},
            {"channel_outpoint":"0x2","node1":"0xa","node2":"0xb","capacity":"0x1","created_timestamp":1704153600000},
            {"channel_outpoint":"0x1","node1":"0xa","node2":"0xb","capacity":"0x1","created_timestamp":1704153600000}
        ]"#,
    );

    let series = bucket_and_accumulate(channels, channel_date);
    let points: Vec<(&str, u64)> = series
        .points
        .iter()
        .map(|p| (p.date.as_str(), p.value))
        .collect();
    assert_eq!(points, vec![("2024-01-01", 1), ("2024-01-02", 2)]);
}

#[test]
fn test_cumulative_is_non_decreasing() {
    let mut nodes = Vec::new();
    for (i, day) in [3u64, 1, 4, 1, 5, 9, 2, 6].iter().enumerate() {
        let mut node = Node::new(format!("0x{:02x}", i));
        node.commit_timestamp = Some(format!("2025-03-{:02}T08:00:00Z", day));
        nodes.push(node);
    }

    let buckets = bucket_by_day(nodes, node_date);
    assert_eq!(buckets.unique_records, 8);
    assert_eq!(buckets.cumulative.last_value(), 8);
    let values: Vec<u64> = buckets.cumulative.points.iter().map(|p| p.value).collect();
    assert!(values.windows(2).all(|w| w[0] <= w[1]));
    let dates: Vec<&str> = buckets.daily.points.iter().map(|p| p.date.as_str()).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
}
