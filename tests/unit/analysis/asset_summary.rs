//! Unit tests for combining backend per-asset summaries

use fiber_analytics::analysis::AssetCombiner;
use fiber_analytics::types::AssetAnalysis;

use crate::common::asset_row;

fn rows(values: Vec<serde_json::Value>) -> Vec<AssetAnalysis> {
    serde_json::from_value(serde_json::Value::Array(values)).unwrap()
}

#[test]
fn test_combines_recognised_assets_only() {
    let rows = rows(vec![
        asset_row("CKB", 1_000, 10, 100, 80),
        asset_row("RUSD", 3_000, 30, 100, 120),
        asset_row("SHIB", 9_999, 1, 9_999, 9_999),
    ]);
    let combiner = AssetCombiner::new(["CKB", "RUSD", "USDI"]);

    let selected: Vec<&str> = combiner
        .select(&rows, None)
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(selected, vec!["CKB", "RUSD"]);

    let combined = combiner.combine(&rows, None);
    assert_eq!(combined.total, "4000");
    assert_eq!(combined.channel_len, "40");
    assert_eq!(combined.avg, "100");
    assert_eq!(combined.median, "100");
    assert_eq!(combined.max, "200");
    assert_eq!(combined.min, "50");
}

#[test]
fn test_numeric_json_fields_are_accepted() {
    let json = r#"[{"name":"USDI","max":10,"min":1,"avg":5,"median":4,"total":50,"channel_len":10}]"#;
    let rows: Vec<AssetAnalysis> = serde_json::from_str(json).unwrap();
    let combined = AssetCombiner::new(["USDI"]).combine(&rows, Some("usdi"));
    assert_eq!(combined, rows[0]);
}

#[test]
fn test_configured_recognised_list() {
    let rows = rows(vec![asset_row("CKB", 1, 1, 1, 1)]);
    let combined = AssetCombiner::new(["RUSD"]).combine(&rows, None);
    assert_eq!(combined.total, "0");
    assert_eq!(combined.channel_len, "0");
}
