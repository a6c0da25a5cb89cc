//! Unit tests for the paged collector driving in-memory page sources

use std::cell::RefCell;

use fiber_analytics::collector::{collect_all, CollectorOptions, PaginationStrategy};
use fiber_analytics::config::CollectionConfig;
use fiber_analytics::errors::ApiError;
use fiber_analytics::types::{Node, Page};

fn nodes(range: std::ops::Range<u64>) -> Vec<Node> {
    range.map(|i| Node::new(format!("0x{:02x}", i))).collect()
}

#[tokio::test]
async fn test_failure_on_third_of_five_pages_returns_first_two() {
    let config = CollectionConfig {
        page_size: 2,
        max_pages: 100,
    };
    let options = CollectorOptions::new(PaginationStrategy::Heuristic, &config);
    let requested = RefCell::new(Vec::new());

    let collection = collect_all("nodes", &options, |req| {
        requested.borrow_mut().push(req.page);
        async move {
            match req.page {
                2 => Err(ApiError::Transport {
                    endpoint: "nodes_nearly_monthly".to_string(),
                    message: "connection reset".to_string(),
                }),
                p => Ok(Page::without_cursor(nodes(p * 2..p * 2 + 2))),
            }
        }
    })
    .await;

    assert_eq!(*requested.borrow(), vec![0, 1, 2]);
    let ids: Vec<&str> = collection
        .records
        .iter()
        .map(|n| n.node_id.as_str())
        .collect();
    assert_eq!(ids, vec!["0x00", "0x01", "0x02", "0x03"]);
    assert!(matches!(collection.failure, Some(ApiError::Transport { .. })));
    assert!(!collection.is_complete());
}

#[tokio::test]
async fn test_cursor_ignores_backwards_pointer() {
    let config = CollectionConfig {
        page_size: 10,
        max_pages: 100,
    };
    let options = CollectorOptions::new(PaginationStrategy::Cursor, &config);
    let requested = RefCell::new(Vec::new());

    let collection = collect_all("channels", &options, |req| {
        requested.borrow_mut().push(req.page);
        async move {
            // Second page points back at the first
            let next = if req.page == 0 { 1 } else { 0 };
            Ok(Page::with_cursor(nodes(req.page..req.page + 1), next))
        }
    })
    .await;

    assert_eq!(*requested.borrow(), vec![0, 1]);
    assert_eq!(collection.len(), 2);
    assert!(collection.is_complete());
}

#[tokio::test]
async fn test_heuristic_exact_multiple_needs_one_empty_page() {
    let config = CollectionConfig {
        page_size: 3,
        max_pages: 100,
    };
    let options = CollectorOptions::new(PaginationStrategy::Heuristic, &config);
    let requested = RefCell::new(Vec::new());

    let collection = collect_all("nodes", &options, |req| {
        requested.borrow_mut().push(req.page);
        async move {
            let records = if req.page < 2 {
                nodes(req.page * 3..req.page * 3 + 3)
            } else {
                Vec::new()
            };
            Ok(Page::without_cursor(records))
        }
    })
    .await;

    assert_eq!(*requested.borrow(), vec![0, 1, 2]);
    assert_eq!(collection.len(), 6);
}

#[tokio::test]
async fn test_first_page_failure_yields_empty_collection() {
    let options = CollectorOptions::new(PaginationStrategy::Cursor, &CollectionConfig::default());

    let collection = collect_all("nodes", &options, |_req| async {
        Err::<Page<Node>, _>(ApiError::Status {
            endpoint: "nodes_hourly".to_string(),
            status: 502,
        })
    })
    .await;

    assert!(collection.is_empty());
    assert_eq!(collection.pages_fetched, 0);
    assert!(collection.failure.is_some());
}
