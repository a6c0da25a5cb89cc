//! Paged full-collection retrieval
//!
//! Listing endpoints hand out one page at a time. The collector drives one
//! page-fetch closure until the selected [`PaginationStrategy`] says stop and
//! concatenates everything into a single [`Collection`].
//!
//! ## Key Design Decisions
//!
//! - **Strictly sequential**: page N+1 is only requested after page N arrived
//! - **Partial results**: a failed page ends the loop; prior pages are kept and
//!   the failure travels in [`Collection::failure`] instead of being returned
//!   as an error
//! - **No retry here**: retrying a single request belongs to the API client
//! - **Bounded**: `max_pages` caps the number of requests per collection

use std::future::Future;
use tracing::{debug, warn};

use crate::config::CollectionConfig;
use crate::errors::{ApiError, ApiResult};
use crate::types::Page;

/// Termination protocol of a paged endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationStrategy {
    /// Server returns `next_page`; continue while it moves strictly forward
    Cursor,
    /// No cursor; a page shorter than the requested size is the last one
    Heuristic,
}

impl PaginationStrategy {
    /// Index of the page to fetch after `page`, or `None` to stop
    pub fn next_page<T>(&self, current: u64, page_size: usize, page: &Page<T>) -> Option<u64> {
        match self {
            PaginationStrategy::Cursor => {
                if page.records.is_empty() {
                    return None;
                }
                match page.next_page {
                    Some(next) if next > current => Some(next),
                    _ => None,
                }
            }
            PaginationStrategy::Heuristic => {
                if page.records.len() < page_size {
                    None
                } else {
                    Some(current + 1)
                }
            }
        }
    }
}

/// Parameters handed to the page-fetch closure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: usize,
}

/// How one collection run pages through an endpoint
#[derive(Debug, Clone)]
pub struct CollectorOptions {
    pub strategy: PaginationStrategy,
    pub page_size: usize,
    pub max_pages: usize,
    pub start_page: u64,
}

impl CollectorOptions {
    pub fn new(strategy: PaginationStrategy, config: &CollectionConfig) -> Self {
        Self {
            strategy,
            page_size: config.page_size,
            max_pages: config.max_pages,
            start_page: 0,
        }
    }
}

/// Everything gathered by one collection run
#[derive(Debug)]
pub struct Collection<T> {
    pub records: Vec<T>,
    pub pages_fetched: usize,
    /// Request failure that ended the run early, if any
    pub failure: Option<ApiError>,
    /// Run stopped because `max_pages` was reached
    pub truncated: bool,
}

impl<T> Collection<T> {
    /// True when the run drained the endpoint without failing or truncating
    pub fn is_complete(&self) -> bool {
        self.failure.is_none() && !self.truncated
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Fetch every page of an endpoint
///
/// # Arguments
/// * `label` - Endpoint name used in log lines
/// * `options` - Strategy, page size and bounds
/// * `fetch` - Issues one page request
///
/// # Returns
/// * `Collection<T>` - All records from successfully fetched pages, in order
pub async fn collect_all<T, F, Fut>(
    label: &str,
    options: &CollectorOptions,
    mut fetch: F,
) -> Collection<T>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = ApiResult<Page<T>>>,
{
    let page_size = options.page_size.max(1);
    let mut page = options.start_page;
    let mut records = Vec::new();
    let mut pages_fetched = 0usize;
    let mut failure = None;
    let mut truncated = false;

    loop {
        if pages_fetched >= options.max_pages {
            warn!(
                "{}: stopped after {} pages (max_pages reached), {} records collected",
                label,
                pages_fetched,
                records.len()
            );
            truncated = true;
            break;
        }

        match fetch(PageRequest { page, page_size }).await {
            Ok(result) => {
                pages_fetched += 1;
                let next = options.strategy.next_page(page, page_size, &result);
                debug!(
                    "{}: page {} returned {} records (next: {:?})",
                    label,
                    page,
                    result.records.len(),
                    next
                );
                records.extend(result.records);
                match next {
                    Some(next_page) => page = next_page,
                    None => break,
                }
            }
            Err(e) => {
                warn!(
                    "{}: page {} failed, returning {} records from {} earlier pages: {}",
                    label,
                    page,
                    records.len(),
                    pages_fetched,
                    e
                );
                failure = Some(e);
                break;
            }
        }
    }

    Collection {
        records,
        pages_fetched,
        failure,
        truncated,
    }
}
