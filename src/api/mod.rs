//! Fiber explorer backend integration module
//!
//! This module provides all HTTP access to the explorer backend:
//! - **Client** - Typed endpoint methods over `reqwest`, tagged with `net`
//! - **Retry** - Exponential backoff for transport failures and 5xx/429
//!
//! Pagination lives in [`crate::collector`]; the client only fetches single
//! pages.

pub mod client;
pub mod retry;

// Re-export main types
pub use client::{DateRange, ExplorerClient};
pub use retry::{calculate_next_backoff, RetryPolicy};
