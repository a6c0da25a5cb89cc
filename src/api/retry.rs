//! Retry logic for single explorer requests
//!
//! Pagination never retries on its own; a page is only reported as failed
//! after this layer has exhausted its attempts.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, warn};

use crate::config::ApiConfig;
use crate::errors::ApiResult;

/// Calculate next backoff duration using exponential backoff with a maximum cap
///
/// This is a pure helper function that implements the exponential backoff formula:
/// `new_backoff = min(current_backoff * multiplier, max_backoff)`
///
/// # Arguments
/// * `current_backoff` - Current backoff duration
/// * `multiplier` - Multiplier for exponential increase (typically 1.5-2.0)
/// * `max_backoff_seconds` - Maximum backoff duration in seconds
///
/// # Returns
/// New backoff duration, capped at max_backoff_seconds
///
/// # Example
/// ```
/// use std::time::Duration;
/// use fiber_analytics::api::calculate_next_backoff;
///
/// let backoff = Duration::from_millis(100);
/// let next = calculate_next_backoff(backoff, 2.0, 30);
/// assert_eq!(next, Duration::from_millis(200));
/// ```
pub fn calculate_next_backoff(
    current_backoff: Duration,
    multiplier: f64,
    max_backoff_seconds: u64,
) -> Duration {
    Duration::from_millis((current_backoff.as_millis() as f64 * multiplier) as u64)
        .min(Duration::from_secs(max_backoff_seconds))
}

/// How often and how patiently a failed request is repeated
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Attempts after the first one
    pub max_retries: usize,
    pub initial_backoff: Duration,
    pub backoff_multiplier: f64,
    pub max_backoff_seconds: u64,
}

impl RetryPolicy {
    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_backoff: Duration::from_millis(config.initial_backoff_ms),
            backoff_multiplier: config.backoff_multiplier,
            max_backoff_seconds: config.max_backoff_seconds,
        }
    }

    /// Single attempt, no retries
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::ZERO,
            backoff_multiplier: 1.0,
            max_backoff_seconds: 0,
        }
    }

    /// Run `operation` until it succeeds, fails permanently or runs out of
    /// attempts
    ///
    /// Only errors for which [`ApiError::is_retryable`](crate::errors::ApiError::is_retryable)
    /// holds are repeated; the last error is returned unchanged.
    pub async fn run<T, F, Fut>(&self, label: &str, mut operation: F) -> ApiResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let mut attempts = 0usize;
        let mut backoff = self.initial_backoff;

        loop {
            match operation().await {
                Ok(value) => {
                    if attempts > 0 {
                        debug!("{} succeeded after {} attempts", label, attempts + 1);
                    }
                    return Ok(value);
                }
                Err(e) if !e.is_retryable() => {
                    debug!("{} failed (non-retryable): {}", label, e);
                    return Err(e);
                }
                Err(e) => {
                    attempts += 1;
                    if attempts > self.max_retries {
                        error!("{} failed after {} attempts: {}", label, attempts, e);
                        return Err(e);
                    }

                    warn!(
                        "{} attempt {} failed, retrying in {:?}: {}",
                        label, attempts, backoff, e
                    );
                    sleep(backoff).await;

                    backoff = calculate_next_backoff(
                        backoff,
                        self.backoff_multiplier,
                        self.max_backoff_seconds,
                    );
                }
            }
        }
    }
}
