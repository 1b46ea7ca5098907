//! Bounded retry for result store operations.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, warn};

use crate::domain::assessment::AssessmentError;

/// Exponential backoff for retryable store failures.
///
/// Only `StoreUnavailable` is retried; every other error returns on the
/// first attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreRetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

const MAX_BACKOFF_SHIFT: u32 = 6;

impl StoreRetryPolicy {
    /// `max_attempts` counts the first try; values below 1 are raised to 1.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// A single attempt with no retry.
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay before retry number `attempt` (1-based): base, 2x base, 4x base, ...
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(MAX_BACKOFF_SHIFT);
        self.base_delay * (1u32 << shift)
    }

    /// Runs `op` until it succeeds, fails with a non-retryable error, or the
    /// attempts are exhausted.
    pub async fn run<T, F, Fut>(&self, operation: &'static str, mut op: F) -> Result<T, AssessmentError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AssessmentError>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < self.max_attempts => {
                    warn!(
                        operation,
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %err,
                        "Result store operation failed, retrying"
                    );
                    sleep(self.delay_for(attempt)).await;
                    attempt += 1;
                }
                Err(err) => {
                    if err.is_retryable() {
                        error!(
                            operation,
                            attempts = attempt,
                            error = %err,
                            "Result store operation failed after all retries"
                        );
                    }
                    return Err(err);
                }
            }
        }
    }
}

impl Default for StoreRetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(50))
    }
}
