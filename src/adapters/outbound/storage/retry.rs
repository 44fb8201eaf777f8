use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::warn;

use crate::config::StorageOptions;
use crate::domain::errors::{ClientError, StorageError, StorageResult};

/// Retry policy for remote storage calls: exponential backoff with
/// decorrelated jitter, an immediate first retry to absorb momentary blips,
/// and a hard stop on `NotFound`.
///
/// One immutable value is built per adapter at construction and passed into
/// every operation; there is no ambient retry state.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    median_first_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, median_first_delay: Duration) -> Self {
        Self {
            max_retries,
            median_first_delay,
        }
    }

    pub fn from_options(options: &StorageOptions) -> Self {
        Self::new(options.max_retries, options.median_first_retry_delay)
    }

    /// Runs `operation` until it succeeds, answers `NotFound`, or the retry
    /// budget is spent. `object_name` feeds diagnostics and the not-found
    /// error only.
    pub async fn execute<T, F, Fut>(&self, object_name: &str, operation: F) -> StorageResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let mut failures = 0u32;
        let mut prev_delay = self.median_first_delay;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(ClientError::NotFound { .. }) => {
                    // A 404 is an answer, not a glitch: fail out immediately.
                    return Err(StorageError::ObjectNotFound {
                        name: object_name.to_owned(),
                    });
                }
                Err(source) => {
                    failures += 1;
                    if failures >= self.max_retries {
                        return Err(StorageError::RetriesExhausted {
                            name: object_name.to_owned(),
                            attempts: failures,
                            source,
                        });
                    }
                    let delay = if failures == 1 {
                        Duration::ZERO
                    } else {
                        let next = Self::decorrelated(self.median_first_delay, prev_delay);
                        prev_delay = next;
                        next
                    };
                    warn!(
                        object = object_name,
                        attempt = failures,
                        delay_ms = delay.as_millis() as u64,
                        error = %source,
                        "remote call failed, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Next delay under decorrelated jitter: uniform between the configured
    /// median and three times the previous delay.
    fn decorrelated(median: Duration, prev: Duration) -> Duration {
        let low = median.as_secs_f64();
        let high = (prev.as_secs_f64() * 3.0).max(low);
        if high <= low {
            return median;
        }
        Duration::from_secs_f64(rand::thread_rng().gen_range(low..high))
    }
}
