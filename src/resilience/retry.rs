//! Retry Logic
//!
//! Exponential backoff retry with jitter for PIX API calls.

use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{PixError, PixResult};
use crate::utils::constants::{DEFAULT_BASE_DELAY, DEFAULT_MAX_DELAY, DEFAULT_MAX_RETRIES};

/// Status codes worth another attempt.
pub const RETRYABLE_STATUS_CODES: [u16; 6] = [408, 429, 500, 502, 503, 504];

/// Check if an HTTP status is retryable.
pub fn is_retryable_status(status: u16) -> bool {
    RETRYABLE_STATUS_CODES.contains(&status)
}

/// Retry configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retries after the first attempt. Total attempts is `max_retries + 1`.
    pub max_retries: u32,
    /// Base delay, doubled on every attempt.
    pub base_delay: Duration,
    /// Upper bound for a single delay.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        DEFAULT_RETRY_CONFIG
    }
}

/// Default retry configuration.
pub const DEFAULT_RETRY_CONFIG: RetryConfig = RetryConfig {
    max_retries: DEFAULT_MAX_RETRIES,
    base_delay: DEFAULT_BASE_DELAY,
    max_delay: DEFAULT_MAX_DELAY,
};

impl RetryConfig {
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..DEFAULT_RETRY_CONFIG
        }
    }

    /// Delay before retry number `attempt + 1`:
    /// `min(base * 2^attempt + jitter, max)` with jitter uniform in `[0, base)`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base_ms = self.base_delay.as_millis() as u64;
        let max_ms = self.max_delay.as_millis() as u64;

        let exponential = base_ms.saturating_mul(2u64.saturating_pow(attempt));
        let jitter = if base_ms > 0 {
            rand::thread_rng().gen_range(0..base_ms)
        } else {
            0
        };

        Duration::from_millis(exponential.saturating_add(jitter).min(max_ms))
    }
}

/// Runs an operation under the retry policy.
#[derive(Debug, Clone, Default)]
pub struct RetryExecutor {
    config: RetryConfig,
}

impl RetryExecutor {
    /// Create new retry executor.
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Execute `operation`, retrying errors for which [`PixError::is_retryable`] holds.
    pub async fn execute<T, F, Fut>(&self, operation: F) -> PixResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = PixResult<T>>,
    {
        self.execute_with(operation, PixError::is_retryable).await
    }

    /// Execute `operation`, retrying errors accepted by `should_retry`.
    ///
    /// The operation runs at most `max_retries + 1` times. The last error is
    /// returned unchanged.
    pub async fn execute_with<T, F, Fut, P>(&self, operation: F, should_retry: P) -> PixResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = PixResult<T>>,
        P: Fn(&PixError) -> bool,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!(attempt, "request succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(error) => {
                    if attempt >= self.config.max_retries || !should_retry(&error) {
                        return Err(error);
                    }

                    let delay = self.config.delay_for_attempt(attempt);
                    warn!(
                        attempt = attempt + 1,
                        max_retries = self.config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error_code = error.error_code(),
                        "retrying after error: {}",
                        error
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// Execute `operation` under `config`.
pub async fn with_retry<T, F, Fut>(operation: F, config: &RetryConfig) -> PixResult<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = PixResult<T>>,
{
    RetryExecutor::new(config.clone()).execute(operation).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, AuthError, ConnectionError};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast(max_retries: u32) -> RetryConfig {
        RetryConfig {
            max_retries,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
        }
    }

    fn network_error() -> PixError {
        ConnectionError::Network {
            message: "reset".to_string(),
        }
        .into()
    }

    #[tokio::test]
    async fn test_retry_budget() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: PixResult<()> = with_retry(
            || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(network_error())
            },
            &fast(2),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_success_after_failures() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = with_retry(
            || async move {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(PixError::Api(ApiError::from_response(503, "")))
                } else {
                    Ok(n)
                }
            },
            &fast(3),
        )
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_short_circuits() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: PixResult<()> = with_retry(
            || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(AuthError::TokenExpired.into())
            },
            &fast(5),
        )
        .await;

        assert!(matches!(result, Err(PixError::Auth(AuthError::TokenExpired))));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_retries_runs_once() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let _: PixResult<()> = with_retry(
            || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(network_error())
            },
            &fast(0),
        )
        .await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_custom_predicate() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let executor = RetryExecutor::new(fast(4));
        let _: PixResult<()> = executor
            .execute_with(
                || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(network_error())
                },
                |_| false,
            )
            .await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_delay_bounds() {
        let config = RetryConfig::default();
        for attempt in 0..4 {
            let delay = config.delay_for_attempt(attempt);
            let floor = Duration::from_millis(500 * 2u64.pow(attempt));
            assert!(delay >= floor.min(config.max_delay));
            assert!(delay < floor + config.base_delay);
        }
        assert_eq!(config.delay_for_attempt(10), Duration::from_secs(15));
        assert_eq!(config.delay_for_attempt(u32::MAX), Duration::from_secs(15));
    }

    #[test]
    fn test_retryable_statuses() {
        for status in RETRYABLE_STATUS_CODES {
            assert!(is_retryable_status(status));
        }
        assert!(!is_retryable_status(400));
        assert!(!is_retryable_status(401));
        assert!(!is_retryable_status(501));
    }
}
