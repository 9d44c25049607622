//! Resilience
//!
//! Exponential backoff retry with jitter for PIX API calls.

pub mod retry;

pub use retry::{
    is_retryable_status, with_retry, RetryConfig, RetryExecutor, DEFAULT_RETRY_CONFIG,
    RETRYABLE_STATUS_CODES,
};
