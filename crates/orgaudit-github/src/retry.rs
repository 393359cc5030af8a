//! Bounded retry with exponential backoff for transport failures
//!
//! Only failures that never produced an HTTP response are retried. A
//! response with a non-200 status is an answer, not a transport failure,
//! and is handled by the caller.

use crate::sleep::Sleeper;
use orgaudit_core::config::RetryConfig;
use std::fmt::Display;

/// Errors that can be classified as transient
pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for reqwest::Error {
    fn is_retryable(&self) -> bool {
        self.is_timeout() || self.is_connect()
    }
}

/// Runs `operation` up to `config.max_attempts` times
///
/// Waits `config.delay_for(n)` through `sleeper` before retry `n`.
/// Non-retryable errors are returned immediately.
pub fn with_retry<T, E, F>(config: &RetryConfig, sleeper: &dyn Sleeper, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    E: IsRetryable + Display,
{
    let mut attempt: u32 = 1;

    loop {
        match operation() {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!(attempts = attempt, "Request succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) if e.is_retryable() && attempt < config.max_attempts => {
                let delay = config.delay_for(attempt);
                tracing::warn!(
                    error = %e,
                    attempt = attempt,
                    max_attempts = config.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    "Request failed, retrying"
                );
                sleeper.sleep(delay);
                attempt += 1;
            }
            Err(e) => {
                if e.is_retryable() {
                    tracing::error!(error = %e, attempts = attempt, "Request failed after all retry attempts");
                }
                return Err(e);
            }
        }
    }
}
