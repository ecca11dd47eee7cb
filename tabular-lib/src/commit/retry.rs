//! Retry configuration for edit commits.

use std::time::Duration;

/// Configuration for retrying a commit after a transient failure.
///
/// Only errors for which [`StoreError::is_retryable`] holds are retried.
/// The default retries up to three times; [`CommitConfig`] starts from
/// [`RetryConfig::no_retry`].
///
/// [`CommitConfig`]: crate::config::CommitConfig
///
/// [`StoreError::is_retryable`]: crate::error::StoreError::is_retryable
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tabular_lib::commit::RetryConfig;
///
/// let retry = RetryConfig::default()
///     .max_retries(3)
///     .initial_delay(Duration::from_millis(200))
///     .max_delay(Duration::from_secs(5));
///
/// assert_eq!(retry.delay_for(0), Duration::from_millis(200));
/// assert_eq!(retry.delay_for(1), Duration::from_millis(400));
/// ```
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first.
    pub max_retries: u32,
    /// Delay before the first retry (doubles each attempt).
    pub initial_delay: Duration,
    /// Upper bound on the delay between retries.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryConfig {
    /// Creates a config with all retries disabled.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Sets the maximum number of retries.
    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    /// Sets the initial delay between retries.
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the maximum delay between retries.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Returns the backoff before retry number `retry` (0-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry);
        self.initial_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}
