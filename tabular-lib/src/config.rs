//! View and commit configuration

use std::time::Duration;

use crate::commit::RetryConfig;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Configuration for a [`TabularView`](crate::view::TabularView) session.
///
/// # Example
///
/// ```
/// use tabular_lib::config::ViewConfig;
///
/// let config = ViewConfig::default()
///     .with_page_size(25)
///     .with_optimistic_edits(false);
/// assert_eq!(config.page_size, 25);
/// ```
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Rows per page. Never below 1.
    ///
    /// Default: 10
    pub page_size: usize,

    /// Show committed edits immediately, before a refreshed dataset
    /// confirms them.
    ///
    /// Default: true
    pub optimistic_edits: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            optimistic_edits: true,
        }
    }
}

impl ViewConfig {
    /// Creates a view config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size; zero is raised to one.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Enables or disables the optimistic edit overlay.
    pub fn with_optimistic_edits(mut self, enabled: bool) -> Self {
        self.optimistic_edits = enabled;
        self
    }
}

/// Configuration for dispatching committed edits to a row updater.
///
/// The default waits indefinitely and never retries, leaving delivery
/// guarantees to the updater.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tabular_lib::commit::RetryConfig;
/// use tabular_lib::config::CommitConfig;
///
/// let config = CommitConfig::default()
///     .with_timeout(Duration::from_secs(10))
///     .with_retry(RetryConfig::default().max_retries(2));
/// ```
#[derive(Debug, Clone)]
pub struct CommitConfig {
    /// Per-attempt timeout. `None` waits for the updater indefinitely.
    pub timeout: Option<Duration>,

    /// Retry policy for transient failures.
    ///
    /// Default: [`RetryConfig::no_retry`]
    pub retry: RetryConfig,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            retry: RetryConfig::no_retry(),
        }
    }
}

impl CommitConfig {
    /// Creates a commit config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the retry policy.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}
