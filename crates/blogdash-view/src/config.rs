//! View configuration.

use std::num::NonZeroUsize;
use std::time::Duration;

use crate::paginate::PAGE_SIZE;

/// Default bound on each remote fetch or delete.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for an [`AnalyticsView`](crate::AnalyticsView).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewConfig {
    /// Rows per table page.
    pub page_size: NonZeroUsize,
    /// Bound applied to every remote request.
    pub request_timeout: Duration,
}

impl ViewConfig {
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: NonZeroUsize::new(PAGE_SIZE).unwrap_or(NonZeroUsize::MIN),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
