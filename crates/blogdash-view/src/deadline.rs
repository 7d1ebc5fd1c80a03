//! Request deadlines.

use std::future::Future;
use std::time::Duration;

use blogdash_core::Result;
use blogdash_core::error::TransportError;

/// Await `fut`, failing with a transport timeout once `limit` elapses.
pub(crate) async fn within<T>(limit: Duration, fut: impl Future<Output = Result<T>>) -> Result<T> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(TransportError::Timeout {
            duration_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        }
        .into()),
    }
}
