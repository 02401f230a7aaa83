//! Per-request deadline enforcement.

use std::future::Future;
use std::time::Duration;

use crate::FetchError;

/// Run `fut`, failing with `FetchError::Timeout` if it outlives `timeout`.
///
/// Applied around every session call so a session that ignores its own
/// timeout still cannot stall the pipeline.
pub async fn with_deadline<F, T>(timeout: Duration, fut: F) -> Result<T, FetchError>
where
    F: Future<Output = Result<T, FetchError>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout(timeout)),
    }
}
