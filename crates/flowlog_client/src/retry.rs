//! Bounded retry with exponential backoff for platform API calls.

use flowlog_error::ApiError;
use std::future::Future;
use std::time::Duration;
use tokio_retry2::strategy::{jitter, ExponentialBackoff};
use tokio_retry2::{Retry, RetryError};
use tracing::warn;

/// Per-request timeout applied to every platform call, including login.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Retries after the initial attempt.
const MAX_RETRIES: usize = 3;

/// Delay ceiling between attempts.
const RETRY_MAX_DELAY: Duration = Duration::from_secs(10);

/// Run `op` with up to [`MAX_RETRIES`] retries on retryable errors.
///
/// Delays follow 2^n * 500 ms (1 s, 2 s, 4 s), jittered, capped at
/// [`RETRY_MAX_DELAY`]. Non-retryable errors (404, undecodable bodies)
/// surface immediately.
pub(crate) async fn with_retry<T, F, Fut>(op: F) -> Result<T, ApiError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let strategy = ExponentialBackoff::from_millis(2)
        .factor(500)
        .max_delay(RETRY_MAX_DELAY)
        .map(jitter)
        .take(MAX_RETRIES);

    Retry::spawn(strategy, || async {
        match op().await {
            Ok(value) => Ok(value),
            Err(e) if e.kind.is_retryable() => {
                warn!(error = %e, "API call failed, will retry");
                Err(RetryError::Transient {
                    err: e,
                    retry_after: None,
                })
            }
            Err(e) => Err(RetryError::Permanent(e)),
        }
    })
    .await
}
