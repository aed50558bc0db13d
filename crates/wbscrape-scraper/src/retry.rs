//! Transport retry with exponential backoff and jitter.
//!
//! Off by default (`max_retries = 0`): a failed request surfaces on the
//! first attempt. When enabled, only transient conditions are retried;
//! everything else is returned immediately.

use std::future::Future;
use std::time::Duration;

use wbscrape_core::FailureKind;

use crate::error::ScraperError;

/// Returns `true` if `err` represents a transient condition worth retrying.
///
/// Retriable:
/// - timeouts and connection failures;
/// - HTTP 429 and 5xx responses.
///
/// Everything else (4xx, decode errors, invalid URLs) is returned immediately.
pub(crate) fn is_retriable(err: &ScraperError) -> bool {
    match err.failure_kind() {
        FailureKind::Timeout | FailureKind::Connect => true,
        FailureKind::Status => match err {
            ScraperError::UnexpectedStatus { status, .. } => {
                *status == 429 || (500..600).contains(status)
            }
            _ => false,
        },
        FailureKind::Decode | FailureKind::Other => false,
    }
}

/// Executes `operation`, retrying transient failures up to `max_retries`
/// additional times.
///
/// Backoff before retry `n` (1-based) is `backoff_base_ms * 2^(n-1)`, capped
/// at 60 s, with ±25 % jitter.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    const MAX_DELAY_MS: u64 = 60_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient request error, retrying after backoff"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
