//! Exponential back-off with jitter for research-service requests.
//!
//! Transient failures (429, network errors, 5xx) are retried; everything else
//! is returned on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::FetchError;

/// Returns `true` if `err` is worth retrying after a back-off delay.
///
/// Retriable:
/// - [`FetchError::RateLimited`]: HTTP 429.
/// - [`FetchError::Http`]: network failure, timeout, or connection reset.
/// - [`FetchError::UnexpectedStatus`] with a 5xx status.
///
/// Not retriable: [`FetchError::NotFound`], [`FetchError::Deserialize`],
/// [`FetchError::InvalidTarget`], 4xx statuses, [`FetchError::Unavailable`].
pub(crate) fn is_retriable(err: &FetchError) -> bool {
    match err {
        FetchError::RateLimited { .. } | FetchError::Http(_) => true,
        FetchError::UnexpectedStatus { status, .. } => *status >= 500,
        FetchError::NotFound { .. }
        | FetchError::Deserialize { .. }
        | FetchError::InvalidBaseUrl { .. }
        | FetchError::InvalidTarget(_)
        | FetchError::Unavailable(_) => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// The sleep before retry `n` is `backoff_base_secs * 2^(n-1)` seconds with
/// ±25 % jitter, capped at 60 s.
///
/// | Retry | Sleep (`backoff_base_secs = 1`) |
/// |-------|----------------------------------|
/// | 1     | 1 s ± 25 %                       |
/// | 2     | 2 s ± 25 %                       |
/// | 3     | 4 s ± 25 %                       |
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
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
                let computed = backoff_base_secs
                    .saturating_mul(1_000)
                    .saturating_mul(1u64 << (attempt - 1).min(10));
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
                    "transient research-service error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
