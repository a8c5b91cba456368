//! Rate-limit retry state machine.
//!
//! A call moves through [`RetryState`]:
//!
//! ```text
//! Sending -> Evaluating -> Done
//!                       -> Failed
//!                       -> Backoff -> Sending
//! ```
//!
//! Only 429 responses enter `Backoff`, and only while attempts remain.
//! Waiting is delegated to a [`Timer`] so tests can run without real delays.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::clients::errors::{ApiError, STATUS_NO_CONTENT, STATUS_TOO_MANY_REQUESTS};
use crate::clients::http_response::HttpResponse;

/// Maximum number of retries after the first attempt.
pub const MAX_RETRIES: u32 = 3;

/// Delay used when a 429 carries no usable `Retry-After` header.
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(1);

/// State of a single call.
#[derive(Debug)]
pub enum RetryState {
    /// About to send; `attempt` is zero-based.
    Sending {
        /// Attempts made before this one.
        attempt: u32,
    },
    /// A response arrived and must be classified.
    Evaluating {
        /// The attempt that produced `response`.
        attempt: u32,
        /// The buffered response.
        response: HttpResponse,
    },
    /// Rate limited; wait `delay` before the next attempt.
    Backoff {
        /// The attempt that was rate limited.
        attempt: u32,
        /// How long to wait.
        delay: Duration,
        /// The rate-limit error, kept for logging.
        error: ApiError,
    },
    /// Success. `None` for a tolerated 204.
    Done(Option<HttpResponse>),
    /// The service error to return to the caller.
    Failed(ApiError),
}

/// Classifies a response into the next state.
///
/// `attempt` is the zero-based attempt that produced `response`.
#[must_use]
pub fn evaluate(attempt: u32, response: HttpResponse, error_on_empty_body: bool) -> RetryState {
    if response.code >= 300 {
        let retry_after = (response.code == STATUS_TOO_MANY_REQUESTS)
            .then(|| response.retry_after().unwrap_or(DEFAULT_RETRY_AFTER));

        let mut error = ApiError::from_response(response.code, response.body);
        error.retry_after = retry_after;

        return match error.retry_after {
            Some(delay) if !delay.is_zero() && attempt < MAX_RETRIES => RetryState::Backoff {
                attempt,
                delay,
                error,
            },
            _ => RetryState::Failed(error),
        };
    }

    if response.code == STATUS_NO_CONTENT {
        return if error_on_empty_body {
            RetryState::Failed(ApiError::no_content())
        } else {
            RetryState::Done(None)
        };
    }

    RetryState::Done(Some(response))
}

/// Waits out a backoff delay.
#[async_trait]
pub trait Timer: Send + Sync + fmt::Debug {
    /// Completes after `duration`.
    async fn sleep(&self, duration: Duration);
}

/// [`Timer`] backed by `tokio::time::sleep`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioTimer;

#[async_trait]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
