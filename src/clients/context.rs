//! Per-call cancellation and deadlines.
//!
//! A [`RequestContext`] is checked at the two suspension points of a call:
//! while the transport is sending, and while a rate-limit backoff is waiting.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::clients::errors::HttpError;

/// Cancellation signal and optional deadline for a single call.
///
/// Cloning is cheap; clones observe the same cancellation.
///
/// # Example
///
/// ```rust
/// use n8n_api::clients::RequestContext;
/// use std::time::Duration;
///
/// let (ctx, handle) = RequestContext::with_cancel();
/// let ctx = ctx.with_timeout(Duration::from_secs(30));
///
/// assert!(!ctx.is_cancelled());
/// handle.cancel();
/// assert!(ctx.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    cancel: Option<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

/// Cancels every [`RequestContext`] created alongside it.
///
/// Dropping the handle does not cancel.
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signals cancellation.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl RequestContext {
    /// A context that never cancels and has no deadline.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// A cancellable context and the handle that cancels it.
    #[must_use]
    pub fn with_cancel() -> (Self, CancelHandle) {
        let (sender, receiver) = watch::channel(false);
        let ctx = Self {
            cancel: Some(receiver),
            deadline: None,
        };
        (ctx, CancelHandle { sender })
    }

    /// Sets a deadline, keeping an earlier one if already present.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(self.deadline.map_or(deadline, |d| d.min(deadline)));
        self
    }

    /// Sets a deadline `timeout` from now.
    ///
    /// A timeout too large to represent leaves the context unchanged.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` once the cancel handle has fired.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    async fn cancelled(&self) {
        let Some(rx) = &self.cancel else {
            return std::future::pending().await;
        };
        let mut rx = rx.clone();
        loop {
            let cancelled = *rx.borrow_and_update();
            if cancelled {
                return;
            }
            if rx.changed().await.is_err() {
                break;
            }
        }
        // handle dropped without cancelling
        std::future::pending::<()>().await;
    }

    async fn expired(&self) {
        match self.deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending().await,
        }
    }

    /// Resolves with the matching error once the context is cancelled or expired.
    pub async fn done(&self) -> HttpError {
        tokio::select! {
            biased;
            () = self.cancelled() => HttpError::Cancelled,
            () = self.expired() => HttpError::DeadlineExceeded,
        }
    }

    /// Runs `fut` unless the context finishes first.
    ///
    /// A context that is already cancelled wins over a ready future.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Cancelled`] or [`HttpError::DeadlineExceeded`]
    /// when the context finishes before `fut`.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, HttpError> {
        tokio::select! {
            biased;
            err = self.done() => Err(err),
            out = fut => Ok(out),
        }
    }
}
