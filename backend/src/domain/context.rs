//! Per-call cancellation and deadline context.
//!
//! Every store operation receives a [`RequestContext`]. When its token is
//! cancelled or its deadline passes, the wrapped future is dropped at its next
//! suspension point and the caller sees a [`ContextError`].

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Reason a context-bound operation did not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    /// The context's token was cancelled.
    #[error("request was cancelled")]
    Cancelled,
    /// The deadline passed before the operation finished.
    #[error("request deadline exceeded")]
    DeadlineExceeded,
}

/// Cancellation token plus optional deadline for a single request.
///
/// Cloning shares the token, so cancelling any clone cancels them all.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use users_backend::domain::{ContextError, RequestContext};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let ctx = RequestContext::with_timeout(Duration::from_secs(5));
/// assert_eq!(ctx.run(async { 42 }).await, Ok(42));
///
/// ctx.cancel();
/// assert_eq!(ctx.run(async { 42 }).await, Err(ContextError::Cancelled));
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Context that is never cancelled and has no deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context whose deadline is `timeout` from now.
    ///
    /// A timeout too large to represent as an instant leaves the context
    /// without a deadline.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    /// Cancel this context and every clone of it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Drive `fut` to completion unless the context fires first.
    ///
    /// A context that is already cancelled or expired never polls `fut`.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, ContextError>
    where
        F: Future,
    {
        if self.token.is_cancelled() {
            return Err(ContextError::Cancelled);
        }
        if self.deadline.is_some_and(|deadline| deadline <= Instant::now()) {
            return Err(ContextError::DeadlineExceeded);
        }

        let expiry = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            () = self.token.cancelled() => Err(ContextError::Cancelled),
            () = expiry => Err(ContextError::DeadlineExceeded),
            output = fut => Ok(output),
        }
    }
}
