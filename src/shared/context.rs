//! Request Context
//!
//! Cancellation and deadline carrier passed as the first argument of every
//! service and repository operation.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::error::AppError;

/// Execution context for a single core operation.
///
/// Cancelling the token (or reaching the deadline) aborts whatever
/// repository call is currently running under [`RequestContext::run`].
/// The core never retries a call that was aborted this way.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancellation: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Create a context bound to the given cancellation token.
    pub fn new(cancellation: CancellationToken) -> Self {
        Self {
            cancellation,
            deadline: None,
        }
    }

    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Set an absolute deadline. An earlier existing deadline wins.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) if current < deadline => current,
            _ => deadline,
        });
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Run an operation under this context.
    ///
    /// Fails with an internal error if the context is cancelled or its
    /// deadline passes before the operation completes.
    pub async fn run<F, T>(&self, operation: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        if self.is_cancelled() {
            return Err(cancelled());
        }

        let guarded = async {
            tokio::select! {
                biased;
                _ = self.cancellation.cancelled() => Err(cancelled()),
                result = operation => result,
            }
        };

        match self.deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, guarded)
                .await
                .map_err(|_| AppError::Internal("operation deadline exceeded".into()))?,
            None => guarded.await,
        }
    }
}

fn cancelled() -> AppError {
    AppError::Internal("operation cancelled".into())
}
