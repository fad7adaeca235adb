//! Per-call cancellation and deadlines.

use std::future::Future;
use std::time::Duration;

use log::debug;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};

/// Caller-supplied controls for a single request.
///
/// An empty context means "no cancellation, use the client's default timeout".
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancel: Option<CancellationToken>,
    deadline: Option<Instant>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aborts the call as soon as `token` is cancelled.
    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Gives the call `timeout` from now to complete.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }

    /// Drives `fut` until it completes, the context is cancelled or the deadline passes.
    ///
    /// `fallback` is only used when the context has no deadline of its own. When
    /// both are absent the future may run indefinitely. The future is dropped on
    /// cancellation or timeout, which aborts any in-flight request it owns.
    pub async fn run<F, T>(&self, fallback: Option<Duration>, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let deadline = self
            .deadline
            .or_else(|| fallback.map(|timeout| Instant::now() + timeout));

        let cancelled = async {
            match &self.cancel {
                Some(token) => token.cancelled().await,
                None => std::future::pending().await,
            }
        };

        let expired = async {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => {
                debug!("Request cancelled by caller");
                Err(Error::Cancelled)
            }
            _ = expired => {
                debug!("Request deadline exceeded");
                Err(Error::Timeout)
            }
            result = fut => result,
        }
    }
}
