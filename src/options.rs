use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Per-task execution options.
#[derive(Clone, Debug, Default)]
pub struct TaskOptions {
    timeout: Option<Duration>,
    cancellation: Option<CancellationToken>,
}

impl TaskOptions {
    /// Creates options without timeout or cancellation.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: None,
            cancellation: None,
        }
    }

    /// Limit the time the task may run once it has been started.
    ///
    /// Time spent waiting for earlier tasks does not count.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Attach a token that cancels the task when fired.
    ///
    /// A task that is still waiting for earlier tasks is not invoked once the token has fired,
    /// but its caller only receives [`Error::Cancelled`](crate::Error::Cancelled) when the
    /// task's turn comes. A running task is dropped as soon as the token fires.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Returns the configured timeout.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the configured cancellation token.
    #[must_use]
    pub const fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }

    /// Fill in unset values from the queue-wide defaults.
    pub(crate) fn or_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = self.timeout.or(timeout);
        self
    }
}
