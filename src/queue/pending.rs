use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot::Receiver;

use crate::Error;

/// The outcome of a single submission, delivered once the queue has run its task.
///
/// Dropping a `Pending` discards the outcome but does not stop the task from running.
#[derive(Debug)]
#[must_use = "the outcome of the task is only observable through this future"]
pub struct Pending<T, E> {
    id: u64,
    outcome: Receiver<Result<T, Error<E>>>,
}

impl<T, E> Pending<T, E> {
    pub(crate) const fn new(id: u64, outcome: Receiver<Result<T, Error<E>>>) -> Self {
        Self { id, outcome }
    }

    /// Returns the ticket number the queue assigned to this submission.
    pub const fn id(&self) -> u64 {
        self.id
    }
}

impl<T, E> Future for Pending<T, E> {
    type Output = Result<T, Error<E>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.outcome)
            .poll(cx)
            .map(|outcome| outcome.unwrap_or(Err(Error::Aborted)))
    }
}
