use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::{ready, BoxFuture, Shared};
use futures::FutureExt;
use tokio::sync::oneshot::Receiver;

/// Resolves once every task submitted before it was taken has settled.
///
/// A tail only signals that its predecessors are done. It never carries their outcomes,
/// so a failed, cancelled or panicked task settles its tail just like a successful one.
#[derive(Clone)]
pub struct Tail {
    inner: Shared<BoxFuture<'static, ()>>,
}

impl Tail {
    /// A tail with nothing in front of it.
    pub(crate) fn settled() -> Self {
        Self {
            inner: ready(()).boxed().shared(),
        }
    }

    /// A tail that settles when `done` fires or is dropped.
    pub(crate) fn after(done: Receiver<()>) -> Self {
        Self {
            inner: done.map(|_| ()).boxed().shared(),
        }
    }

    /// Returns `true` if the tail is known to have settled.
    ///
    /// This only reflects progress observed by polling, so a freshly settled tail
    /// may still report `false` until it has been awaited.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.inner.peek().is_some()
    }
}

impl Debug for Tail {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tail")
            .field("settled", &self.is_settled())
            .finish()
    }
}

impl Future for Tail {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}
