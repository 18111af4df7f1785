use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering::SeqCst;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, trace, warn};
use tokio::select;
use tokio::sync::oneshot::Sender;
use tokio::time::timeout;

use crate::queue::tail::Tail;
use crate::{Error, Task, TaskOptions};

/// A submitted task chained behind its predecessor's tail.
pub struct Job<K>
where
    K: Task,
{
    id: u64,
    name: Arc<str>,
    task: K,
    options: TaskOptions,
    previous: Tail,
    outcome: Sender<Result<K::Output, Error<K::Error>>>,
    settlement: Settlement,
}

impl<K> Job<K>
where
    K: Task,
{
    /// Creates a job and counts it as pending until it is run or dropped.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u64,
        name: Arc<str>,
        task: K,
        options: TaskOptions,
        previous: Tail,
        outcome: Sender<Result<K::Output, Error<K::Error>>>,
        done: Sender<()>,
        pending: Arc<AtomicUsize>,
    ) -> Self {
        pending.fetch_add(1, SeqCst);

        Self {
            id,
            name: name.clone(),
            task,
            options,
            previous,
            outcome,
            settlement: Settlement {
                id,
                name,
                done: Some(done),
                pending,
                delivered: false,
            },
        }
    }

    /// Wait for the predecessor to settle, run the task and hand its outcome to the caller.
    ///
    /// The job settles only after the outcome has been handed over, whatever the outcome.
    /// A job that is dropped without ever being polled settles as well.
    pub async fn run(self) {
        let Self {
            id,
            name,
            task,
            options,
            previous,
            outcome,
            mut settlement,
        } = self;

        previous.await;
        trace!("[{name}] Starting task #{id}.");
        let result = execute(task, options).await;

        match &result {
            Ok(_) => debug!("[{name}] Task #{id} succeeded."),
            Err(Error::Task(_)) => debug!("[{name}] Task #{id} failed."),
            Err(Error::TimedOut(limit)) => {
                warn!("[{name}] Task #{id} timed out after {limit:?}.");
            }
            Err(Error::Cancelled) => debug!("[{name}] Task #{id} was cancelled."),
            Err(Error::Aborted) => warn!("[{name}] Task #{id} aborted."),
        }

        if outcome.send(result).is_err() {
            trace!("[{name}] Caller of task #{id} went away. Discarding outcome.");
        }

        settlement.delivered = true;
    }
}

/// Settles a job's tail when dropped, even if the task panicked or the runtime dropped the job
/// before it started.
struct Settlement {
    id: u64,
    name: Arc<str>,
    done: Option<Sender<()>>,
    pending: Arc<AtomicUsize>,
    delivered: bool,
}

impl Drop for Settlement {
    fn drop(&mut self) {
        if !self.delivered {
            warn!(
                "[{}] Task #{} ended without an outcome.",
                self.name, self.id
            );
        }

        self.pending.fetch_sub(1, SeqCst);

        if let Some(done) = self.done.take() {
            done.send(()).unwrap_or_else(|()| {
                trace!(
                    "[{}] Nobody is waiting for task #{} to settle.",
                    self.name,
                    self.id
                );
            });
        }
    }
}

/// Run the task under its timeout and cancellation token.
async fn execute<K>(task: K, options: TaskOptions) -> Result<K::Output, Error<K::Error>>
where
    K: Task,
{
    let Some(token) = options.cancellation().cloned() else {
        return bounded(task, options.timeout()).await;
    };

    if token.is_cancelled() {
        return Err(Error::Cancelled);
    }

    select! {
        biased;
        () = token.cancelled() => Err(Error::Cancelled),
        result = bounded(task, options.timeout()) => result,
    }
}

async fn bounded<K>(task: K, limit: Option<Duration>) -> Result<K::Output, Error<K::Error>>
where
    K: Task,
{
    match limit {
        Some(limit) => timeout(limit, task.run())
            .await
            .map_err(|_| Error::TimedOut(limit))?
            .map_err(Error::Task),
        None => task.run().await.map_err(Error::Task),
    }
}
