//! Strictly sequential execution of asynchronous tasks.

use std::mem::replace;
use std::sync::atomic::Ordering::SeqCst;
use std::sync::atomic::{AtomicU64, AtomicUsize};
use std::sync::{Arc, Mutex, PoisonError};

use log::trace;
use tokio::runtime::Handle;
use tokio::sync::oneshot::channel;

pub use self::pending::Pending;
pub use self::tail::Tail;
use self::job::Job;
use crate::{Config, Task, TaskOptions};

mod job;
mod pending;
mod tail;

/// Runs submitted tasks one at a time, in the order they were submitted.
///
/// Each submission gets its own [`Pending`] outcome. A task that fails, times out, is cancelled
/// or panics does not hold up the tasks submitted after it.
///
/// Cloning the queue yields another handle to the same queue.
#[derive(Clone, Debug)]
pub struct SequentialQueue {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    config: Config,
    name: Arc<str>,
    runtime: Handle,
    tail: Mutex<Tail>,
    next_id: AtomicU64,
    pending: Arc<AtomicUsize>,
}

impl SequentialQueue {
    /// Creates an empty queue on the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside the context of a Tokio runtime.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty queue with the given configuration on the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside the context of a Tokio runtime.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self::with_runtime(Handle::current(), config)
    }

    /// Creates an empty queue whose tasks run on the given runtime.
    #[must_use]
    pub fn with_runtime(runtime: Handle, config: Config) -> Self {
        Self {
            inner: Arc::new(Inner {
                name: config.name().into(),
                config,
                runtime,
                tail: Mutex::new(Tail::settled()),
                next_id: AtomicU64::new(0),
                pending: Arc::new(AtomicUsize::new(0)),
            }),
        }
    }

    /// Queue a task behind everything submitted so far.
    ///
    /// The task is started once all earlier submissions have settled.
    /// The returned future resolves with exactly the task's own outcome.
    pub fn submit<K>(&self, task: K) -> Pending<K::Output, K::Error>
    where
        K: Task,
    {
        self.submit_with(task, TaskOptions::default())
    }

    /// Queue a task with a timeout and/or cancellation token.
    ///
    /// Tasks without their own timeout use the queue's configured default.
    pub fn submit_with<K>(&self, task: K, options: TaskOptions) -> Pending<K::Output, K::Error>
    where
        K: Task,
    {
        let (done, signal) = channel();
        let (outcome, receiver) = channel();

        // Chaining must happen before this method returns to keep submission order.
        let (id, previous) = {
            let mut tail = self.lock_tail();
            (
                self.inner.next_id.fetch_add(1, SeqCst),
                replace(&mut *tail, Tail::after(signal)),
            )
        };
        trace!("[{}] Queued task #{id}.", self.inner.name);

        let job = Job::new(
            id,
            self.inner.name.clone(),
            task,
            options.or_timeout(self.inner.config.timeout()),
            previous,
            outcome,
            done,
            self.inner.pending.clone(),
        );
        drop(self.inner.runtime.spawn(job.run()));
        Pending::new(id, receiver)
    }

    /// Returns a future that resolves once every task submitted so far has settled.
    ///
    /// Tasks submitted after this call are not waited for.
    #[must_use]
    pub fn settled(&self) -> Tail {
        self.lock_tail().clone()
    }

    /// Returns the number of submitted tasks that have not settled yet.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.pending.load(SeqCst)
    }

    /// Returns `true` if no submitted task is waiting or running.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }

    /// Returns the queue's configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    fn lock_tail(&self) -> std::sync::MutexGuard<'_, Tail> {
        // The critical sections only swap or clone the tail and cannot leave it inconsistent.
        self.inner
            .tail
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
