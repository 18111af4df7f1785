use std::time::Duration;

use log::trace;
use tokio::time::sleep;

use crate::Task;

/// Delay applied by [`lagged_default`].
pub const DEFAULT_LAG: Duration = Duration::from_millis(250);

/// Wrap a task so that it only starts after `delay` has elapsed.
///
/// The outcome of the wrapped task is passed through unchanged.
/// When submitted to a queue, the delay is part of the task's own run time.
pub fn lagged<K>(delay: Duration, task: K) -> impl Task<Output = K::Output, Error = K::Error>
where
    K: Task,
{
    move || async move {
        trace!("Delaying task by {delay:?}.");
        sleep(delay).await;
        task.run().await
    }
}

/// Wrap a task so that it only starts after [`DEFAULT_LAG`].
pub fn lagged_default<K>(task: K) -> impl Task<Output = K::Output, Error = K::Error>
where
    K: Task,
{
    lagged(DEFAULT_LAG, task)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::Instant;

    use super::{lagged, lagged_default, DEFAULT_LAG};
    use crate::{Error, SequentialQueue, Task, TaskOptions};

    #[tokio::test(start_paused = true)]
    async fn test_delays_start() {
        let started = Instant::now();
        let task = lagged(Duration::from_millis(40), || async {
            Ok::<_, ()>(Instant::now())
        });
        let ran_at = task.run().await.expect("Task does not fail");
        assert!(ran_at - started >= Duration::from_millis(40));
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_lag() {
        let started = Instant::now();
        let result = lagged_default(|| async { Err::<(), _>("refused") }).run().await;
        assert_eq!(result, Err("refused"));
        assert!(started.elapsed() >= DEFAULT_LAG);
    }

    #[tokio::test(start_paused = true)]
    async fn test_lag_counts_towards_timeout() {
        let queue = SequentialQueue::new();
        let slow = queue.submit_with(
            lagged(Duration::from_millis(100), || async { Ok::<_, ()>(1) }),
            TaskOptions::new().with_timeout(Duration::from_millis(50)),
        );
        let fast = queue.submit(lagged(Duration::from_millis(10), || async {
            Ok::<_, ()>(2)
        }));

        assert_eq!(slow.await, Err(Error::TimedOut(Duration::from_millis(50))));
        assert_eq!(fast.await, Ok(2));
    }
}
