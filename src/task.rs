use std::future::Future;

/// A unit of asynchronous work that can be submitted to a [`SequentialQueue`](crate::SequentialQueue).
///
/// Running a task consumes it. The queue calls [`Task::run`] exactly once, when the task's turn comes.
///
/// Every closure `FnOnce() -> Fut` where `Fut` resolves to a [`Result`] is a task.
pub trait Task: Send + 'static {
    /// The value produced on success.
    type Output: Send + 'static;
    /// The error produced on failure.
    type Error: Send + 'static;

    /// Start the task and return the future driving it to completion.
    fn run(self) -> impl Future<Output = Result<Self::Output, Self::Error>> + Send + 'static;
}

impl<F, Fut, T, E> Task for F
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    type Output = T;
    type Error = E;

    fn run(self) -> impl Future<Output = Result<Self::Output, Self::Error>> + Send + 'static {
        self()
    }
}
