use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Errors delivered to the caller of a single submission.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error<E> {
    /// The task's own future failed.
    Task(E),
    /// The task did not finish within its timeout.
    TimedOut(Duration),
    /// The task's cancellation token fired before or while it ran.
    Cancelled,
    /// The job ended without producing an outcome, e.g. because the task panicked.
    Aborted,
}

impl<E> Error<E> {
    /// Returns `true` if the task itself failed.
    pub const fn is_task_failure(&self) -> bool {
        matches!(self, Self::Task(_))
    }

    /// Returns the task's own error, if any.
    pub fn into_task_error(self) -> Option<E> {
        match self {
            Self::Task(error) => Some(error),
            _ => None,
        }
    }
}

impl<E> Display for Error<E>
where
    E: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Task(error) => write!(f, "Task failed: {error}"),
            Self::TimedOut(timeout) => write!(f, "Task timed out after {timeout:?}."),
            Self::Cancelled => write!(f, "Task was cancelled."),
            Self::Aborted => write!(f, "Task aborted without an outcome."),
        }
    }
}

impl<E> std::error::Error for Error<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Task(error) => Some(error),
            _ => None,
        }
    }
}
