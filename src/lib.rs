//! Sequential request queue
//!
//! This library runs asynchronous tasks, such as HTTP requests, strictly one at a time and in the
//! order they were submitted. Every caller receives the outcome of its own task, and a failing
//! task never holds up the tasks queued behind it.
//!
//! ```no_run
//! use request_queue::SequentialQueue;
//!
//! # async fn example() {
//! let queue = SequentialQueue::new();
//! let first = queue.submit(|| async { Ok::<_, std::io::Error>("first") });
//! let second = queue.submit(|| async { Ok::<_, std::io::Error>("second") });
//! assert_eq!(first.await.ok(), Some("first"));
//! assert_eq!(second.await.ok(), Some("second"));
//! # }
//! ```

pub use config::Config;
pub use error::Error;
pub use lagged::{lagged, lagged_default, DEFAULT_LAG};
pub use options::TaskOptions;
pub use queue::{Pending, SequentialQueue, Tail};
pub use task::Task;
pub use tokio_util::sync::CancellationToken;
#[cfg(feature = "cli")]
use {clap as _, env_logger as _};

mod config;
mod error;
mod lagged;
mod options;
mod queue;
mod task;
