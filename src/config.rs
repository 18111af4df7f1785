use std::time::Duration;

const DEFAULT_NAME: &str = "queue";

/// Queue-wide settings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    name: String,
    timeout: Option<Duration>,
}

impl Config {
    /// Creates a configuration with the given name used in log messages.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timeout: None,
        }
    }

    /// Default timeout applied to tasks that do not set their own.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the queue's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the default task timeout.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_NAME)
    }
}
