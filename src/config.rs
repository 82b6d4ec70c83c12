use std::time::Duration;

/// Timeouts used by a waiter when the caller does not override them per call.
///
/// This is a plain value threaded explicitly into constructors. Sourcing the
/// numbers from a file, the environment or a CLI is the responsibility of the
/// calling test harness, not of this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitConfig {
    /// Default deadline for explicit waits.
    pub wait_timeout: Duration,
    /// Sleep between condition evaluations.
    pub poll_interval: Duration,
    /// Default deadline for the document-ready wait, typically longer than
    /// an element-level wait.
    pub page_load_timeout: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            wait_timeout: Duration::from_secs(20),
            poll_interval: Duration::from_millis(500),
            page_load_timeout: Duration::from_secs(30),
        }
    }
}

impl WaitConfig {
    /// Override the default wait timeout.
    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    /// Override the poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Override the page-load timeout.
    pub fn with_page_load_timeout(mut self, timeout: Duration) -> Self {
        self.page_load_timeout = timeout;
        self
    }
}
