use std::time::Duration;

pub const DEFAULT_CONCURRENCY: usize = 8;
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(1_000);

/// Runtime settings for a verification batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Also probe the well-known port list for unexpected open ports.
    pub exhaustive: bool,
    /// Upper bound on targets verified at the same time.
    ///
    /// Zero is treated as one.
    pub concurrency: usize,
    /// Deadline for a single ping, connect or lookup.
    pub probe_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exhaustive: false,
            concurrency: DEFAULT_CONCURRENCY,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

impl Config {
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.max(1)
    }
}
