use std::time::Duration;

use serde::Deserialize;

use crate::constants::DEFAULT_PROBE_TIMEOUT_MS;
use crate::constants::DEFAULT_RETRY_COUNT;
use crate::constants::DEFAULT_RETRY_INTERVAL_MS;

/// Bounded wait for a freshly started ensemble to answer status probes
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ConvergencePolicy {
    /// Maximum number of probe attempts (0 means give up without probing)
    #[serde(default = "default_retry_count")]
    pub retry_count: usize,

    /// Pause between two failed attempts (unit: milliseconds)
    #[serde(default = "default_retry_interval_ms")]
    pub retry_interval_ms: u64,

    /// Per-server status call timeout (unit: milliseconds)
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

impl Default for ConvergencePolicy {
    fn default() -> Self {
        Self {
            retry_count: default_retry_count(),
            retry_interval_ms: default_retry_interval_ms(),
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}

impl ConvergencePolicy {
    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// Upper bound of time spent sleeping between attempts, saturating at
    /// [`Duration::MAX`]
    pub fn max_wait(&self) -> Duration {
        let sleeps = u32::try_from(self.retry_count.saturating_sub(1)).unwrap_or(u32::MAX);
        self.retry_interval().saturating_mul(sleeps)
    }
}

fn default_retry_count() -> usize {
    DEFAULT_RETRY_COUNT
}
fn default_retry_interval_ms() -> u64 {
    DEFAULT_RETRY_INTERVAL_MS
}
fn default_probe_timeout_ms() -> u64 {
    DEFAULT_PROBE_TIMEOUT_MS
}
