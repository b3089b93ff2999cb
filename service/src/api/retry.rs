//! Retry schedule for transient API failures.

use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

/// Exponential backoff: `base`, `2 * base`, `4 * base`, ... capped at `max_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Sleep durations before each retry, in order.
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        let base_ms = u64::try_from(self.base_delay.as_millis()).unwrap_or(u64::MAX);
        let retries = usize::try_from(self.max_retries).unwrap_or(usize::MAX);
        // from_millis(2) yields 2f, 4f, 8f ...; halving starts the schedule at base.
        ExponentialBackoff::from_millis(2)
            .factor(base_ms)
            .max_delay(self.max_delay.saturating_mul(2))
            .map(|delay| delay / 2)
            .take(retries)
    }
}
