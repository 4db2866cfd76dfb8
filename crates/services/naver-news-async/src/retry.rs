use backon::ConstantBuilder;
use std::time::Duration;

/// Default number of total attempts per request
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;
/// Default fixed delay between attempts
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Bounded retry with a fixed delay between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: usize,
    delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY)
    }
}

impl RetryPolicy {
    /// Creates a policy. `max_attempts` counts the first try and is at least 1.
    #[must_use]
    pub const fn new(max_attempts: usize, delay: Duration) -> Self {
        Self {
            max_attempts: if max_attempts == 0 { 1 } else { max_attempts },
            delay,
        }
    }

    /// Total attempts, including the first
    #[must_use]
    pub const fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Delay between attempts
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Backoff for `backon`, which counts retries rather than attempts.
    #[must_use]
    pub fn backoff(&self) -> ConstantBuilder {
        ConstantBuilder::default()
            .with_delay(self.delay)
            .with_max_times(self.max_attempts - 1)
    }
}

/// Determines if an HTTP status code should trigger a retry
///
/// Retries on: 429 and 5xx
#[must_use]
pub const fn is_retryable_status(code: u16) -> bool {
    matches!(code, 429 | 500..=599)
}
