//! Exponential-backoff retry policy for outbound calls
//!
//! Oracle and delivery calls share one policy: a bounded attempt loop with
//! exponential backoff, applied explicitly at each call site rather than
//! hidden behind a decorator. Retries block the current run; the loop never
//! yields work to other pipeline iterations.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Retry policy for an outbound call site.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,

    /// Delay before the second attempt
    pub base_delay: Duration,

    /// Multiplier applied to the delay after each failed attempt
    pub backoff_factor: u32,

    /// Upper bound on any single delay
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy from explicit parameters
    pub const fn new(
        max_attempts: u32,
        base_delay: Duration,
        backoff_factor: u32,
        max_delay: Duration,
    ) -> Self {
        Self {
            max_attempts,
            base_delay,
            backoff_factor,
            max_delay,
        }
    }

    /// The standard policy for oracle and delivery calls:
    /// 5 attempts, 1s base delay, doubling, capped at 32s.
    pub const fn outbound() -> Self {
        Self::new(5, Duration::from_secs(1), 2, Duration::from_secs(32))
    }

    /// Delay to sleep after the given failed attempt (1-indexed).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = self.backoff_factor.saturating_pow(attempt.saturating_sub(1));
        self.base_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }

    /// Run `op` until it succeeds or attempts are exhausted.
    ///
    /// The last error is returned once `max_attempts` calls have failed.
    pub async fn run<T, E, F, Fut>(&self, label: &str, mut op: F) -> Result<T, E>
    where
        E: Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.max_attempts => {
                    let delay = self.delay_after(attempt);
                    warn!(
                        %label,
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_secs = delay.as_secs(),
                        error = %err,
                        "outbound call failed, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::outbound()
    }
}
