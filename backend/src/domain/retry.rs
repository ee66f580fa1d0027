//! Bounded retry policy for transient store failures.
//!
//! The underlying store may drop idle connections; callers retry a bounded
//! number of times with a fixed backoff instead of masking outages. Sleeping
//! goes through the [`Sleeper`] port so tests run without real delays.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

/// Port for waiting between retry attempts.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Wait for `duration` before the next attempt.
    async fn sleep(&self, duration: Duration);
}

/// Tokio-backed sleeper used outside tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Explicit retry policy: attempt cap, fixed backoff, caller-supplied
/// retryable-error predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Duration,
}

impl RetryPolicy {
    /// Build a policy; the attempt cap is clamped to at least one.
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// Maximum number of attempts, including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Fixed pause between attempts.
    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    /// Run `operation` until it succeeds, a non-retryable error occurs, or
    /// the attempt cap is reached. Every retry is logged so bounded retries
    /// never silently mask a persistent outage.
    pub async fn run<T, E, Op, Fut>(
        &self,
        sleeper: &dyn Sleeper,
        is_retryable: impl Fn(&E) -> bool,
        mut operation: Op,
    ) -> Result<T, E>
    where
        E: std::fmt::Display,
        Op: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) if is_retryable(&error) && attempt < self.max_attempts => {
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        backoff_ms = self.backoff.as_millis() as u64,
                        error = %error,
                        "transient store failure, retrying"
                    );
                    sleeper.sleep(self.backoff).await;
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}
