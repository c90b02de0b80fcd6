//! Randomized start delay
//!
//! Spreads bursts of near-simultaneous reactions before they hit the Slack API.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

/// Default upper bound for the start delay
pub const DEFAULT_MAX_JITTER: Duration = Duration::from_millis(5000);

/// A delay awaited before each accepted event is processed
#[async_trait]
pub trait Jitter: Send + Sync {
    /// Suspend the current task for the chosen delay
    async fn wait(&self);
}

/// Uniformly random delay in `[0, max)`
#[derive(Debug, Clone, Copy)]
pub struct RandomJitter {
    max: Duration,
}

impl RandomJitter {
    /// Create a jitter bounded by `max`
    #[must_use]
    pub const fn new(max: Duration) -> Self {
        Self { max }
    }

    /// Draw one delay
    #[must_use]
    pub fn sample(&self) -> Duration {
        let max_ms = u64::try_from(self.max.as_millis()).unwrap_or(u64::MAX);
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..max_ms))
    }
}

impl Default for RandomJitter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_JITTER)
    }
}

#[async_trait]
impl Jitter for RandomJitter {
    async fn wait(&self) {
        let delay = self.sample();
        tracing::debug!(delay_ms = delay.as_millis(), "delaying event");
        tokio::time::sleep(delay).await;
    }
}

/// No delay at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

#[async_trait]
impl Jitter for NoJitter {
    async fn wait(&self) {}
}
