use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff policy for retried operations.
///
/// Delays grow geometrically from `initial_delay` up to `max_delay`. With
/// `jitter` enabled each sleep is scaled by a random factor in [0.5, 1.0]
/// so concurrent clients do not reconnect in lockstep.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay_ms: u64) -> Self {
        self.initial_delay = Duration::from_millis(delay_ms);
        self
    }

    pub fn with_max_delay(mut self, delay_ms: u64) -> Self {
        self.max_delay = Duration::from_millis(delay_ms);
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    fn sleep_for(&self, attempt: u32) -> Duration {
        let factor = self.backoff_multiplier.powi(attempt as i32 - 1);
        let base = self.initial_delay.mul_f64(factor).min(self.max_delay);
        if self.jitter { scaled_by_jitter(base) } else { base }
    }
}

// Scales the delay by a pseudo-random factor in [0.5, 1.0). RandomState is
// seeded per call, which is plenty of entropy for spreading reconnects.
fn scaled_by_jitter(delay: Duration) -> Duration {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    let roll = RandomState::new().hash_one(std::time::Instant::now()) % 50;
    delay.mul_f64(0.5 + roll as f64 / 100.0)
}

/// Runs `operation` until it succeeds or the retry budget is spent.
///
/// The first call does not count as a retry, so the operation runs at most
/// `max_retries + 1` times. The last error is returned when the budget runs
/// out.
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    debug!("Operation succeeded after {} retries", attempt);
                }
                return Ok(value);
            }
            Err(e) if attempt >= config.max_retries => {
                warn!("Operation failed after {} attempts: {}", attempt + 1, e);
                return Err(e);
            }
            Err(e) => {
                attempt += 1;
                let pause = config.sleep_for(attempt);
                debug!(
                    "Operation failed (attempt {}/{}): {}. Retrying in {:?}",
                    attempt, config.max_retries, e, pause
                );
                tokio::time::sleep(pause).await;
            }
        }
    }
}

/// `retry_with_backoff` with the default policy.
pub async fn retry<F, Fut, T, E>(operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    retry_with_backoff(operation, RetryConfig::default()).await
}
