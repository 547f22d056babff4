//! Capped backoff for provider calls
//!
//! Retries live in the adapter layer. A failed call already degrades to
//! fallback content, so the attempt count never exceeds [`MAX_ATTEMPTS_CAP`].

use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::error::CaptionError;

/// Upper bound on attempts regardless of configuration
pub const MAX_ATTEMPTS_CAP: u32 = 3;

/// How often and how patiently a provider call is repeated
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Attempts including the first one, clamped to `1..=MAX_ATTEMPTS_CAP`
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    /// Growth factor applied per retry
    pub backoff_multiplier: f64,
    pub use_jitter: bool,
    /// Fraction of the delay that jitter may add or remove
    pub jitter_factor: f64,
}

impl Default for RetryPolicy {
    /// One attempt; failures go straight to fallback
    fn default() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            use_jitter: true,
            jitter_factor: 0.1,
        }
    }
}

impl RetryPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single attempt, spelled out at call sites
    pub fn none() -> Self {
        Self::default().with_max_attempts(1)
    }

    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub const fn with_jitter(mut self, use_jitter: bool) -> Self {
        self.use_jitter = use_jitter;
        self
    }

    pub fn effective_attempts(&self) -> u32 {
        self.max_attempts.clamp(1, MAX_ATTEMPTS_CAP)
    }

    /// Only transient provider failures are worth another attempt
    pub fn should_retry(&self, error: &CaptionError) -> bool {
        error.is_retryable()
    }

    /// Pause before retry number `retry` (zero-based)
    pub fn calculate_delay(&self, retry: u32) -> Duration {
        let factor = self.backoff_multiplier.powi(retry as i32);
        let millis = (self.initial_delay.as_millis() as f64 * factor) as u64;
        let delay = Duration::from_millis(millis).min(self.max_delay);
        match self.use_jitter {
            true => self.jittered(delay),
            false => delay,
        }
    }

    fn jittered(&self, delay: Duration) -> Duration {
        let spread = delay.as_millis() as f64 * self.jitter_factor.clamp(0.0, 1.0);
        if spread <= 0.0 {
            return delay;
        }
        let offset = rand::thread_rng().gen_range(-spread..=spread);
        Duration::from_millis((delay.as_millis() as f64 + offset).max(0.0) as u64)
    }
}

/// Drives an async operation under a [`RetryPolicy`]
pub struct RetryExecutor {
    policy: RetryPolicy,
}

impl RetryExecutor {
    pub const fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T, CaptionError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CaptionError>>,
    {
        let attempts = self.policy.effective_attempts();
        let mut made = 0;
        loop {
            let error = match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };
            made += 1;
            if made >= attempts || !self.policy.should_retry(&error) {
                return Err(error);
            }
            let delay = self.policy.calculate_delay(made - 1);
            tracing::debug!(attempt = made, ?delay, error = %error, "retrying provider call");
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProviderType;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast(attempts: u32) -> RetryPolicy {
        RetryPolicy::new()
            .with_max_attempts(attempts)
            .with_initial_delay(Duration::from_millis(1))
            .with_jitter(false)
    }

    #[tokio::test]
    async fn default_policy_makes_one_attempt() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = RetryExecutor::new(RetryPolicy::default())
            .execute(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(CaptionError::Timeout("slow".into())) }
            })
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn attempts_are_capped() {
        let calls = AtomicU32::new(0);
        let _ = RetryExecutor::new(fast(10))
            .execute(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(CaptionError::transport(ProviderType::OpenAi, "reset")) }
            })
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), MAX_ATTEMPTS_CAP);
    }

    #[tokio::test]
    async fn non_retryable_errors_stop_immediately() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = RetryExecutor::new(fast(3))
            .execute(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(CaptionError::provider_status(ProviderType::Anthropic, 401, "bad key")) }
            })
            .await;
        assert_eq!(result.unwrap_err().status_code(), Some(401));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn succeeds_after_transient_failure() {
        let calls = AtomicU32::new(0);
        let result = RetryExecutor::new(fast(2))
            .execute(|| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(CaptionError::provider_status(ProviderType::OpenAi, 503, "busy"))
                    } else {
                        Ok("ok")
                    }
                }
            })
            .await;
        assert_eq!(result.unwrap(), "ok");
    }

    #[test]
    fn delay_grows_and_is_bounded() {
        let policy = RetryPolicy::new()
            .with_initial_delay(Duration::from_millis(100))
            .with_max_delay(Duration::from_millis(250))
            .with_jitter(false);
        assert_eq!(policy.calculate_delay(0), Duration::from_millis(100));
        assert_eq!(policy.calculate_delay(1), Duration::from_millis(200));
        assert_eq!(policy.calculate_delay(2), Duration::from_millis(250));
    }
}
