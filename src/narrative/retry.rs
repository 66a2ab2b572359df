//! Classified retry with backoff for language model calls
//!
//! # Retry Logic
//!
//! | Condition | Action |
//! |-----------|--------|
//! | Missing/invalid API key | Fail immediately |
//! | Quota exceeded | Fail immediately |
//! | Rate limited | Retry, base * 2^(n-1) + jitter |
//! | Model overloaded | Retry, base * 3^(n-1) + larger jitter |
//! | Server/network error | Retry, base * 2^(n-1) |
//! | Unparseable response | Retry, base * n |
//! | Anything else | Retry, base * 2^(n-1) |
//!
//! `n` is the number of the attempt that just failed. Once the last attempt
//! fails under a retryable class the caller gets [`LlmError::Exhausted`].

use crate::config::LlmConfig;
use crate::{LlmError, LlmResult};
use std::future::Future;
use std::time::Duration;

/// Backoff parameters for language model calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, first call included
    pub max_attempts: u32,
    pub base_delay: Duration,
    /// Upper bound of random jitter on rate-limit backoff
    pub rate_limit_jitter: Duration,
    /// Upper bound of random jitter on overload backoff
    pub overload_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&LlmConfig::default())
    }
}

impl RetryPolicy {
    pub fn from_config(config: &LlmConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay: Duration::from_millis(config.base_delay_ms),
            rate_limit_jitter: Duration::from_millis(config.rate_limit_jitter_ms),
            overload_jitter: Duration::from_millis(config.overload_jitter_ms),
        }
    }

    /// Backoff before the next attempt, jitter excluded
    ///
    /// Returns `None` for error classes that must not be retried.
    pub fn backoff(&self, error: &LlmError, attempt: u32) -> Option<Duration> {
        let base = self.base_delay.as_millis() as u64;
        let exponent = attempt.saturating_sub(1).min(30);

        let delay_ms = match error {
            LlmError::MissingCredential
            | LlmError::InvalidCredential(_)
            | LlmError::QuotaExceeded(_)
            | LlmError::Exhausted { .. } => return None,
            LlmError::Overloaded(_) => base.saturating_mul(3_u64.saturating_pow(exponent)),
            LlmError::MalformedResponse(_) => base.saturating_mul(u64::from(attempt)),
            LlmError::RateLimited(_) | LlmError::Transient(_) | LlmError::Other(_) => {
                base.saturating_mul(2_u64.saturating_pow(exponent))
            }
        };

        Some(Duration::from_millis(delay_ms))
    }

    /// Upper bound of the random jitter added for this error class
    pub fn jitter_cap(&self, error: &LlmError) -> Duration {
        match error {
            LlmError::RateLimited(_) => self.rate_limit_jitter,
            LlmError::Overloaded(_) => self.overload_jitter,
            _ => Duration::ZERO,
        }
    }

    /// Full delay before the next attempt, jitter included
    pub fn delay_for(&self, error: &LlmError, attempt: u32) -> Option<Duration> {
        let backoff = self.backoff(error, attempt)?;
        let cap = self.jitter_cap(error).as_millis() as u64;
        let jitter = if cap == 0 {
            0
        } else {
            rand::random_range(0..=cap)
        };
        Some(backoff + Duration::from_millis(jitter))
    }
}

/// Runs `operation` under `policy`
///
/// `operation` receives the 1-based attempt number.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut operation: F) -> LlmResult<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = LlmResult<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;

        let error = match operation(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!("LLM call succeeded after {} attempts", attempt);
                }
                return Ok(value);
            }
            Err(e) => e,
        };

        tracing::warn!(
            "LLM attempt {}/{} failed: {}",
            attempt,
            max_attempts,
            error
        );

        let Some(delay) = policy.delay_for(&error, attempt) else {
            return Err(error);
        };

        if attempt >= max_attempts {
            return Err(LlmError::Exhausted {
                attempts: attempt,
                last: Box::new(error),
            });
        }

        tracing::info!(
            "Retrying in {}ms (attempt {}/{})",
            delay.as_millis(),
            attempt + 1,
            max_attempts
        );
        tokio::time::sleep(delay).await;
    }
}
