// Retries: rate limits (429), server errors (5xx), timeouts, connection
// failures. Never retried: rejections, other 4xx, missing credentials.

use std::time::Duration;

use crate::SubmissionError;

const MAX_RETRIES: u32 = 3;
const INITIAL_DELAY_MS: u64 = 500;
const BACKOFF_FACTOR: f64 = 2.0;
const MAX_DELAY_MS: u64 = 8_000;
const JITTER_FRACTION: f64 = 0.2;

/// Configuration for retry behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub backoff_factor: f64,
    pub max_delay: Duration,
    pub jitter_fraction: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            initial_delay: Duration::from_millis(INITIAL_DELAY_MS),
            backoff_factor: BACKOFF_FACTOR,
            max_delay: Duration::from_millis(MAX_DELAY_MS),
            jitter_fraction: JITTER_FRACTION,
        }
    }
}

impl RetryConfig {
    /// No retries at all.
    pub fn none() -> Self {
        Self { max_retries: 0, ..Self::default() }
    }

    /// Delay before retry number `attempt` (0-indexed).
    pub(crate) fn delay_for_attempt(&self, attempt: u32, server_hint: Option<Duration>) -> Duration {
        // The server said how long to wait; add a small buffer.
        if let Some(hint) = server_hint {
            return hint + Duration::from_millis(100);
        }

        let base_ms = self.initial_delay.as_millis() as f64 * self.backoff_factor.powi(attempt as i32);
        let capped_ms = base_ms.min(self.max_delay.as_millis() as f64);

        let jitter = deterministic_jitter(attempt, self.jitter_fraction);
        let final_ms = (capped_ms * jitter).max(1.0);

        Duration::from_millis(final_ms as u64)
    }
}

pub(crate) fn should_retry(error: &SubmissionError) -> bool {
    error.is_retriable()
}

/// Multiplier in `[1 - fraction, 1 + fraction]`, fixed per attempt so retry
/// schedules are reproducible.
fn deterministic_jitter(attempt: u32, fraction: f64) -> f64 {
    let hash = (attempt.wrapping_mul(2654435761)) as f64 / u32::MAX as f64;
    1.0 + fraction * (2.0 * hash - 1.0)
}
