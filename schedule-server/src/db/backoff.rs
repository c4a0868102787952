//! Capped exponential backoff used by the store connect/probe loops

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Retry policy: `max_attempts` tries, sleeping between failures with a delay
/// that starts at `initial`, grows by `multiplier` and never exceeds `max_delay`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backoff {
    pub max_attempts: u32,
    pub initial: Duration,
    pub multiplier: f64,
    pub max_delay: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            initial: Duration::from_secs(1),
            multiplier: 1.5,
            max_delay: Duration::from_secs(10),
        }
    }
}

impl Backoff {
    /// Delay slept after the given (zero-based) failed attempt
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let mut delay = self.initial.min(self.max_delay);
        for _ in 0..attempt {
            delay = self.next_delay(delay);
            if delay == self.max_delay {
                break;
            }
        }
        delay
    }

    fn next_delay(&self, delay: Duration) -> Duration {
        delay.mul_f64(self.multiplier.max(1.0)).min(self.max_delay)
    }

    /// Run `op` until it succeeds or the attempts are used up.
    ///
    /// `op` receives the zero-based attempt number. The last error is returned
    /// on exhaustion.
    pub async fn retry<T, E, F, Fut>(&self, what: &str, mut op: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut delay = self.initial.min(self.max_delay);
        let mut attempt = 0;

        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt + 1 < max_attempts => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_retries = max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "{what} failed, retrying: {e}"
                    );
                    tokio::time::sleep(delay).await;
                    delay = self.next_delay(delay);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
