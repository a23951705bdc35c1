use std::future::Future;
use std::time::Duration;

use crate::config::Config;
use crate::error::AppError;

/// Bounded retry with exponential backoff for writes that may affect nothing
/// on a first attempt (or hit a busy store).
///
/// An attempt yields `Ok(Some(value))` when it took effect and `Ok(None)` when
/// it matched nothing. `Ok(None)` after the last attempt is returned to the
/// caller, which decides how to report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_backoff,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.delete_retry_attempts, config.delete_retry_backoff())
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub async fn run<T, F, Fut>(&self, operation: &str, mut attempt: F) -> Result<Option<T>, AppError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<T>, AppError>>,
    {
        let mut backoff = self.initial_backoff;

        for current in 1..=self.max_attempts {
            let is_last = current == self.max_attempts;

            match attempt().await {
                Ok(Some(value)) => return Ok(Some(value)),
                Ok(None) if is_last => return Ok(None),
                Err(err) if is_last || !err.is_transient() => return Err(err),
                Ok(None) => log::warn!(
                    "{} affected nothing on attempt {}/{}, retrying in {:?}",
                    operation,
                    current,
                    self.max_attempts,
                    backoff
                ),
                Err(err) => log::warn!(
                    "{} failed on attempt {}/{} ({}), retrying in {:?}",
                    operation,
                    current,
                    self.max_attempts,
                    err,
                    backoff
                ),
            }

            if !backoff.is_zero() {
                tokio::time::sleep(backoff).await;
            }
            backoff = backoff.saturating_mul(2);
        }

        Ok(None)
    }
}
