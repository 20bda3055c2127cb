// SPDX-License-Identifier: GPL-3.0-or-later
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use discographer_catalog::CatalogError;
use discographer_config::RetryConfig;
use tracing::warn;

/// Source of delays between attempts.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Retry policy applied to every catalog request.
///
/// Throttled calls wait for the advisory delay (or the default when none was
/// given) and transient failures wait a fixed delay; both retry without limit.
/// Fatal errors are returned on the first occurrence.
#[derive(Debug, Clone)]
pub struct RetryPolicy<S = TokioSleeper> {
    sleeper: S,
    default_rate_limit_delay: Duration,
    transient_delay: Duration,
}

impl RetryPolicy<TokioSleeper> {
    pub fn new() -> Self {
        Self::with_sleeper(TokioSleeper)
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new()
            .default_rate_limit_delay(Duration::from_secs(config.default_rate_limit_secs))
            .transient_delay(Duration::from_secs(config.transient_delay_secs))
    }
}

impl Default for RetryPolicy<TokioSleeper> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Sleeper> RetryPolicy<S> {
    pub fn with_sleeper(sleeper: S) -> Self {
        Self {
            sleeper,
            default_rate_limit_delay: Duration::from_secs(5),
            transient_delay: Duration::from_secs(3),
        }
    }

    pub fn default_rate_limit_delay(mut self, delay: Duration) -> Self {
        self.default_rate_limit_delay = delay;
        self
    }

    pub fn transient_delay(mut self, delay: Duration) -> Self {
        self.transient_delay = delay;
        self
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Run `operation` until it succeeds or fails fatally.
    pub async fn call<T, F, Fut>(&self, mut operation: F) -> Result<T, CatalogError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CatalogError>>,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match operation().await {
                Ok(value) => return Ok(value),
                Err(CatalogError::RateLimited { retry_after }) => {
                    let wait = retry_after.unwrap_or(self.default_rate_limit_delay);
                    warn!(
                        target: "retry",
                        attempt,
                        "Rate limit reached. Waiting {} seconds...",
                        wait.as_secs_f64()
                    );
                    self.sleeper.sleep(wait).await;
                }
                Err(CatalogError::Transient { message }) => {
                    warn!(
                        target: "retry",
                        attempt,
                        error = %message,
                        "Unexpected error occurred, retrying in {} seconds",
                        self.transient_delay.as_secs_f64()
                    );
                    self.sleeper.sleep(self.transient_delay).await;
                }
                Err(error @ CatalogError::Fatal { .. }) => return Err(error),
            }
        }
    }
}
