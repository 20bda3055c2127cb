// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Duration, Instant};

/// Request pacer shared by every clone of a client.
///
/// Holds the earliest instant at which the next request may start. Callers queue
/// on the mutex, so concurrent workers are released one at a time, at least
/// `min_interval` apart. A throttling response can push that instant further
/// out with [`RateLimiter::hold_off`].
#[derive(Debug, Clone)]
pub struct RateLimiter {
    min_interval: Duration,
    next_allowed: Arc<Mutex<Option<Instant>>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_allowed: Arc::new(Mutex::new(None)),
        }
    }

    /// Wait until a request can be made according to the rate limit.
    pub async fn acquire(&self) {
        let mut next = self.next_allowed.lock().await;

        if let Some(at) = *next {
            let now = Instant::now();
            if at > now {
                tracing::trace!(
                    target: "catalog",
                    "rate limiting: waiting {:?}",
                    at - now
                );
                sleep_until(at).await;
            }
        }

        *next = Some(Instant::now() + self.min_interval);
    }

    /// Delay every subsequent request by at least `wait` from now.
    pub async fn hold_off(&self, wait: Duration) {
        let until = Instant::now() + wait;
        let mut next = self.next_allowed.lock().await;
        if next.map_or(true, |at| at < until) {
            *next = Some(until);
        }
    }
}
