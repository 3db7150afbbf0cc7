//! Minimum spacing between outbound provider requests.

use std::sync::Arc;
use std::time::Duration;

use log::info;
use once_cell::sync::Lazy;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Минимальный интервал между запросами к API
pub const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(5000);

// Общий ограничитель для всех запросов процесса
static GLOBAL_RATE_LIMITER: Lazy<Arc<RateLimiter>> =
    Lazy::new(|| Arc::new(RateLimiter::new(MIN_REQUEST_INTERVAL)));

/// Enforces a minimum interval between accepted requests.
///
/// The lock is held across the wait, so concurrent callers are admitted one
/// at a time, each at least `min_interval` after the previous one.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// The process-wide limiter shared by every client built with defaults.
    pub fn global() -> Arc<RateLimiter> {
        Arc::clone(&GLOBAL_RATE_LIMITER)
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waits until a request is permitted, then records it as accepted.
    pub async fn acquire(&self) {
        let mut last_request = self.last_request.lock().await;

        if let Some(last) = *last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                info!("Rate limit: waiting {}ms...", wait.as_millis());
                tokio::time::sleep(wait).await;
            }
        }

        *last_request = Some(Instant::now());
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(MIN_REQUEST_INTERVAL)
    }
}
