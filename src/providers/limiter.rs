//! Per-provider dispatch-interval gate.
//!
//! Free-tier providers throttle by request rate, so every outbound call
//! first claims a dispatch slot. The gate reserves the next free instant
//! and advances it under a single lock, then sleeps outside the lock until
//! the reservation comes due — concurrent callers can therefore never be
//! released closer together than the configured interval, in any arrival
//! order. Ordering is FIFO by arrival (tokio mutex queue order); sustained
//! overload surfaces as latency, never as an error.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::telemetry;

/// Minimum-interval rate gate for one provider.
pub struct RateLimiter {
    provider: &'static str,
    min_interval: Duration,
    next_free: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a gate enforcing `min_interval` between dispatches.
    pub fn new(provider: &'static str, min_interval: Duration) -> Self {
        Self {
            provider,
            min_interval,
            next_free: Mutex::new(None),
        }
    }

    /// Block until a dispatch slot is available, claiming it atomically.
    ///
    /// The reservation is made while holding the lock; the wait happens
    /// after release, so a slow sleeper never blocks later arrivals from
    /// reserving their own (later) slots.
    pub async fn await_slot(&self) {
        let reserved = {
            let mut next_free = self.next_free.lock().await;
            let now = Instant::now();
            let at = match *next_free {
                Some(t) if t > now => t,
                _ => now,
            };
            *next_free = Some(at + self.min_interval);
            at
        };

        let wait = reserved.saturating_duration_since(Instant::now());
        if !wait.is_zero() {
            metrics::histogram!(telemetry::LIMITER_WAIT_SECONDS,
                "provider" => self.provider)
            .record(wait.as_secs_f64());
            tokio::time::sleep_until(reserved).await;
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}
