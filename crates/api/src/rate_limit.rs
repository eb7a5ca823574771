//! Fixed-window request counting per client.
//!
//! Each client gets a window that opens on its first request and lasts
//! [`FixedWindowLimiter::window`]. Requests beyond the cap inside a window are
//! rejected outright; there is no queueing. The window resets on the first
//! request after it has elapsed.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::config::RateLimitConfig;

/// Message returned to clients that exceed their quota.
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests from this IP, please try again later.";

/// Outcome of counting one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// The request fits in the current window.
    Allowed { remaining: u32 },
    /// The quota is spent; the window resets after `retry_after`.
    Limited { retry_after: Duration },
}

struct Window {
    started: Instant,
    count: u32,
}

/// Process-wide request counter keyed by client address.
///
/// Thread-safe via an interior `Mutex`; designed to be wrapped in `Arc` and
/// shared through application state.
pub struct FixedWindowLimiter {
    window: Duration,
    max_requests: u32,
    clients: Mutex<HashMap<String, Window>>,
}

impl FixedWindowLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            clients: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(Duration::from_secs(config.window_secs), config.max_requests)
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Count a request from `client` now.
    pub async fn check(&self, client: &str) -> RateDecision {
        self.check_at(client, Instant::now()).await
    }

    /// Count a request from `client` at the instant `now`.
    pub async fn check_at(&self, client: &str, now: Instant) -> RateDecision {
        let mut clients = self.clients.lock().await;

        let window = clients.entry(client.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.saturating_duration_since(window.started) >= self.window {
            window.started = now;
            window.count = 0;
        }

        if window.count >= self.max_requests {
            let elapsed = now.saturating_duration_since(window.started);
            return RateDecision::Limited {
                retry_after: self.window.saturating_sub(elapsed),
            };
        }

        window.count += 1;
        RateDecision::Allowed {
            remaining: self.max_requests - window.count,
        }
    }

    /// Drop every window that has fully elapsed at `now`.
    ///
    /// Returns the number of clients removed.
    pub async fn prune_expired(&self, now: Instant) -> usize {
        let mut clients = self.clients.lock().await;
        let before = clients.len();
        clients.retain(|_, w| now.saturating_duration_since(w.started) < self.window);
        before - clients.len()
    }

    /// Number of clients with a live or not-yet-pruned window.
    pub async fn tracked_clients(&self) -> usize {
        self.clients.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const WINDOW: Duration = Duration::from_secs(15 * 60);

    #[tokio::test]
    async fn allows_up_to_cap_then_rejects() {
        let limiter = FixedWindowLimiter::new(WINDOW, 50);
        let start = Instant::now();

        for i in 0..50 {
            let decision = limiter.check_at("10.0.0.1", start).await;
            assert_eq!(decision, RateDecision::Allowed { remaining: 49 - i });
        }

        assert_matches!(
            limiter.check_at("10.0.0.1", start + Duration::from_secs(60)).await,
            RateDecision::Limited { retry_after } if retry_after == WINDOW - Duration::from_secs(60)
        );
    }

    #[tokio::test]
    async fn clients_are_counted_independently() {
        let limiter = FixedWindowLimiter::new(WINDOW, 1);
        let now = Instant::now();

        assert_matches!(limiter.check_at("a", now).await, RateDecision::Allowed { .. });
        assert_matches!(limiter.check_at("a", now).await, RateDecision::Limited { .. });
        assert_matches!(limiter.check_at("b", now).await, RateDecision::Allowed { .. });
    }

    #[tokio::test]
    async fn window_resets_after_it_elapses() {
        let limiter = FixedWindowLimiter::new(WINDOW, 2);
        let start = Instant::now();

        limiter.check_at("a", start).await;
        limiter.check_at("a", start).await;
        assert_matches!(
            limiter.check_at("a", start + WINDOW - Duration::from_secs(1)).await,
            RateDecision::Limited { .. }
        );
        assert_eq!(
            limiter.check_at("a", start + WINDOW).await,
            RateDecision::Allowed { remaining: 1 }
        );
    }

    #[tokio::test]
    async fn prune_drops_only_elapsed_windows() {
        let limiter = FixedWindowLimiter::new(WINDOW, 10);
        let start = Instant::now();

        limiter.check_at("old", start).await;
        limiter.check_at("fresh", start + Duration::from_secs(600)).await;

        let removed = limiter.prune_expired(start + WINDOW).await;

        assert_eq!(removed, 1);
        assert_eq!(limiter.tracked_clients().await, 1);
    }
}
