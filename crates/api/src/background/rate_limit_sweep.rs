//! Periodic pruning of elapsed rate-limit windows.
//!
//! Without pruning, every client address ever seen keeps an entry in the
//! limiter map. Runs on a fixed interval using `tokio::time::interval`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::rate_limit::FixedWindowLimiter;

/// How often the sweep runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Run the sweep loop until `cancel` is triggered.
pub async fn run(limiter: Arc<FixedWindowLimiter>, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = SWEEP_INTERVAL.as_secs(),
        window_secs = limiter.window().as_secs(),
        "Rate limit sweep started"
    );

    let mut interval = tokio::time::interval(SWEEP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Rate limit sweep stopping");
                break;
            }
            _ = interval.tick() => {
                let removed = limiter.prune_expired(Instant::now()).await;
                if removed > 0 {
                    tracing::debug!(removed, "Rate limit sweep: pruned elapsed windows");
                }
            }
        }
    }
}
