use std::sync::Arc;

use katha_gemini::TextGenerator;
use katha_pipeline::{ImageProvider, StoryPipeline};

use crate::config::ServerConfig;
use crate::rate_limit::FixedWindowLimiter;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Story + scenes generation over the upstream text generator.
    pub pipeline: StoryPipeline,
    /// Illustration backend (placeholder images in production today).
    pub images: Arc<dyn ImageProvider>,
    /// Per-client request counter for `/api` routes.
    pub rate_limiter: Arc<FixedWindowLimiter>,
}

impl AppState {
    /// Wire state from explicitly constructed collaborators.
    ///
    /// The generator is passed in rather than built here so tests can
    /// substitute a fake upstream.
    pub fn new(
        config: ServerConfig,
        generator: Arc<dyn TextGenerator>,
        images: Arc<dyn ImageProvider>,
    ) -> Self {
        let rate_limiter = Arc::new(FixedWindowLimiter::from_config(&config.rate_limit));
        Self {
            config: Arc::new(config),
            pipeline: StoryPipeline::new(generator),
            images,
            rate_limiter,
        }
    }
}
