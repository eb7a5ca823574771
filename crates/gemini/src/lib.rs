//! Client for the Google Generative Language text-completion API.
//!
//! [`TextGenerator`] is the seam the story pipeline depends on; [`GeminiApi`]
//! is the production implementation. Tests substitute their own generators.

pub mod api;
pub mod dto;
pub mod key;

pub use api::{GeminiApi, GeminiApiError, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use key::ApiKeyStatus;

/// A service that turns a prompt into generated text.
///
/// Implementations make exactly one upstream call per invocation: no retries,
/// no streaming of partial results.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GeminiApiError>;
}
