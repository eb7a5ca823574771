//! REST client for the Generative Language `v1beta` endpoints.
//!
//! Wraps text generation and model listing using [`reqwest`]. The client is
//! built once at startup and shared; it holds no mutable state.

use crate::dto::{GenerateContentRequest, GenerateContentResponse, ListModelsResponse, ModelInfo};
use crate::TextGenerator;

/// Public endpoint of the Generative Language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used for both the story and the scene descriptions.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const API_KEY_HEADER: &str = "X-goog-api-key";

/// HTTP client for the Generative Language API.
#[derive(Clone)]
pub struct GeminiApi {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

/// Errors from the Generative Language REST layer.
#[derive(Debug, thiserror::Error)]
pub enum GeminiApiError {
    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Generative Language API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response decoded but did not carry generated text where expected.
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),
}

impl std::fmt::Debug for GeminiApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiApi")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl GeminiApi {
    /// Create a client against the public endpoint with the default model.
    pub fn new(api_key: String) -> Self {
        Self::with_client(
            reqwest::Client::new(),
            DEFAULT_BASE_URL.to_string(),
            DEFAULT_MODEL.to_string(),
            api_key,
        )
    }

    /// Create a client reusing an existing [`reqwest::Client`] and targeting
    /// an explicit base URL and model.
    pub fn with_client(
        client: reqwest::Client,
        base_url: String,
        model: String,
        api_key: String,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key,
        }
    }

    /// `POST .../models/{model}:generateContent` URL for the configured model.
    pub fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Generate text for a single prompt.
    ///
    /// Returns the first text part of the first candidate.
    pub async fn generate_content(&self, prompt: &str) -> Result<String, GeminiApiError> {
        let response = self
            .client
            .post(self.generate_url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?;

        let parsed: GenerateContentResponse = Self::parse_response(response).await?;
        parsed.into_text()
    }

    /// List every model the API key has access to.
    ///
    /// Follows `nextPageToken` until the listing is exhausted.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, GeminiApiError> {
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(format!("{}/v1beta/models", self.base_url))
                .header(API_KEY_HEADER, &self.api_key);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token)]);
            }

            let page: ListModelsResponse = Self::parse_response(request.send().await?).await?;
            models.extend(page.models);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(models)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, otherwise capture the
    /// status and body text in [`GeminiApiError::ApiError`].
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GeminiApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GeminiApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GeminiApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait::async_trait]
impl TextGenerator for GeminiApi {
    async fn generate(&self, prompt: &str) -> Result<String, GeminiApiError> {
        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "Calling generateContent");
        self.generate_content(prompt).await
    }
}
