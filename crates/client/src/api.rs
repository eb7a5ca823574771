//! HTTP client for the story backend.
//!
//! Speaks the `{ success, data }` / `{ success: false, error, message? }`
//! envelope. Anything other than a 2xx response carrying `success: true` and
//! a `data` payload is surfaced as a [`ClientError`].

use katha_core::images::ImageSet;
use katha_core::story::StoryResult;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Where the backend listens in local development.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// Errors talking to the story backend.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, body read).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a failure envelope.
    #[error("Backend rejected request ({status}): {error}")]
    Rejected {
        status: u16,
        error: String,
        message: Option<String>,
    },

    /// The backend answered with a non-2xx status and no envelope.
    #[error("Backend error ({status}): {body}")]
    Status { status: u16, body: String },

    /// A 2xx response whose envelope did not report success.
    #[error("Backend reported failure: {0}")]
    Unsuccessful(String),

    /// The response body did not decode into the expected shape.
    #[error("Malformed backend response: {0}")]
    Malformed(String),
}

/// Wire envelope shared by every `/api` response.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
    message: Option<String>,
}

/// `GET /health` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct StoryRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageRequest<'a> {
    scenes: &'a str,
    story_title: &'a str,
}

/// The two backend operations a story session depends on.
#[async_trait::async_trait]
pub trait StoryBackend: Send + Sync {
    /// `POST /api/story`.
    async fn create_story(&self, prompt: &str) -> Result<StoryResult, ClientError>;

    /// `POST /api/image`.
    async fn create_images(&self, scenes: &str, story_title: &str)
        -> Result<ImageSet, ClientError>;
}

/// reqwest-backed [`StoryBackend`].
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /health`. Not enveloped.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        if !(200..300).contains(&status) {
            return Err(ClientError::Status { status, body });
        }
        serde_json::from_str(&body).map_err(|e| ClientError::Malformed(e.to_string()))
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        decode_envelope(status, &text)
    }
}

#[async_trait::async_trait]
impl StoryBackend for BackendClient {
    async fn create_story(&self, prompt: &str) -> Result<StoryResult, ClientError> {
        tracing::debug!(prompt_len = prompt.len(), "Requesting story");
        self.post("/api/story", &StoryRequest { prompt }).await
    }

    async fn create_images(
        &self,
        scenes: &str,
        story_title: &str,
    ) -> Result<ImageSet, ClientError> {
        tracing::debug!(scenes_len = scenes.len(), "Requesting illustrations");
        self.post(
            "/api/image",
            &ImageRequest {
                scenes,
                story_title,
            },
        )
        .await
    }
}

/// Decode an enveloped response body received with HTTP `status`.
fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ClientError> {
    if !(200..300).contains(&status) {
        return Err(
            match serde_json::from_str::<Envelope<serde_json::Value>>(body) {
                Ok(Envelope {
                    error: Some(error),
                    message,
                    ..
                }) => ClientError::Rejected {
                    status,
                    error,
                    message,
                },
                _ => ClientError::Status {
                    status,
                    body: body.to_string(),
                },
            },
        );
    }

    let envelope: Envelope<T> =
        serde_json::from_str(body).map_err(|e| ClientError::Malformed(e.to_string()))?;

    match envelope {
        Envelope {
            success: true,
            data: Some(data),
            ..
        } => Ok(data),
        Envelope { error, .. } => Err(ClientError::Unsuccessful(
            error.unwrap_or_else(|| "no data in response".to_string()),
        )),
    }
}
