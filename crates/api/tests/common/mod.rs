#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{HeaderValue, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use katha_api::config::{GeminiConfig, RateLimitConfig, ServerConfig};
use katha_api::router::build_app_router;
use katha_api::state::AppState;
use katha_gemini::{GeminiApiError, TextGenerator};
use katha_pipeline::PlaceholderImages;

/// Peer address used for requests that don't specify one.
pub const DEFAULT_PEER: &str = "127.0.0.1:40000";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and the production rate limit (50 requests per 15 minutes).
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        frontend_origin: HeaderValue::from_static("http://localhost:5173"),
        gemini: GeminiConfig {
            api_key: "test-key".to_string(),
            model: "gemini-test".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
        },
        rate_limit: RateLimitConfig::default(),
    }
}

// ---------------------------------------------------------------------------
// Fake upstream
// ---------------------------------------------------------------------------

/// Upstream stand-in that replays canned replies and records every prompt.
///
/// Running out of replies is reported as an upstream error so that an
/// unexpected extra call fails the request instead of hanging the test.
pub struct FakeGenerator {
    replies: Mutex<VecDeque<Result<String, GeminiApiError>>>,
    prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn new(replies: Vec<Result<String, GeminiApiError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Story then scenes, both succeeding.
    pub fn succeeding(story: &str, scenes: &str) -> Arc<Self> {
        Self::new(vec![Ok(story.to_string()), Ok(scenes.to_string())])
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GeminiApiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(GeminiApiError::MalformedResponse(
                "fake generator has no reply left".into(),
            ))
        })
    }
}

pub fn upstream_error(status: u16, body: &str) -> GeminiApiError {
    GeminiApiError::ApiError {
        status,
        body: body.to_string(),
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build the full application router with all middleware layers over the
/// given fake upstream, using [`test_config`].
pub fn build_test_app(generator: Arc<FakeGenerator>) -> Router {
    build_test_app_with_config(test_config(), generator)
}

pub fn build_test_app_with_config(config: ServerConfig, generator: Arc<FakeGenerator>) -> Router {
    let state = AppState::new(config, generator, Arc::new(PlaceholderImages));
    build_app_router(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

fn with_peer(mut request: Request<Body>, peer: &str) -> Request<Body> {
    let addr: SocketAddr = peer.parse().unwrap();
    request.extensions_mut().insert(ConnectInfo(addr));
    request
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, with_peer(request, DEFAULT_PEER)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    post_json_from(app, uri, body, DEFAULT_PEER).await
}

pub async fn post_json_from(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    peer: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, with_peer(request, peer)).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
