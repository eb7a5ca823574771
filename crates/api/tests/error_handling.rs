//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct HTTP
//! status code and `{ success: false, error, message? }` envelope. They do
//! NOT need an HTTP server -- they call `IntoResponse` directly.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use katha_api::error::{AppError, GENERIC_ERROR, ROUTE_NOT_FOUND};
use katha_core::error::CoreError;
use katha_gemini::GeminiApiError;
use katha_pipeline::{PipelineError, PipelineStage};

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: CoreError::Validation maps to 400 without a message field
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("Prompt is required.".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Prompt is required.");
    assert!(json.get("message").is_none());
}

// ---------------------------------------------------------------------------
// Test: CoreError::RateLimited maps to 429
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rate_limited_error_returns_429() {
    let err = AppError::Core(CoreError::RateLimited("slow down".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(json["error"], "slow down");
}

// ---------------------------------------------------------------------------
// Test: AppError::Upstream carries context and underlying message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upstream_error_returns_500_with_message() {
    let err = AppError::Upstream {
        context: "Failed to generate story",
        message: "Gemini API error (429): quota exhausted".into(),
    };

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Failed to generate story");
    assert_eq!(json["message"], "Gemini API error (429): quota exhausted");
}

// ---------------------------------------------------------------------------
// Test: pipeline errors split into validation (400) and upstream (500)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn pipeline_validation_maps_to_400() {
    let err = AppError::from_pipeline(
        PipelineError::Validation(CoreError::Validation("Prompt is required.".into())),
        "Failed to generate story",
    );

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Prompt is required.");
}

#[tokio::test]
async fn pipeline_upstream_maps_to_500_with_context() {
    let err = AppError::from_pipeline(
        PipelineError::Upstream {
            stage: PipelineStage::Scenes,
            source: GeminiApiError::MalformedResponse("no text".into()),
        },
        "Failed to generate story",
    );

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Failed to generate story");
    assert!(json["message"].as_str().unwrap().contains("no text"));
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest and RouteNotFound
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("invalid JSON body".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid JSON body");
}

#[tokio::test]
async fn route_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::RouteNotFound).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], ROUTE_NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: AppError::InternalError uses the generic error text
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_with_generic_error() {
    let err = AppError::InternalError("story task panicked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], GENERIC_ERROR);
    assert_eq!(json["message"], "story task panicked");
}
