//! Shared response envelope types for API handlers.
//!
//! Successful API responses use `{ "success": true, "data": ... }` and
//! failures use `{ "success": false, "error": ..., "message"?: ... }`.
//! Use these types instead of ad-hoc `serde_json::json!` bodies.

use serde::Serialize;

/// Standard `{ "success": true, "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse::ok(story)))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Standard failure envelope.
///
/// `message` carries the underlying cause for server-side failures and is
/// omitted for client mistakes.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: String, message: Option<String>) -> Self {
        Self {
            success: false,
            error,
            message,
        }
    }
}
