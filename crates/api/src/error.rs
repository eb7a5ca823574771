use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use katha_core::error::CoreError;
use katha_pipeline::PipelineError;

use crate::response::ErrorResponse;

/// Envelope `error` text for unexpected server failures.
pub const GENERIC_ERROR: &str = "Something went wrong!";

/// Envelope `error` text for unmatched routes.
pub const ROUTE_NOT_FOUND: &str = "Route not found";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the `{ success: false, error,
/// message? }` envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `katha_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An upstream call failed. `context` is the user-facing summary,
    /// `message` the underlying cause.
    #[error("{context}: {message}")]
    Upstream {
        context: &'static str,
        message: String,
    },

    /// A malformed request body or similar client mistake.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No route matched the request path.
    #[error("Route not found")]
    RouteNotFound,

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Map a pipeline failure, labelling upstream failures with `context`.
    pub fn from_pipeline(err: PipelineError, context: &'static str) -> Self {
        match err {
            PipelineError::Validation(core) => AppError::Core(core),
            other => AppError::Upstream {
                context,
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
                CoreError::RateLimited(msg) => {
                    (StatusCode::TOO_MANY_REQUESTS, msg.clone(), None)
                }
            },

            // --- HTTP-specific errors ---
            AppError::Upstream { context, message } => {
                tracing::error!(error = %message, "{context}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    context.to_string(),
                    Some(message.clone()),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::RouteNotFound => (StatusCode::NOT_FOUND, ROUTE_NOT_FOUND.to_string(), None),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERIC_ERROR.to_string(),
                    Some(msg.clone()),
                )
            }
        };

        (status, axum::Json(ErrorResponse::new(error, message))).into_response()
    }
}
