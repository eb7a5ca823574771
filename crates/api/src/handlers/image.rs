//! Handler for story illustrations.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use katha_pipeline::create_images;

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// Envelope `error` text when the illustration backend fails.
pub const IMAGES_FAILED: &str = "Failed to generate images";

/// Request body for `POST /api/image`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    pub scenes: Option<String>,
    /// Accepted for forward compatibility; not used by the placeholder backend.
    pub story_title: Option<String>,
}

// ---------------------------------------------------------------------------
// POST /api/image
// ---------------------------------------------------------------------------

/// Return one illustration URL per scene slot.
pub async fn generate_images(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ImageRequest>,
) -> AppResult<impl IntoResponse> {
    let set = create_images(state.images.as_ref(), body.scenes.as_deref())
        .await
        .map_err(|e| AppError::from_pipeline(e, IMAGES_FAILED))?;

    tracing::info!(
        count = set.images.len(),
        story_title = body.story_title.as_deref().unwrap_or(""),
        "Generated story images"
    );

    Ok(Json(DataResponse::ok(set)))
}
