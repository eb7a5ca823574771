//! Handler for story generation.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// Envelope `error` text when either upstream step fails.
pub const STORY_FAILED: &str = "Failed to generate story";

/// Request body for `POST /api/story`.
#[derive(Debug, Deserialize)]
pub struct StoryRequest {
    pub prompt: Option<String>,
}

// ---------------------------------------------------------------------------
// POST /api/story
// ---------------------------------------------------------------------------

/// Generate a Marathi story and its scene descriptions.
///
/// The pipeline runs on its own task so that a client disconnecting
/// mid-request does not cancel the upstream calls; the result is simply
/// dropped if nobody is waiting for it.
pub async fn generate_story(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<StoryRequest>,
) -> AppResult<impl IntoResponse> {
    let pipeline = state.pipeline.clone();
    let task = tokio::spawn(async move { pipeline.create_story(body.prompt.as_deref()).await });

    let story = task
        .await
        .map_err(|e| AppError::InternalError(format!("Story task failed: {e}")))?
        .map_err(|e| AppError::from_pipeline(e, STORY_FAILED))?;

    tracing::info!(
        story_len = story.story.len(),
        scenes_len = story.scenes.len(),
        "Generated story"
    );

    Ok(Json(DataResponse::ok(story)))
}
