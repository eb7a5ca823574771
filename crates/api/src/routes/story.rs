//! Route definitions for story generation and illustration.
//!
//! ```text
//! POST   /story                            generate_story
//! POST   /image                            generate_images
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::{image, story};
use crate::state::AppState;

/// Story routes -- mounted under `/api`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/story", post(story::generate_story))
        .route("/image", post(image::generate_images))
}
