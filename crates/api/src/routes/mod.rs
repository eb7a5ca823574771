pub mod health;
pub mod story;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /story                                           generate story + scenes (POST)
/// /image                                           placeholder illustrations (POST)
/// ```
///
/// Every route in this tree is rate limited per client (see
/// [`crate::router::build_app_router`]).
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(story::router())
}
