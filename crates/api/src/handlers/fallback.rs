use crate::error::AppError;

/// Catch-all for unmatched routes: `404 { success: false, error: "Route not found" }`.
pub async fn not_found() -> AppError {
    AppError::RouteNotFound
}
