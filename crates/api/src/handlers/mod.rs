//! Request handlers.
//!
//! Handlers validate input, delegate to `katha_pipeline`, and map errors via
//! [`AppError`](crate::error::AppError).

pub mod fallback;
pub mod image;
pub mod story;
