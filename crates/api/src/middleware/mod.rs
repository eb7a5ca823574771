//! Request middleware.
//!
//! - [`rate_limit::rate_limit`] -- Fixed-window request quota per client.

pub mod rate_limit;
