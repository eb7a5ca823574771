//! Domain building blocks for the Katha story generator.
//!
//! Everything here is pure: validation, prompt templates, the placeholder
//! image table and the UI translation table. No I/O lives in this crate.

pub mod error;
pub mod images;
pub mod story;
pub mod translations;
pub mod types;
