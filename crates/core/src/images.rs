//! Placeholder illustration table.
//!
//! Illustrations are stand-ins served by an external stock-photo host. The
//! URL for each slot depends only on its position, never on scene content.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Number of illustrations produced per story.
pub const SCENE_IMAGE_COUNT: usize = 3;

const PLACEHOLDER_HOST: &str = "https://picsum.photos/800/600";

/// Placeholder URL for the zero-based illustration slot `index`.
pub fn placeholder_image_url(index: usize) -> String {
    let n = index + 1;
    format!("{PLACEHOLDER_HOST}?random={n}&text=Scene%20{n}")
}

/// The full ordered set of placeholder URLs, one per scene slot.
pub fn placeholder_image_urls() -> Vec<String> {
    (0..SCENE_IMAGE_COUNT).map(placeholder_image_url).collect()
}

/// Illustrations returned for a set of scene descriptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSet {
    pub images: Vec<String>,
    pub scenes: String,
    pub timestamp: Timestamp,
}

impl ImageSet {
    pub fn new(images: Vec<String>, scenes: &str) -> Self {
        Self {
            images,
            scenes: scenes.to_string(),
            timestamp: chrono::Utc::now(),
        }
    }
}
