//! Illustration service.
//!
//! The contract is an ordered list of URLs, one per scene slot. The only
//! implementation serves stock placeholders that ignore the scene text;
//! a real image backend can replace it behind [`ImageProvider`] without
//! callers noticing.

use katha_core::images::{placeholder_image_urls, ImageSet, SCENE_IMAGE_COUNT};
use katha_core::story::validate_scenes;

use crate::error::PipelineError;

/// Produces illustration URLs for a block of scene descriptions.
#[async_trait::async_trait]
pub trait ImageProvider: Send + Sync {
    async fn create_images(&self, scenes: &str) -> Result<Vec<String>, PipelineError>;
}

/// Stand-in provider returning fixed stock images.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderImages;

#[async_trait::async_trait]
impl ImageProvider for PlaceholderImages {
    async fn create_images(&self, _scenes: &str) -> Result<Vec<String>, PipelineError> {
        Ok(placeholder_image_urls())
    }
}

/// Validate `scenes` and ask `provider` for one illustration per scene slot.
pub async fn create_images(
    provider: &dyn ImageProvider,
    scenes: Option<&str>,
) -> Result<ImageSet, PipelineError> {
    let scenes = validate_scenes(scenes)?;

    let images = provider.create_images(scenes).await?;
    if images.len() != SCENE_IMAGE_COUNT {
        return Err(PipelineError::Images(format!(
            "expected {SCENE_IMAGE_COUNT} images, provider returned {}",
            images.len()
        )));
    }

    Ok(ImageSet::new(images, scenes))
}
