//! Story generation pipeline and the illustration stand-in service.
//!
//! [`StoryPipeline`] chains two upstream text generations (story, then scene
//! descriptions derived from the story). [`ImageProvider`] turns scene text
//! into illustration URLs; today only [`PlaceholderImages`] exists.

pub mod error;
pub mod images;
pub mod story;

pub use error::{PipelineError, PipelineStage};
pub use images::{create_images, ImageProvider, PlaceholderImages};
pub use story::StoryPipeline;
