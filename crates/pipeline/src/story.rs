//! Two-step story generation.
//!
//! ```text
//! prompt ──validate──► story_prompt ──generate──► story
//!                                                  │
//!                      scenes_prompt(story) ◄──────┘
//!                            │
//!                        generate ──► scenes ──► StoryResult (trimmed)
//! ```
//!
//! The steps are strictly sequential because the second prompt embeds the
//! first step's output. Either step failing aborts the whole operation.

use std::sync::Arc;

use katha_core::story::{scenes_prompt, story_prompt, validate_prompt, StoryResult};
use katha_gemini::TextGenerator;

use crate::error::{PipelineError, PipelineStage};

/// Orchestrates story and scene generation over a [`TextGenerator`].
///
/// Cheap to clone; the generator is shared behind an `Arc`.
#[derive(Clone)]
pub struct StoryPipeline {
    generator: Arc<dyn TextGenerator>,
}

impl StoryPipeline {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Generate a story for `prompt` plus three illustrative scene descriptions.
    ///
    /// Validation happens before any upstream call. The result is atomic:
    /// the caller gets both texts or an error, never one without the other.
    pub async fn create_story(&self, prompt: Option<&str>) -> Result<StoryResult, PipelineError> {
        let idea = validate_prompt(prompt)?;

        let story = self
            .run_stage(PipelineStage::Story, &story_prompt(idea))
            .await?;
        tracing::debug!(story_len = story.len(), "Story text generated");

        let scenes = self
            .run_stage(PipelineStage::Scenes, &scenes_prompt(&story))
            .await?;
        tracing::debug!(scenes_len = scenes.len(), "Scene descriptions generated");

        Ok(StoryResult::new(&story, &scenes))
    }

    async fn run_stage(&self, stage: PipelineStage, prompt: &str) -> Result<String, PipelineError> {
        self.generator.generate(prompt).await.map_err(|source| {
            tracing::error!(%stage, error = %source, "Upstream generation failed");
            PipelineError::Upstream { stage, source }
        })
    }
}
