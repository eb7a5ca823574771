use std::fmt;

use katha_core::error::CoreError;
use katha_gemini::GeminiApiError;

/// Which upstream step of the story pipeline failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Story,
    Scenes,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::Story => f.write_str("story generation"),
            PipelineStage::Scenes => f.write_str("scene extraction"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Input rejected before any upstream call was made.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// An upstream text generation failed. Any earlier output is discarded.
    #[error("{source}")]
    Upstream {
        stage: PipelineStage,
        #[source]
        source: GeminiApiError,
    },

    /// The illustration backend failed or broke its output contract.
    #[error("{0}")]
    Images(String),
}

impl PipelineError {
    pub fn is_validation(&self) -> bool {
        matches!(self, PipelineError::Validation(_))
    }
}
