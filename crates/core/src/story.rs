//! Story request validation and upstream prompt templates.
//!
//! The story is requested in Marathi and the scene descriptions in English.
//! Word count and language purity are asked for in the instructions but are
//! never checked afterwards; the upstream model is trusted with both.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Message returned when the story prompt is missing or empty.
pub const PROMPT_REQUIRED: &str = "Prompt is required.";

/// Message returned when the scenes text is missing or empty.
pub const SCENES_REQUIRED: &str = "Scenes are required for image generation";

/// Lower bound of the requested story length, in words.
pub const MIN_STORY_WORDS: usize = 300;

/// Upper bound of the requested story length, in words.
pub const MAX_STORY_WORDS: usize = 500;

/// Number of scene descriptions requested from the upstream model.
pub const SCENE_COUNT: usize = 3;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate the story idea submitted by the user.
///
/// Missing and empty prompts are rejected. Whitespace-only prompts pass;
/// the client trims before submitting, the server only checks presence.
pub fn validate_prompt(prompt: Option<&str>) -> Result<&str, CoreError> {
    match prompt {
        Some(p) if !p.is_empty() => Ok(p),
        _ => Err(CoreError::Validation(PROMPT_REQUIRED.to_string())),
    }
}

/// Validate the scenes text submitted for illustration.
pub fn validate_scenes(scenes: Option<&str>) -> Result<&str, CoreError> {
    match scenes {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(CoreError::Validation(SCENES_REQUIRED.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Prompt templates
// ---------------------------------------------------------------------------

/// Build the instruction asking for a Marathi children's story about `idea`.
pub fn story_prompt(idea: &str) -> String {
    format!(
        "\nवापरकर्त्याने दिलेल्या कल्पनेवर आधारित एक सुंदर, प्रेरणादायी मराठी गोष्ट तयार करा.\n\
         गोष्ट मध्ये नैतिकता असावी आणि सोप्या भाषेत सांगावी.\n\
         गोष्ट कमीत कमी {MIN_STORY_WORDS} शब्द आणि जास्तीत जास्त {MAX_STORY_WORDS} शब्दांची असावी.\n\
         गोष्ट रंजक आणि मुलांसाठी योग्य असावी.\n\
         \n\
         महत्त्वाचे: फक्त मराठी भाषेत उत्तर द्या. इंग्रजी किंवा इतर कोणत्याही भाषेत उत्तर देऊ नका.\n\
         \n\
         कल्पना: {idea}\n\
         \n\
         मराठी गोष्ट:"
    )
}

/// Build the instruction asking for three English scene descriptions of `story`.
pub fn scenes_prompt(story: &str) -> String {
    format!(
        "Based on this Marathi story, provide {SCENE_COUNT} key visual scenes in English \
         that would make good illustrations. Just list them as: Scene 1: [description], \
         Scene 2: [description], Scene 3: [description]\n\nStory: {story}"
    )
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// A generated story together with its scene descriptions.
///
/// Both texts come from independent upstream calls. The scenes text is kept
/// as free-form prose; its structure is not parsed or checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryResult {
    pub story: String,
    pub scenes: String,
    pub timestamp: Timestamp,
}

impl StoryResult {
    /// Assemble a result, trimming both texts and stamping the current time.
    pub fn new(story: &str, scenes: &str) -> Self {
        Self {
            story: story.trim().to_string(),
            scenes: scenes.trim().to_string(),
            timestamp: chrono::Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
