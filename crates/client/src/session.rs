//! Story session state machine.
//!
//! A [`Session`] owns everything one user sees: the prompt, the generated
//! story and scenes, the illustrations, the in-flight flags and the current
//! error banner. It performs no I/O. Callers start a request through
//! [`Session::submit`] (or [`Session::regenerate`]), perform the HTTP call
//! themselves, and feed the outcome back with the [`RequestToken`] they were
//! given. Outcomes carrying a token that is no longer current are dropped.
//!
//! ```text
//! Idle ─submit─▶ GeneratingStory ─ok─▶ StoryReady ─▶ GeneratingImages ─ok─▶ ImagesReady
//!                      │                                   │
//!                      └─err─▶ StoryFailed                 └─err─▶ ImagesFailed (story kept)
//! ```

use std::fmt;
use std::time::{Duration, Instant};

use katha_core::images::ImageSet;
use katha_core::story::StoryResult;
use katha_core::translations::{Language, Translations};

/// How long an error banner stays visible.
pub const ERROR_DISPLAY: Duration = Duration::from_secs(5);

/// Title sent alongside scenes when requesting illustrations.
pub const STORY_TITLE: &str = "Marathi Story";

/// Identifies one outbound request issued by a session.
///
/// Tokens increase monotonically per session; only the most recent token of
/// each kind is accepted when a result comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where the session is in the generate → illustrate cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Idle,
    GeneratingStory,
    StoryReady,
    StoryFailed,
    GeneratingImages,
    ImagesReady,
    ImagesFailed,
}

/// An illustration request the caller must send to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagesRequest {
    pub token: RequestToken,
    pub scenes: String,
}

/// Why a story request was not started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejected {
    /// The prompt is empty after trimming. The session shows `enter_prompt`.
    #[error("prompt is empty")]
    EmptyPrompt,

    /// A story or illustration request is already in flight.
    #[error("a generation request is already in flight")]
    Busy,

    /// Regeneration was asked for before any prompt was entered.
    #[error("nothing to regenerate")]
    NothingToRegenerate,
}

#[derive(Debug, Clone, Copy)]
struct ErrorBanner {
    text: &'static str,
    raised_at: Instant,
}

/// Per-user story session.
#[derive(Debug, Default)]
pub struct Session {
    language: Language,
    prompt: String,
    story: String,
    scenes: String,
    images: Vec<String>,
    phase: SessionPhase,
    error: Option<ErrorBanner>,
    last_token: u64,
    pending_story: Option<RequestToken>,
    pending_images: Option<RequestToken>,
}

impl Session {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    // ---- accessors ----

    pub fn language(&self) -> Language {
        self.language
    }

    /// UI strings for the current language.
    pub fn text(&self) -> &'static Translations {
        self.language.translations()
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn story(&self) -> &str {
        &self.story
    }

    pub fn scenes(&self) -> &str {
        &self.scenes
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_generating_story(&self) -> bool {
        self.pending_story.is_some()
    }

    pub fn is_generating_images(&self) -> bool {
        self.pending_images.is_some()
    }

    /// The error banner currently shown, if any.
    pub fn error(&self) -> Option<&'static str> {
        self.error.map(|banner| banner.text)
    }

    // ---- input ----

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn toggle_language(&mut self) {
        self.language = self.language.toggle();
    }

    /// Replace the prompt with the `index`-th suggestion of the current
    /// language. Returns the suggestion, or `None` when out of range.
    pub fn use_suggestion(&mut self, index: usize) -> Option<&'static str> {
        let suggestion = *self.text().suggestions.get(index)?;
        self.prompt = suggestion.to_string();
        Some(suggestion)
    }

    // ---- gating ----

    /// Whether the generate control is enabled.
    pub fn can_generate(&self) -> bool {
        !self.is_busy() && !self.prompt.trim().is_empty()
    }

    /// Whether the regenerate control is enabled.
    pub fn can_regenerate(&self) -> bool {
        !self.is_busy() && !self.story.is_empty()
    }

    fn is_busy(&self) -> bool {
        self.is_generating_story() || self.is_generating_images()
    }

    // ---- story ----

    /// Start a story request for the current prompt.
    ///
    /// On success the caller sends [`Session::prompt`] to the backend and
    /// reports back through [`Session::complete_story`] with the returned
    /// token.
    pub fn submit(&mut self) -> Result<RequestToken, SubmitRejected> {
        if self.prompt.trim().is_empty() {
            self.raise(self.text().enter_prompt);
            return Err(SubmitRejected::EmptyPrompt);
        }
        if self.is_busy() {
            return Err(SubmitRejected::Busy);
        }
        Ok(self.start_story())
    }

    /// Discard the current story and request a new one for the same prompt.
    ///
    /// Any request still in flight becomes stale; its result will be ignored.
    pub fn regenerate(&mut self) -> Result<RequestToken, SubmitRejected> {
        if self.prompt.is_empty() {
            return Err(SubmitRejected::NothingToRegenerate);
        }

        self.story.clear();
        self.scenes.clear();
        self.images.clear();
        self.pending_story = None;
        self.pending_images = None;
        self.phase = SessionPhase::Idle;

        if self.prompt.trim().is_empty() {
            self.raise(self.text().enter_prompt);
            return Err(SubmitRejected::EmptyPrompt);
        }
        Ok(self.start_story())
    }

    /// Apply the outcome of a story request.
    ///
    /// A successful story immediately starts illustration: the returned
    /// request must be sent without waiting for user input. Failures show the
    /// translated `story_error`, never the server's own message.
    pub fn complete_story<E: fmt::Display>(
        &mut self,
        token: RequestToken,
        result: Result<StoryResult, E>,
    ) -> Option<ImagesRequest> {
        if self.pending_story != Some(token) {
            tracing::debug!(%token, "Dropping stale story result");
            return None;
        }
        self.pending_story = None;

        match result {
            Ok(result) => {
                self.story = result.story;
                self.scenes = result.scenes;
                self.phase = SessionPhase::StoryReady;
                let scenes = self.scenes.clone();
                self.begin_images(&scenes)
            }
            Err(e) => {
                tracing::warn!(%token, error = %e, "Story generation failed");
                self.phase = SessionPhase::StoryFailed;
                self.raise(self.text().story_error);
                None
            }
        }
    }

    // ---- images ----

    /// Start an illustration request for `scenes`.
    ///
    /// Does nothing for empty scenes or while another illustration request
    /// is in flight.
    pub fn begin_images(&mut self, scenes: &str) -> Option<ImagesRequest> {
        if scenes.is_empty() || self.is_generating_images() {
            return None;
        }
        let token = self.next_token();
        self.pending_images = Some(token);
        self.phase = SessionPhase::GeneratingImages;
        Some(ImagesRequest {
            token,
            scenes: scenes.to_string(),
        })
    }

    /// Apply the outcome of an illustration request.
    ///
    /// Returns `false` when the result was stale and ignored. A failure keeps
    /// the story on screen.
    pub fn complete_images<E: fmt::Display>(
        &mut self,
        token: RequestToken,
        result: Result<ImageSet, E>,
    ) -> bool {
        if self.pending_images != Some(token) {
            tracing::debug!(%token, "Dropping stale image result");
            return false;
        }
        self.pending_images = None;

        match result {
            Ok(set) => {
                self.images = set.images;
                self.phase = SessionPhase::ImagesReady;
            }
            Err(e) => {
                tracing::warn!(%token, error = %e, "Image generation failed");
                self.phase = SessionPhase::ImagesFailed;
                self.raise(self.text().image_error);
            }
        }
        true
    }

    // ---- errors ----

    /// Show the translated export failure banner.
    pub fn report_export_failure(&mut self) {
        self.raise(self.text().pdf_error);
    }

    /// Hide the error banner once it has been visible for
    /// [`ERROR_DISPLAY`]. Returns whether a banner was cleared.
    pub fn clear_expired_error(&mut self, now: Instant) -> bool {
        match self.error {
            Some(banner) if now.saturating_duration_since(banner.raised_at) >= ERROR_DISPLAY => {
                self.error = None;
                true
            }
            _ => false,
        }
    }

    /// When the current banner is due to disappear.
    pub fn error_expires_at(&self) -> Option<Instant> {
        self.error.map(|banner| banner.raised_at + ERROR_DISPLAY)
    }

    // ---- private helpers ----

    fn start_story(&mut self) -> RequestToken {
        let token = self.next_token();
        self.pending_story = Some(token);
        self.phase = SessionPhase::GeneratingStory;
        self.error = None;
        token
    }

    fn next_token(&mut self) -> RequestToken {
        self.last_token += 1;
        RequestToken(self.last_token)
    }

    fn raise(&mut self, text: &'static str) {
        self.error = Some(ErrorBanner {
            text,
            raised_at: Instant::now(),
        });
    }
}
