//! Runs a [`Session`] against a live [`StoryBackend`].

use crate::api::StoryBackend;
use crate::session::{ImagesRequest, RequestToken, Session, SubmitRejected, STORY_TITLE};

/// Drives story → illustration cycles end to end.
///
/// Calls are strictly sequential: the illustration request is only sent
/// after the story request has returned successfully.
pub struct SessionDriver<B: StoryBackend> {
    backend: B,
    session: Session,
}

impl<B: StoryBackend> SessionDriver<B> {
    pub fn new(backend: B, session: Session) -> Self {
        Self { backend, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// Generate a story for the session's prompt, then illustrate it.
    pub async fn generate(&mut self) -> Result<(), SubmitRejected> {
        let token = self.session.submit()?;
        self.run_story(token).await;
        Ok(())
    }

    /// Throw away the current story and generate a new one.
    pub async fn regenerate(&mut self) -> Result<(), SubmitRejected> {
        let token = self.session.regenerate()?;
        self.run_story(token).await;
        Ok(())
    }

    async fn run_story(&mut self, token: RequestToken) {
        let prompt = self.session.prompt().to_string();
        let result = self.backend.create_story(&prompt).await;

        if let Some(request) = self.session.complete_story(token, result) {
            self.run_images(request).await;
        }
    }

    async fn run_images(&mut self, request: ImagesRequest) {
        let result = self
            .backend
            .create_images(&request.scenes, STORY_TITLE)
            .await;
        self.session.complete_images(request.token, result);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use katha_core::images::{placeholder_image_urls, ImageSet};
    use katha_core::story::StoryResult;
    use katha_core::translations::Language;

    use super::*;
    use crate::api::ClientError;
    use crate::session::SessionPhase;

    #[derive(Default)]
    struct FakeBackend {
        fail_story: bool,
        fail_images: bool,
        calls: Mutex<Vec<String>>,
    }

    impl FakeBackend {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn rejected(error: &str) -> ClientError {
        ClientError::Rejected {
            status: 500,
            error: error.to_string(),
            message: None,
        }
    }

    #[async_trait::async_trait]
    impl StoryBackend for FakeBackend {
        async fn create_story(&self, prompt: &str) -> Result<StoryResult, ClientError> {
            self.calls.lock().unwrap().push(format!("story:{prompt}"));
            if self.fail_story {
                return Err(rejected("Failed to generate story"));
            }
            Ok(StoryResult::new(&format!("story about {prompt}"), "Scene 1: x"))
        }

        async fn create_images(
            &self,
            scenes: &str,
            story_title: &str,
        ) -> Result<ImageSet, ClientError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("images:{scenes}:{story_title}"));
            if self.fail_images {
                return Err(rejected("Failed to generate images"));
            }
            Ok(ImageSet::new(placeholder_image_urls(), scenes))
        }
    }

    fn driver(backend: FakeBackend, prompt: &str) -> SessionDriver<FakeBackend> {
        let mut session = Session::new(Language::Mr);
        session.set_prompt(prompt);
        SessionDriver::new(backend, session)
    }

    #[tokio::test]
    async fn generate_runs_story_then_images() {
        let mut driver = driver(FakeBackend::default(), "idea");

        driver.generate().await.unwrap();

        let session = driver.session();
        assert_eq!(session.phase(), SessionPhase::ImagesReady);
        assert_eq!(session.story(), "story about idea");
        assert_eq!(session.images().len(), 3);
        assert!(session.can_generate());
        assert_eq!(
            driver.backend.calls(),
            vec!["story:idea", "images:Scene 1: x:Marathi Story"]
        );
    }

    #[tokio::test]
    async fn story_failure_skips_images() {
        let backend = FakeBackend {
            fail_story: true,
            ..FakeBackend::default()
        };
        let mut driver = driver(backend, "idea");

        driver.generate().await.unwrap();

        assert_eq!(driver.session().phase(), SessionPhase::StoryFailed);
        assert_eq!(driver.backend.calls(), vec!["story:idea"]);
    }

    #[tokio::test]
    async fn image_failure_keeps_story() {
        let backend = FakeBackend {
            fail_images: true,
            ..FakeBackend::default()
        };
        let mut driver = driver(backend, "idea");

        driver.generate().await.unwrap();

        let session = driver.session();
        assert_eq!(session.phase(), SessionPhase::ImagesFailed);
        assert_eq!(session.story(), "story about idea");
        assert!(session.images().is_empty());
    }

    #[tokio::test]
    async fn blank_prompt_makes_no_calls() {
        let mut driver = driver(FakeBackend::default(), " ");

        assert_eq!(driver.generate().await, Err(SubmitRejected::EmptyPrompt));
        assert!(driver.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn regenerate_replaces_story() {
        let mut driver = driver(FakeBackend::default(), "idea");
        driver.generate().await.unwrap();

        driver.session_mut().set_prompt("other");
        driver.regenerate().await.unwrap();

        assert_eq!(driver.session().story(), "story about other");
        assert_eq!(driver.backend.calls().len(), 4);
    }
}
