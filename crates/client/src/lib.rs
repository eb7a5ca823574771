//! Client side of the Katha story generator.
//!
//! [`session::Session`] is the UI-independent state machine: prompt entry,
//! story generation, automatic illustration, error display and regeneration.
//! [`driver::SessionDriver`] runs it against a [`api::StoryBackend`], and
//! [`export::StoryDocument`] turns a finished session into a downloadable
//! document.

pub mod api;
pub mod driver;
pub mod export;
pub mod session;

pub use api::{BackendClient, ClientError, StoryBackend};
pub use driver::SessionDriver;
pub use export::{ExportError, StoryDocument};
pub use session::{ImagesRequest, RequestToken, Session, SessionPhase, SubmitRejected};
