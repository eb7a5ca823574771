//! Downloadable story document.
//!
//! The document is a list of pages: the story first, then one page per
//! illustration naming its URL. Pages render to plain UTF-8 text separated by
//! form feeds so Devanagari survives without font embedding.

use std::fmt::Write as _;
use std::path::Path;

use crate::session::Session;

/// File name offered for the exported story.
pub const EXPORT_FILE_NAME: &str = "marathi-story.txt";

/// Heading of the story page.
pub const STORY_HEADING: &str = "मराठी कथा";

/// Line width, in characters, that page bodies are wrapped to.
pub const TEXT_WIDTH: usize = 72;

const PAGE_BREAK: char = '\u{c}';

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("there is no story to export")]
    NoStory,

    #[error("failed to write document: {0}")]
    Io(#[from] std::io::Error),
}

/// One page of the exported document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub heading: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryDocument {
    pages: Vec<Page>,
}

impl StoryDocument {
    /// Build the document for the session's current story and illustrations.
    pub fn from_session(session: &Session) -> Result<Self, ExportError> {
        Self::build(session.story(), session.images())
    }

    pub fn build(story: &str, images: &[String]) -> Result<Self, ExportError> {
        if story.is_empty() {
            return Err(ExportError::NoStory);
        }

        let mut pages = vec![Page {
            heading: STORY_HEADING.to_string(),
            lines: wrap(story, TEXT_WIDTH),
        }];
        pages.extend(images.iter().enumerate().map(|(i, url)| Page {
            heading: format!("Image {}", i + 1),
            lines: vec![url.clone()],
        }));

        Ok(Self { pages })
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Render every page as text, headings centred over the body.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for (i, page) in self.pages.iter().enumerate() {
            if i > 0 {
                out.push(PAGE_BREAK);
                out.push('\n');
            }
            let pad = TEXT_WIDTH.saturating_sub(page.heading.chars().count()) / 2;
            let _ = writeln!(out, "{:pad$}{}", "", page.heading);
            out.push('\n');
            for line in &page.lines {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }

    pub fn write_to(&self, path: &Path) -> Result<(), ExportError> {
        std::fs::write(path, self.render_text())?;
        Ok(())
    }
}

impl Session {
    /// Export the current story, showing `pdf_error` if it cannot be built.
    pub fn export_document(&mut self) -> Result<StoryDocument, ExportError> {
        StoryDocument::from_session(self).inspect_err(|e| {
            tracing::warn!(error = %e, "Story export failed");
            self.report_export_failure();
        })
    }
}

/// Greedy word wrap; paragraphs are kept and overlong words get their own
/// line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        let mut len = 0;
        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            if len > 0 && len + 1 + word_len > width {
                lines.push(std::mem::take(&mut line));
                len = 0;
            }
            if len > 0 {
                line.push(' ');
                len += 1;
            }
            line.push_str(word);
            len += word_len;
        }
        lines.push(line);
    }
    lines
}
