//! Summary generation
//!
//! There is no model behind this yet: `TemplateSummarizer` waits a while and
//! fills in a fixed template.

use std::time::Duration;
use async_trait::async_trait;
use crate::Result;
use crate::book::Book;

/// Number of chapters assumed when estimating how far a reader got
pub const ASSUMED_CHAPTERS: f64 = 10.0;

#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Produce a summary of `book` covering everything up to `page`
    async fn summarize(&self, book: &Book, page: i64) -> Result<String>;
}

/// Deterministic template text, delivered after an artificial delay
#[derive(Debug, Clone)]
pub struct TemplateSummarizer {
    delay: Duration,
}

impl TemplateSummarizer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Chapters covered up to `page`, assuming ten evenly sized chapters
    pub fn chapters_read(book: &Book, page: i64) -> u32 {
        if book.total_pages <= 0 {
            return 0;
        }
        let fraction = page as f64 / book.total_pages as f64;
        (fraction * ASSUMED_CHAPTERS).ceil().max(0.0) as u32
    }

    pub fn render(book: &Book, page: i64) -> String {
        let chapters = Self::chapters_read(book, page);
        format!(
            "Summary of \"{title}\" up to page {page}:

Chapters 1-{chapters}: The story opens by introducing the main characters and their situation. We get to know who they are, what drives them and what they want.

The plot moves through several turning points that put the characters to the test. Moments of tension and conflict push the story forward.

By page {page} the plot has already developed in important ways. The characters have grown, and new details about their world and circumstances have come to light.

Key themes so far:
- Development of the main characters
- Building of the world and setting
- Introduction of the central conflicts
- First turning points in the plot

Use this summary to get back into the story and pick up where you left off.",
            title = book.title,
        )
    }
}

impl Default for TemplateSummarizer {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000))
    }
}

#[async_trait]
impl Summarizer for TemplateSummarizer {
    async fn summarize(&self, book: &Book, page: i64) -> Result<String> {
        tracing::debug!("Generating summary of book {} up to page {}", book.id, page);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(Self::render(book, page))
    }
}
