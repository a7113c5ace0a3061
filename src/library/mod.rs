//! Library service - what the screens of a reading app need
//!
//! Sits between user-facing surfaces (CLI, HTTP) and the store. Input is
//! validated here, books are resolved before they are changed, and
//! summaries are reused or generated on request.

pub mod validate;
pub mod summarizer;

use std::sync::Arc;
use serde::Serialize;
use crate::{Error, Result};
use crate::book::{Book, BookId};
use crate::storage::{DbStats, StoreHandle};
use crate::summary::{NewSummary, Summary};

pub use summarizer::{Summarizer, TemplateSummarizer};
pub use validate::BookInput;

/// Number of books shown as "recent" by default
pub const DEFAULT_RECENT_LIMIT: usize = 3;

/// Whether an existing summary for the requested page may be returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryMode {
    /// Return the newest stored summary for the page if there is one
    #[default]
    ReuseExisting,
    /// Always generate and store a new summary
    AlwaysNew,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "summary", rename_all = "lowercase")]
pub enum SummaryOutcome {
    /// A summary for this page already existed
    Existing(Summary),
    /// A new summary was generated and stored
    Created(Summary),
}

impl SummaryOutcome {
    pub fn summary(&self) -> &Summary {
        match self {
            SummaryOutcome::Existing(s) | SummaryOutcome::Created(s) => s,
        }
    }

    pub fn into_summary(self) -> Summary {
        match self {
            SummaryOutcome::Existing(s) | SummaryOutcome::Created(s) => s,
        }
    }

    pub fn is_existing(&self) -> bool {
        matches!(self, SummaryOutcome::Existing(_))
    }
}

#[derive(Clone)]
pub struct Library {
    store: StoreHandle,
    summarizer: Arc<dyn Summarizer>,
}

impl Library {
    pub fn new(store: StoreHandle, summarizer: Arc<dyn Summarizer>) -> Self {
        Self { store, summarizer }
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    pub async fn add_book(&self, input: &BookInput) -> Result<Book> {
        let new_book = validate::new_book(input)?;
        let id = self.store.create_book(new_book).await?;
        tracing::info!("Added book {} ({:?})", id, input.title.trim());
        self.book(id).await
    }

    /// All books, most recently updated first
    pub async fn books(&self) -> Result<Vec<Book>> {
        self.store.list_books().await
    }

    pub async fn recent_books(&self, limit: usize) -> Result<Vec<Book>> {
        let mut books = self.store.list_books().await?;
        books.truncate(limit);
        Ok(books)
    }

    pub async fn book(&self, id: BookId) -> Result<Book> {
        self.store
            .get_book(id)
            .await?
            .ok_or(Error::BookNotFound(id))
    }

    /// Move the reader to `page` and return the updated book
    pub async fn update_progress(&self, id: BookId, page: i64) -> Result<Book> {
        let book = self.book(id).await?;
        let page = validate::page_in_book(&book, page)?;
        self.store.update_progress(id, page).await?;
        tracing::info!("Book {} now at page {}/{}", id, page, book.total_pages);
        self.book(id).await
    }

    /// Delete a book and everything stored for it
    pub async fn delete_book(&self, id: BookId) -> Result<Book> {
        let book = self.book(id).await?;
        self.store.delete_book(id).await?;
        tracing::info!("Deleted book {} ({:?})", id, book.title);
        Ok(book)
    }

    /// Summarize a book up to `page`, or up to the reader's current page.
    pub async fn summarize(&self, id: BookId, page: Option<i64>, mode: SummaryMode) -> Result<SummaryOutcome> {
        let book = self.book(id).await?;
        let page = validate::page_in_book(&book, page.unwrap_or(book.current_page))?;

        if mode == SummaryMode::ReuseExisting {
            match self.store.latest_summary(id, page).await {
                Ok(Some(existing)) => return Ok(SummaryOutcome::Existing(existing)),
                Ok(None) => {}
                // The lookup only saves work; generate a fresh one instead
                Err(e) => tracing::warn!("Failed to look up summary of book {} at page {}: {}", id, page, e),
            }
        }

        let text = self.summarizer.summarize(&book, page).await?;
        let summary_id = self
            .store
            .create_summary(NewSummary::new(id, page, text))
            .await?;

        let summary = self
            .store
            .get_summary(summary_id)
            .await?
            .ok_or(Error::Storage(rusqlite::Error::QueryReturnedNoRows))?;

        tracing::info!("Stored summary {} of book {} at page {}", summary.id, id, page);
        Ok(SummaryOutcome::Created(summary))
    }

    /// Every summary stored for a book, newest first
    pub async fn summaries(&self, id: BookId) -> Result<Vec<Summary>> {
        self.book(id).await?;
        self.store.list_summaries(id).await
    }

    pub async fn stats(&self) -> Result<DbStats> {
        self.store.stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn library() -> Library {
        let store = StoreHandle::open_in_memory().unwrap();
        Library::new(store, Arc::new(TemplateSummarizer::new(Duration::ZERO)))
    }

    fn dune() -> BookInput {
        BookInput {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            total_pages: 412,
            ..Default::default()
        }
    }

    struct FailingSummarizer;

    #[async_trait::async_trait]
    impl Summarizer for FailingSummarizer {
        async fn summarize(&self, _book: &Book, _page: i64) -> Result<String> {
            Err(Error::Validation("no summaries today".to_string()))
        }
    }

    #[tokio::test]
    async fn test_add_book_validates_before_storing() {
        let library = library();

        let err = library
            .add_book(&BookInput { title: "  ".to_string(), ..dune() })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(library.books().await.unwrap().is_empty());

        let book = library.add_book(&dune()).await.unwrap();
        assert_eq!(book.current_page, 0);
        assert_eq!(book.title, "Dune");
    }

    #[tokio::test]
    async fn test_recent_books_limit() {
        let library = library();
        for title in ["A", "B", "C", "D"] {
            library
                .add_book(&BookInput { title: title.to_string(), ..dune() })
                .await
                .unwrap();
        }

        let recent = library.recent_books(DEFAULT_RECENT_LIMIT).await.unwrap();
        let titles: Vec<_> = recent.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["D", "C", "B"]);
    }

    #[tokio::test]
    async fn test_update_progress_checks_bounds() {
        let library = library();
        let book = library.add_book(&dune()).await.unwrap();

        let err = library.update_progress(book.id, 413).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let updated = library.update_progress(book.id, 200).await.unwrap();
        assert_eq!(updated.current_page, 200);
        assert!(updated.updated_at > book.updated_at);
    }

    #[tokio::test]
    async fn test_unknown_book_is_reported() {
        let library = library();

        assert!(matches!(library.book(9).await, Err(Error::BookNotFound(9))));
        assert!(matches!(library.update_progress(9, 1).await, Err(Error::BookNotFound(9))));
        assert!(matches!(library.delete_book(9).await, Err(Error::BookNotFound(9))));
        assert!(matches!(
            library.summarize(9, Some(1), SummaryMode::ReuseExisting).await,
            Err(Error::BookNotFound(9))
        ));
    }

    #[tokio::test]
    async fn test_summarize_reuses_existing() {
        let library = library();
        let book = library.add_book(&dune()).await.unwrap();

        let first = library.summarize(book.id, Some(100), SummaryMode::ReuseExisting).await.unwrap();
        assert!(!first.is_existing());

        let again = library.summarize(book.id, Some(100), SummaryMode::ReuseExisting).await.unwrap();
        assert!(again.is_existing());
        assert_eq!(again.summary(), first.summary());

        let fresh = library.summarize(book.id, Some(100), SummaryMode::AlwaysNew).await.unwrap();
        assert!(!fresh.is_existing());
        assert_ne!(fresh.summary().id, first.summary().id);

        let latest = library.summarize(book.id, Some(100), SummaryMode::ReuseExisting).await.unwrap();
        assert_eq!(latest.into_summary().id, fresh.summary().id);
        assert_eq!(library.summaries(book.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_summarize_defaults_to_current_page() {
        let library = library();
        let book = library.add_book(&dune()).await.unwrap();
        library.update_progress(book.id, 150).await.unwrap();

        let outcome = library.summarize(book.id, None, SummaryMode::ReuseExisting).await.unwrap();
        assert_eq!(outcome.summary().page_number, 150);
        assert!(outcome.summary().summary.contains("up to page 150"));
    }

    #[tokio::test]
    async fn test_summarize_rejects_page_outside_book() {
        let library = library();
        let book = library.add_book(&dune()).await.unwrap();

        let err = library.summarize(book.id, Some(500), SummaryMode::AlwaysNew).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(library.summaries(book.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generation_failure_stores_nothing() {
        let store = StoreHandle::open_in_memory().unwrap();
        let library = Library::new(store, Arc::new(FailingSummarizer));
        let book = library.add_book(&dune()).await.unwrap();

        assert!(library.summarize(book.id, Some(10), SummaryMode::AlwaysNew).await.is_err());
        assert!(library.summaries(book.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_summaries() {
        let library = library();
        let book = library.add_book(&dune()).await.unwrap();
        library.summarize(book.id, Some(100), SummaryMode::AlwaysNew).await.unwrap();

        library.delete_book(book.id).await.unwrap();

        assert!(library.store().latest_summary(book.id, 100).await.unwrap().is_none());
        assert_eq!(library.stats().await.unwrap().summaries, 0);
    }
}
