//! Async access to the book store
//!
//! The store owns one blocking SQLite connection. `StoreHandle` shares it
//! behind a mutex and runs each call on tokio's blocking pool, so callers
//! simply `.await` a result. Calls are serialized; none can be cancelled
//! once started.

use std::path::Path;
use std::sync::{Arc, Mutex};
use crate::{Error, Result};
use crate::book::{Book, BookId, NewBook};
use crate::summary::{NewSummary, Summary, SummaryId};
use super::sqlite::{BookStore, DbStats};

#[derive(Clone)]
pub struct StoreHandle {
    store: Arc<Mutex<BookStore>>,
}

impl StoreHandle {
    pub fn new(store: BookStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Open a database file and wrap it
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(BookStore::open(path)?))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(BookStore::open_in_memory()?))
    }

    /// Run `op` against the store on the blocking pool
    async fn call<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&BookStore) -> Result<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || {
            // A panic in another call leaves the connection itself intact
            let guard = store.lock().unwrap_or_else(|e| e.into_inner());
            op(&guard)
        })
        .await
        .map_err(|e| Error::Task(e.to_string()))?
    }

    pub async fn create_book(&self, book: NewBook) -> Result<BookId> {
        self.call(move |store| store.create_book(&book)).await
    }

    pub async fn list_books(&self) -> Result<Vec<Book>> {
        self.call(|store| store.list_books()).await
    }

    pub async fn get_book(&self, id: BookId) -> Result<Option<Book>> {
        self.call(move |store| store.get_book(id)).await
    }

    pub async fn update_progress(&self, id: BookId, current_page: i64) -> Result<()> {
        self.call(move |store| store.update_progress(id, current_page)).await
    }

    pub async fn delete_book(&self, id: BookId) -> Result<()> {
        self.call(move |store| store.delete_book(id)).await
    }

    pub async fn create_summary(&self, summary: NewSummary) -> Result<SummaryId> {
        self.call(move |store| store.create_summary(&summary)).await
    }

    pub async fn latest_summary(&self, book_id: BookId, page_number: i64) -> Result<Option<Summary>> {
        self.call(move |store| store.latest_summary(book_id, page_number)).await
    }

    pub async fn get_summary(&self, id: SummaryId) -> Result<Option<Summary>> {
        self.call(move |store| store.get_summary(id)).await
    }

    pub async fn list_summaries(&self, book_id: BookId) -> Result<Vec<Summary>> {
        self.call(move |store| store.list_summaries(book_id)).await
    }

    pub async fn stats(&self) -> Result<DbStats> {
        self.call(|store| store.stats()).await
    }
}
