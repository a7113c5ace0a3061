//! # Bookbot - Reading tracker
//!
//! Track books, page progress and page-checkpoint summaries on a local
//! single-file SQLite database.
//!
//! Bookbot provides:
//! - A SQLite-backed persistence layer for books and summaries
//! - An async, cloneable handle over the single store connection
//! - A library service that validates input and generates summaries
//! - A CLI and a JSON HTTP API on top of the library service

pub mod book;
pub mod summary;
pub mod timestamp;
pub mod storage;
pub mod library;
pub mod server;
pub mod ui;
pub mod config;

// Re-exports for convenient access
pub use book::{Book, BookId, NewBook, ProgressBand};
pub use summary::{NewSummary, Summary, SummaryId};
pub use storage::{BookStore, StoreHandle};
pub use library::{Library, SummaryMode, SummaryOutcome};

/// Result type alias for Bookbot operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Bookbot operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Any failure reported by the embedded database, passed through unchanged
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Book not found: {0}")]
    BookNotFound(BookId),

    #[error("Store task failed: {0}")]
    Task(String),
}
