//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite file with tables:
//! - books(id, title, author, totalPages, currentPage, isbn, coverImage, createdAt, updatedAt)
//! - summaries(id, bookId -> books.id ON DELETE CASCADE, pageNumber, summary, createdAt)

pub mod schema;
pub mod sqlite;
pub mod handle;

pub use sqlite::{BookStore, DbStats};
pub use handle::StoreHandle;
