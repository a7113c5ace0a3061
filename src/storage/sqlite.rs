//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, params, OptionalExtension};
use crate::Result;
use crate::book::{Book, BookId, NewBook};
use crate::summary::{NewSummary, Summary, SummaryId};
use crate::timestamp::{self, Clock, Stamper, SystemClock};
use super::schema;

const BOOK_COLUMNS: &str =
    "id, title, author, totalPages, currentPage, isbn, coverImage, createdAt, updatedAt";

const SUMMARY_COLUMNS: &str = "id, bookId, pageNumber, summary, createdAt";

/// SQLite-backed storage for books and their summaries.
///
/// Owns the single connection. Operations report store failures unchanged
/// and treat "no such row" as an empty result, never as an error.
pub struct BookStore {
    conn: Connection,
    stamper: Stamper,
}

impl BookStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_clock(path, Box::new(SystemClock))
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        Self::open_in_memory_with_clock(Box::new(SystemClock))
    }

    pub fn open_with_clock(path: &Path, clock: Box<dyn Clock>) -> Result<Self> {
        tracing::debug!("Opening book store at {}", path.display());
        let conn = Connection::open(path)?;
        Self::from_connection(conn, clock)
    }

    pub fn open_in_memory_with_clock(clock: Box<dyn Clock>) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, clock)
    }

    fn from_connection(conn: Connection, clock: Box<dyn Clock>) -> Result<Self> {
        let store = Self {
            conn,
            stamper: Stamper::new(clock),
        };
        store.initialize_schema()?;
        store.seed_stamper()?;
        Ok(store)
    }

    /// Initialize the database schema. Safe to run on every launch.
    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute_batch(schema::ENABLE_FOREIGN_KEYS)?;
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// New stamps must sort after everything already stored
    fn seed_stamper(&self) -> Result<()> {
        let latest: Option<String> = self.conn.query_row(
            "SELECT MAX(stamp) FROM (
                SELECT MAX(updatedAt) AS stamp FROM books
                UNION ALL
                SELECT MAX(createdAt) AS stamp FROM summaries
            )",
            [],
            |row| row.get(0),
        )?;

        if let Some(floor) = latest.as_deref().and_then(timestamp::parse) {
            self.stamper.raise_floor(floor);
        }
        Ok(())
    }

    // ========== Book Operations ==========

    /// Insert a book and return its new id.
    ///
    /// `createdAt` and `updatedAt` receive the same stamp. Missing optional
    /// fields are stored as 0 / empty text.
    pub fn create_book(&self, book: &NewBook) -> Result<BookId> {
        let now = self.stamper.next();
        self.conn.execute(
            r#"
            INSERT INTO books (title, author, totalPages, currentPage, isbn, coverImage, createdAt, updatedAt)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
            "#,
            params![
                book.title,
                book.author,
                book.total_pages,
                book.current_page.unwrap_or(0),
                book.isbn.as_deref().unwrap_or(""),
                book.cover_image.as_deref().unwrap_or(""),
                now,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!("Created book {} ({:?})", id, book.title);
        Ok(id)
    }

    /// All books, most recently updated first
    pub fn list_books(&self) -> Result<Vec<Book>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {BOOK_COLUMNS} FROM books ORDER BY updatedAt DESC, id DESC"
        ))?;

        let books = stmt
            .query_map([], |row| self.row_to_book(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(books)
    }

    /// Get a book by id
    pub fn get_book(&self, id: BookId) -> Result<Option<Book>> {
        self.conn
            .query_row(
                &format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ?1"),
                [id],
                |row| self.row_to_book(row),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Set the current page and bump `updatedAt`. An unknown id is a no-op.
    pub fn update_progress(&self, id: BookId, current_page: i64) -> Result<()> {
        let now = self.stamper.next();
        let changed = self.conn.execute(
            "UPDATE books SET currentPage = ?1, updatedAt = ?2 WHERE id = ?3",
            params![current_page, now, id],
        )?;
        tracing::debug!("Progress of book {} set to page {} ({} row(s))", id, current_page, changed);
        Ok(())
    }

    /// Delete a book together with its summaries. An unknown id is a no-op.
    pub fn delete_book(&self, id: BookId) -> Result<()> {
        let changed = self.conn.execute("DELETE FROM books WHERE id = ?1", [id])?;
        tracing::debug!("Deleted book {} ({} row(s))", id, changed);
        Ok(())
    }

    /// Count all books
    pub fn count_books(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Helper to convert a row to a Book
    fn row_to_book(&self, row: &rusqlite::Row) -> rusqlite::Result<Book> {
        let current_page: Option<i64> = row.get(4)?;
        let isbn: Option<String> = row.get(5)?;
        let cover_image: Option<String> = row.get(6)?;

        Ok(Book {
            id: row.get(0)?,
            title: row.get(1)?,
            author: row.get(2)?,
            total_pages: row.get(3)?,
            current_page: current_page.unwrap_or(0),
            isbn: isbn.filter(|s| !s.is_empty()),
            cover_image: cover_image.filter(|s| !s.is_empty()),
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    // ========== Summary Operations ==========

    /// Insert a summary and return its new id.
    ///
    /// A `book_id` with no matching book fails with the foreign key error.
    pub fn create_summary(&self, summary: &NewSummary) -> Result<SummaryId> {
        let now = self.stamper.next();
        self.conn.execute(
            "INSERT INTO summaries (bookId, pageNumber, summary, createdAt) VALUES (?1, ?2, ?3, ?4)",
            params![summary.book_id, summary.page_number, summary.summary, now],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!("Created summary {} for book {} at page {}", id, summary.book_id, summary.page_number);
        Ok(id)
    }

    /// Newest summary recorded for exactly this book and page
    pub fn latest_summary(&self, book_id: BookId, page_number: i64) -> Result<Option<Summary>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {SUMMARY_COLUMNS} FROM summaries
                     WHERE bookId = ?1 AND pageNumber = ?2
                     ORDER BY createdAt DESC, id DESC
                     LIMIT 1"
                ),
                [book_id, page_number],
                |row| self.row_to_summary(row),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Get a summary by id
    pub fn get_summary(&self, id: SummaryId) -> Result<Option<Summary>> {
        self.conn
            .query_row(
                &format!("SELECT {SUMMARY_COLUMNS} FROM summaries WHERE id = ?1"),
                [id],
                |row| self.row_to_summary(row),
            )
            .optional()
            .map_err(Into::into)
    }

    /// All summaries of a book, newest first
    pub fn list_summaries(&self, book_id: BookId) -> Result<Vec<Summary>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM summaries WHERE bookId = ?1 ORDER BY createdAt DESC, id DESC"
        ))?;

        let summaries = stmt
            .query_map([book_id], |row| self.row_to_summary(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(summaries)
    }

    /// Count all summaries
    pub fn count_summaries(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM summaries", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Helper to convert a row to a Summary
    fn row_to_summary(&self, row: &rusqlite::Row) -> rusqlite::Result<Summary> {
        Ok(Summary {
            id: row.get(0)?,
            book_id: row.get(1)?,
            page_number: row.get(2)?,
            summary: row.get(3)?,
            created_at: row.get(4)?,
        })
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            books: self.count_books()?,
            summaries: self.count_summaries()?,
        })
    }
}

/// Database statistics
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DbStats {
    pub books: usize,
    pub summaries: usize,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Books: {}", self.books)?;
        writeln!(f, "  Summaries: {}", self.summaries)
    }
}
