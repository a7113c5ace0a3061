//! Database schema definitions
//!
//! Column names are camelCase to stay readable by databases written by
//! earlier clients.

/// Foreign keys are off by default in SQLite and must be enabled per connection
pub const ENABLE_FOREIGN_KEYS: &str = "PRAGMA foreign_keys = ON";

/// SQL to create the books table
pub const CREATE_BOOKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    totalPages INTEGER NOT NULL,
    currentPage INTEGER DEFAULT 0,
    isbn TEXT,
    coverImage TEXT,
    createdAt TEXT NOT NULL,
    updatedAt TEXT NOT NULL
)
"#;

/// SQL to create the summaries table
/// Rows are owned by a book and removed with it
pub const CREATE_SUMMARIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS summaries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    bookId INTEGER NOT NULL,
    pageNumber INTEGER NOT NULL,
    summary TEXT NOT NULL,
    createdAt TEXT NOT NULL,
    FOREIGN KEY (bookId) REFERENCES books (id) ON DELETE CASCADE
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_books_updated ON books(updatedAt)",
    "CREATE INDEX IF NOT EXISTS idx_summaries_checkpoint ON summaries(bookId, pageNumber)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_BOOKS_TABLE, CREATE_SUMMARIES_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
