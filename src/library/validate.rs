//! Input checks applied before anything reaches the store

use serde::{Deserialize, Serialize};
use crate::{Error, Result};
use crate::book::{Book, NewBook};

/// Raw book input as entered by a user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub total_pages: i64,
    #[serde(default)]
    pub current_page: Option<i64>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Check a new book and normalize it for insertion.
///
/// Title and author are trimmed and must not be empty, the page count must
/// be positive and the starting page must lie within the book.
pub fn new_book(input: &BookInput) -> Result<NewBook> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(Error::Validation("a title is required".to_string()));
    }

    let author = input.author.trim();
    if author.is_empty() {
        return Err(Error::Validation("an author is required".to_string()));
    }

    if input.total_pages <= 0 {
        return Err(Error::Validation(format!(
            "total pages must be a positive number, got {}",
            input.total_pages
        )));
    }

    let current_page = input.current_page.unwrap_or(0);
    if current_page < 0 || current_page > input.total_pages {
        return Err(Error::Validation(format!(
            "current page {} must be between 0 and {}",
            current_page, input.total_pages
        )));
    }

    Ok(NewBook {
        title: title.to_string(),
        author: author.to_string(),
        total_pages: input.total_pages,
        current_page: Some(current_page),
        isbn: trimmed(input.isbn.as_deref()),
        cover_image: trimmed(input.cover_image.as_deref()),
    })
}

/// Check that `page` lies within `book`
pub fn page_in_book(book: &Book, page: i64) -> Result<i64> {
    if page < 0 || page > book.total_pages {
        return Err(Error::Validation(format!(
            "page {} is outside \"{}\" (0-{})",
            page, book.title, book.total_pages
        )));
    }
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, author: &str, total: i64) -> BookInput {
        BookInput {
            title: title.to_string(),
            author: author.to_string(),
            total_pages: total,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_book_trims_and_defaults() {
        let mut raw = input("  Dune ", " Herbert", 412);
        raw.isbn = Some("   ".to_string());

        let book = new_book(&raw).unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Herbert");
        assert_eq!(book.current_page, Some(0));
        assert_eq!(book.isbn, None);
    }

    #[test]
    fn test_new_book_rejects_missing_fields() {
        assert!(matches!(new_book(&input(" ", "Herbert", 10)), Err(Error::Validation(_))));
        assert!(matches!(new_book(&input("Dune", "", 10)), Err(Error::Validation(_))));
        assert!(matches!(new_book(&input("Dune", "Herbert", 0)), Err(Error::Validation(_))));
        assert!(matches!(new_book(&input("Dune", "Herbert", -3)), Err(Error::Validation(_))));
    }

    #[test]
    fn test_new_book_checks_current_page() {
        let mut raw = input("Dune", "Herbert", 100);
        raw.current_page = Some(101);
        assert!(new_book(&raw).is_err());

        raw.current_page = Some(-1);
        assert!(new_book(&raw).is_err());

        raw.current_page = Some(100);
        assert_eq!(new_book(&raw).unwrap().current_page, Some(100));
    }

    #[test]
    fn test_page_in_book_bounds() {
        let book = Book {
            id: 1,
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            total_pages: 412,
            current_page: 0,
            isbn: None,
            cover_image: None,
            created_at: String::new(),
            updated_at: String::new(),
        };

        assert_eq!(page_in_book(&book, 0).unwrap(), 0);
        assert_eq!(page_in_book(&book, 412).unwrap(), 412);
        assert!(page_in_book(&book, 413).is_err());
        assert!(page_in_book(&book, -1).is_err());
    }
}
