//! Summary types - text tied to a book and a page checkpoint

use crate::book::{Book, BookId};
use serde::{Deserialize, Serialize};

/// Store-assigned summary identity
pub type SummaryId = i64;

/// A stored summary covering a book up to `page_number`.
///
/// Several summaries may exist for the same checkpoint; the newest wins on lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub id: SummaryId,
    pub book_id: BookId,
    pub page_number: i64,
    pub summary: String,
    pub created_at: String,
}

impl Summary {
    /// Text used when sharing a summary outside the app. The header is
    /// added only when the body does not already open with it.
    pub fn share_text(&self, book: &Book) -> String {
        let header = format!("Summary of \"{}\" up to page {}:", book.title, self.page_number);
        if self.summary.starts_with(&header) {
            self.summary.clone()
        } else {
            format!("{}\n\n{}", header, self.summary)
        }
    }
}

/// Fields for inserting a summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSummary {
    pub book_id: BookId,
    pub page_number: i64,
    pub summary: String,
}

impl NewSummary {
    pub fn new(book_id: BookId, page_number: i64, summary: impl Into<String>) -> Self {
        Self {
            book_id,
            page_number,
            summary: summary.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> Book {
        Book {
            id: 1,
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            total_pages: 412,
            current_page: 100,
            isbn: None,
            cover_image: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn summary(body: &str) -> Summary {
        Summary {
            id: 2,
            book_id: 1,
            page_number: 100,
            summary: body.to_string(),
            created_at: String::new(),
        }
    }

    #[test]
    fn test_share_text_leads_with_title_and_page() {
        assert_eq!(
            summary("Paul arrives on Arrakis.").share_text(&dune()),
            "Summary of \"Dune\" up to page 100:\n\nPaul arrives on Arrakis."
        );
    }

    #[test]
    fn test_share_text_does_not_repeat_header() {
        let body = "Summary of \"Dune\" up to page 100:\n\nPaul arrives on Arrakis.";
        assert_eq!(summary(body).share_text(&dune()), body);
    }

    #[test]
    fn test_generated_summary_shares_cleanly() {
        let book = dune();
        let body = crate::library::TemplateSummarizer::render(&book, 100);
        let shared = summary(&body).share_text(&book);
        assert_eq!(shared.matches("Summary of").count(), 1);
    }
}
