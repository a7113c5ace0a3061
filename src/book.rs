//! Book types - a tracked reading item and its insert form

use serde::{Deserialize, Serialize};

/// Store-assigned book identity
pub type BookId = i64;

/// A tracked reading item as stored in the `books` table.
///
/// `current_page` is kept within `0..=total_pages` by the library layer;
/// the store itself accepts any value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub total_pages: i64,
    pub current_page: i64,
    pub isbn: Option<String>,
    pub cover_image: Option<String>,
    /// ISO-8601 creation stamp
    pub created_at: String,
    /// ISO-8601 stamp of the last progress update (or creation)
    pub updated_at: String,
}

impl Book {
    /// Fraction of the book read, in `0.0..=1.0` for valid progress.
    pub fn progress(&self) -> f64 {
        if self.total_pages <= 0 {
            return 0.0;
        }
        self.current_page as f64 / self.total_pages as f64
    }

    pub fn progress_band(&self) -> ProgressBand {
        ProgressBand::from_fraction(self.progress())
    }

    pub fn is_finished(&self) -> bool {
        self.total_pages > 0 && self.current_page >= self.total_pages
    }

    /// Progress as a whole percentage, clamped to 0..=100
    pub fn percent(&self) -> u8 {
        (self.progress() * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

/// Coarse reading progress used for colouring progress displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressBand {
    /// Less than 30% read
    Low,
    /// 30% up to (but excluding) 70%
    Medium,
    /// 70% or more
    High,
}

impl ProgressBand {
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction < 0.3 {
            ProgressBand::Low
        } else if fraction < 0.7 {
            ProgressBand::Medium
        } else {
            ProgressBand::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressBand::Low => "low",
            ProgressBand::Medium => "medium",
            ProgressBand::High => "high",
        }
    }
}

impl std::fmt::Display for ProgressBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fields for inserting a book. Identity and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub total_pages: i64,
    /// Defaults to 0 when omitted
    #[serde(default)]
    pub current_page: Option<i64>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>, total_pages: i64) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            total_pages,
            current_page: None,
            isbn: None,
            cover_image: None,
        }
    }

    pub fn with_current_page(mut self, page: i64) -> Self {
        self.current_page = Some(page);
        self
    }

    pub fn with_isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = Some(isbn.into());
        self
    }

    pub fn with_cover_image(mut self, cover: impl Into<String>) -> Self {
        self.cover_image = Some(cover.into());
        self
    }
}
