use tabled::{settings::Style, Table, Tabled};
use crate::{Book, Summary};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Tabled)]
pub struct BookRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Author")]
    pub author: String,
    #[tabled(rename = "Progress")]
    pub progress: String,
    #[tabled(rename = "Updated")]
    pub updated: String,
}

impl From<&Book> for BookRow {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            progress: format!("{}/{} ({}%)", book.current_page, book.total_pages, book.percent()),
            updated: book.updated_at.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct SummaryRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Page")]
    pub page: i64,
    #[tabled(rename = "Created")]
    pub created: String,
    #[tabled(rename = "Preview")]
    pub preview: String,
}

impl From<&Summary> for SummaryRow {
    fn from(summary: &Summary) -> Self {
        let first_line = summary.summary.lines().next().unwrap_or_default();
        Self {
            id: summary.id,
            page: summary.page_number,
            created: summary.created_at.clone(),
            preview: first_line.to_string(),
        }
    }
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn stats_table(stats: &[(&str, &str)]) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in stats {
        builder.add_row(label, value);
    }
    builder.build()
}

pub fn books_table(books: &[Book]) -> String {
    let rows: Vec<BookRow> = books.iter().map(BookRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn summaries_table(summaries: &[Summary]) -> String {
    let rows: Vec<SummaryRow> = summaries.iter().map(SummaryRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> Book {
        Book {
            id: 1,
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            total_pages: 412,
            current_page: 206,
            isbn: None,
            cover_image: None,
            created_at: "2024-01-01T00:00:00.000000Z".to_string(),
            updated_at: "2024-01-02T00:00:00.000000Z".to_string(),
        }
    }

    #[test]
    fn test_books_table_lists_each_book() {
        let table = books_table(&[book()]);
        assert!(table.contains("Dune"));
        assert!(table.contains("206/412 (50%)"));
    }

    #[test]
    fn test_summary_preview_is_first_line() {
        let summary = Summary {
            id: 4,
            book_id: 1,
            page_number: 100,
            summary: "Summary of \"Dune\" up to page 100:\n\nbody".to_string(),
            created_at: "2024-01-03T00:00:00.000000Z".to_string(),
        };
        let row = SummaryRow::from(&summary);
        assert_eq!(row.preview, "Summary of \"Dune\" up to page 100:");
    }

    #[test]
    fn test_empty_stats_table() {
        assert!(stats_table(&[]).is_empty());
        assert!(stats_table(&[("Books", "2")]).contains("Books"));
    }
}
