use crate::ui::{theme, Icons};
use crate::{Book, Summary};
use owo_colors::OwoColorize;

const BAR_WIDTH: usize = 20;

pub fn header(text: &str) {
    println!("{} {}", Icons::BOOKS, text.style(theme().header.clone()));
}

pub fn status(icon: &str, label: &str, value: &str) {
    println!("{} {}: {}", icon, label.style(theme().dim.clone()), value);
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", title.style(theme().header.clone()));
}

pub fn dim(text: &str) -> String {
    text.style(theme().dim.clone()).to_string()
}

pub fn muted(text: &str) -> String {
    text.style(theme().muted.clone()).to_string()
}

/// `[#######-------------] 35%`, coloured by progress band
pub fn progress_bar(book: &Book) -> String {
    let filled = ((book.progress().clamp(0.0, 1.0)) * BAR_WIDTH as f64).round() as usize;
    let bar = format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        book.percent()
    );
    bar.style(theme().progress(book.progress_band())).to_string()
}

/// Full details of a single book
pub fn book_details(book: &Book) {
    println!(
        "{} {} {}",
        Icons::BOOK,
        book.title.style(theme().header.clone()),
        muted(&format!("#{}", book.id))
    );
    status(Icons::PERSON, "Author", &book.author);
    status(
        Icons::BOOKMARK,
        "Progress",
        &format!("page {} of {}  {}", book.current_page, book.total_pages, progress_bar(book)),
    );
    if let Some(isbn) = &book.isbn {
        status(Icons::PAGE, "ISBN", isbn);
    }
    if let Some(cover) = &book.cover_image {
        status(Icons::PAGE, "Cover", cover);
    }
    status(Icons::CLOCK, "Updated", &book.updated_at);
}

pub fn summary_block(book: &Book, summary: &Summary) {
    section(&format!(" {} ", book.title));
    println!(
        "{}",
        dim(&format!("page {} · {}", summary.page_number, summary.created_at))
    );
    println!();
    println!("{}", summary.summary);
}

