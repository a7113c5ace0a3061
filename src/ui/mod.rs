pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{
    book_details, dim, header, muted, progress_bar, section, status, success, summary_block,
    warn,
};
pub use progress::Spinner;
pub use table::{books_table, stats_table, summaries_table, TableBuilder};
pub use theme::{theme, Theme};
