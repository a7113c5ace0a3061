use crate::{OutputMode, emit_success};
use bookbot::config::{self, BookbotConfig};
use bookbot::library::{BookInput, Library, SummaryMode, SummaryOutcome};
use bookbot::ui::{self, Icons, Spinner};
use owo_colors::OwoColorize;
use std::path::Path;

pub fn run_init(output_mode: OutputMode, path: &Path, force: bool) -> anyhow::Result<()> {
    let database = config::default_database_path_in(Path::new("."));
    let cfg = BookbotConfig {
        database: Some(database.to_string_lossy().to_string()),
        port: Some(config::DEFAULT_PORT),
        summary_delay_ms: Some(config::DEFAULT_SUMMARY_DELAY_MS),
    };
    config::write_config(path, &cfg, force)?;

    if output_mode.is_human() {
        ui::success(&format!("Wrote config to {}", path.display()));
        ui::status(Icons::DATABASE, "Database", &database.display().to_string());
    } else {
        emit_success(output_mode, "init", serde_json::json!({
            "config": path.display().to_string(),
            "database": database.display().to_string(),
        }))?;
    }
    Ok(())
}

pub async fn run_add(output_mode: OutputMode, library: &Library, input: &BookInput) -> anyhow::Result<()> {
    let book = library.add_book(input).await?;

    if output_mode.is_human() {
        ui::success(&format!("Added \"{}\"", book.title));
        ui::book_details(&book);
    } else {
        emit_success(output_mode, "add", serde_json::to_value(&book)?)?;
    }
    Ok(())
}

pub async fn run_list(output_mode: OutputMode, library: &Library, recent: Option<usize>) -> anyhow::Result<()> {
    let books = match recent {
        Some(limit) => library.recent_books(limit).await?,
        None => library.books().await?,
    };

    if output_mode.is_human() {
        if books.is_empty() {
            println!("{} No books yet. Add one with {}", Icons::BOOKS, "bookbot add".bold());
        } else {
            ui::header(&format!("{} book(s)", books.len()));
            println!("{}", ui::books_table(&books));
        }
    } else {
        emit_success(output_mode, "list", serde_json::to_value(&books)?)?;
    }
    Ok(())
}

pub async fn run_show(output_mode: OutputMode, library: &Library, id: i64) -> anyhow::Result<()> {
    let book = library.book(id).await?;

    if output_mode.is_human() {
        ui::book_details(&book);
    } else {
        emit_success(output_mode, "show", serde_json::to_value(&book)?)?;
    }
    Ok(())
}

pub async fn run_progress(output_mode: OutputMode, library: &Library, id: i64, page: i64) -> anyhow::Result<()> {
    let book = library.update_progress(id, page).await?;

    if output_mode.is_human() {
        ui::success("Progress updated");
        println!("  {} {}", book.title.bold(), ui::progress_bar(&book));
        if book.is_finished() {
            println!("  {} Finished!", Icons::NEW);
        }
    } else {
        emit_success(output_mode, "progress", serde_json::to_value(&book)?)?;
    }
    Ok(())
}

pub async fn run_delete(output_mode: OutputMode, library: &Library, id: i64) -> anyhow::Result<()> {
    let book = library.delete_book(id).await?;

    if output_mode.is_human() {
        println!("{} Deleted \"{}\"", Icons::DEL, book.title);
    } else {
        emit_success(output_mode, "delete", serde_json::to_value(&book)?)?;
    }
    Ok(())
}

pub async fn run_summary(
    output_mode: OutputMode,
    library: &Library,
    id: i64,
    page: Option<i64>,
    new: bool,
    share: bool,
) -> anyhow::Result<()> {
    let book = library.book(id).await?;
    let mode = if new { SummaryMode::AlwaysNew } else { SummaryMode::ReuseExisting };

    let spinner = if output_mode.is_human() && !share {
        Some(Spinner::new(&format!("{} Summarizing \"{}\"...", Icons::BRAIN, book.title)))
    } else {
        None
    };

    let outcome = match library.summarize(id, page, mode).await {
        Ok(outcome) => outcome,
        Err(e) => {
            if let Some(spinner) = &spinner {
                spinner.clear();
            }
            return Err(e.into());
        }
    };

    if let Some(spinner) = &spinner {
        match &outcome {
            SummaryOutcome::Existing(_) => spinner.clear(),
            SummaryOutcome::Created(_) => spinner.finish_timed("Summary ready"),
        }
    }

    if share {
        println!("{}", outcome.summary().share_text(&book));
    } else if output_mode.is_human() {
        ui::summary_block(&book, outcome.summary());
        if outcome.is_existing() {
            println!();
            ui::warn("A summary for this page already existed. Run again with --new to create a fresh one.");
        }
    } else {
        emit_success(output_mode, "summary", serde_json::to_value(&outcome)?)?;
    }
    Ok(())
}

pub async fn run_history(output_mode: OutputMode, library: &Library, id: i64) -> anyhow::Result<()> {
    let book = library.book(id).await?;
    let summaries = library.summaries(id).await?;

    if output_mode.is_human() {
        ui::header(&format!("Summaries of \"{}\"", book.title));
        if summaries.is_empty() {
            println!("  {}", ui::muted("none yet"));
        } else {
            println!("{}", ui::summaries_table(&summaries));
        }
    } else {
        emit_success(output_mode, "history", serde_json::to_value(&summaries)?)?;
    }
    Ok(())
}

pub async fn run_stats(output_mode: OutputMode, library: &Library, database: &Path) -> anyhow::Result<()> {
    let stats = library.stats().await?;

    if output_mode.is_human() {
        let books = stats.books.to_string();
        let summaries = stats.summaries.to_string();
        println!("{} Bookbot Statistics ({})", Icons::STATS, database.display());
        println!(
            "{}",
            ui::stats_table(&[("Books", books.as_str()), ("Summaries", summaries.as_str())])
        );
    } else {
        emit_success(output_mode, "stats", serde_json::to_value(&stats)?)?;
    }
    Ok(())
}
