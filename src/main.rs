//! Bookbot CLI - track reading progress and page summaries from the terminal

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use bookbot::config;
use bookbot::library::{Library, TemplateSummarizer};
use bookbot::storage::StoreHandle;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "bookbot")]
#[command(version)]
#[command(about = "Reading tracker - book progress and page summaries")]
#[command(long_about = r#"
Bookbot keeps track of the books you are reading:
  • Record books with their page counts
  • Update how far you have read
  • Get a summary of a book up to any page

Example usage:
  bookbot add --title "Dune" --author "Frank Herbert" --pages 412
  bookbot progress 1 120
  bookbot summary 1
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to ./bookbot.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the database file (overrides the config)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Print machine-readable JSON instead of formatted output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Add a book
    Add {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        author: String,

        /// Total number of pages
        #[arg(short, long)]
        pages: i64,

        /// Page you are currently on
        #[arg(long)]
        current: Option<i64>,

        #[arg(long)]
        isbn: Option<String>,

        /// Path or URL of a cover image
        #[arg(long)]
        cover: Option<String>,
    },

    /// List books, most recently updated first
    List {
        /// Only show the N most recent books
        #[arg(short, long)]
        recent: Option<usize>,
    },

    /// Show a single book
    Show {
        id: i64,
    },

    /// Set the page you are on
    Progress {
        id: i64,
        page: i64,
    },

    /// Delete a book and its summaries
    Delete {
        id: i64,
    },

    /// Summarize a book up to a page (defaults to your current page)
    Summary {
        id: i64,

        page: Option<i64>,

        /// Generate a new summary even if one exists for this page
        #[arg(long)]
        new: bool,

        /// Print plain text ready to paste into a message
        #[arg(long)]
        share: bool,
    },

    /// List all summaries stored for a book
    History {
        id: i64,
    },

    /// Show statistics about the database
    Stats,

    /// Serve the library as a JSON HTTP API
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(&self) -> bool {
        *self == OutputMode::Human
    }
}

pub fn emit_success(output_mode: OutputMode, command: &str, data: serde_json::Value) -> anyhow::Result<()> {
    if output_mode.is_human() {
        return Ok(());
    }
    let envelope = serde_json::json!({
        "ok": true,
        "command": command,
        "data": data,
    });
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let output_mode = if cli.json { OutputMode::Json } else { OutputMode::Human };
    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);

    // Init rewrites the config file, so it must not depend on reading it
    if let Commands::Init { force } = cli.command {
        return commands::run_init(output_mode, &config_path, force);
    }

    let config = config::resolve_config(&config_path, cli.database.as_deref())?;
    let database = config.database_path();

    let open_library = || -> anyhow::Result<Library> {
        config::ensure_db_dir(&database)?;
        tracing::debug!("Using database {}", database.display());
        let store = StoreHandle::open(&database)?;
        let summarizer = Arc::new(TemplateSummarizer::new(config.summary_delay()));
        Ok(Library::new(store, summarizer))
    };

    match cli.command {
        // Handled before the config is read
        Commands::Init { .. } => Ok(()),

        Commands::Add { title, author, pages, current, isbn, cover } => {
            let input = bookbot::library::BookInput {
                title,
                author,
                total_pages: pages,
                current_page: current,
                isbn,
                cover_image: cover,
            };
            commands::run_add(output_mode, &open_library()?, &input).await
        }

        Commands::List { recent } => commands::run_list(output_mode, &open_library()?, recent).await,

        Commands::Show { id } => commands::run_show(output_mode, &open_library()?, id).await,

        Commands::Progress { id, page } => {
            commands::run_progress(output_mode, &open_library()?, id, page).await
        }

        Commands::Delete { id } => commands::run_delete(output_mode, &open_library()?, id).await,

        Commands::Summary { id, page, new, share } => {
            commands::run_summary(output_mode, &open_library()?, id, page, new, share).await
        }

        Commands::History { id } => commands::run_history(output_mode, &open_library()?, id).await,

        Commands::Stats => commands::run_stats(output_mode, &open_library()?, &database).await,

        Commands::Serve { port } => {
            let port = port.unwrap_or_else(|| config.port());
            bookbot::server::start_server(port, open_library()?).await
        }
    }
}
