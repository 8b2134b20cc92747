mod categories;
mod config;
mod logger;
mod quote;
mod remote;
mod settings;
mod storage;
mod store;
mod sync;
mod transfer;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;

use crate::categories::CategoryFilter;
use crate::config::ConfigManager;
use crate::quote::Quote;
use crate::remote::HttpRemote;
use crate::settings::SyncSettings;
use crate::storage::{FileStorage, SessionStorage};
use crate::store::{QuoteStore, ALL_CATEGORIES};
use crate::sync::SyncEngine;

#[derive(Parser)]
#[command(name = "quote-sync")]
#[command(about = "Manage a quote collection and keep it synced with a remote source", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a random quote
    Show {
        /// Restrict to a category (default: last used filter)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Add a new quote to the collection
    Add {
        /// The quote text
        text: String,

        /// The quote's category
        category: String,
    },

    /// Filter by category and show the first matching quote
    Filter {
        /// Category to filter by ("all" for no restriction)
        category: String,
    },

    /// List all categories in the collection
    Categories,

    /// Export the collection as a JSON file
    Export {
        /// Output file (default: quotes.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import quotes from a JSON file
    Import {
        /// JSON file containing an array of quotes
        file: PathBuf,
    },

    /// Run one sync pass against the remote source
    Sync,

    /// Sync periodically until interrupted
    Watch {
        /// Seconds between passes (default: from settings)
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Configure sync settings
    Config {
        /// Remote quote endpoint URL
        #[arg(long)]
        remote_url: Option<String>,

        /// Seconds between watch-mode passes
        #[arg(long)]
        interval: Option<u64>,

        /// Show current settings
        #[arg(long)]
        show: bool,
    },
}

fn open_store() -> Result<QuoteStore> {
    let storage_dir = ConfigManager::ensure_storage_dir()?;
    Ok(QuoteStore::load(Box::new(FileStorage::new(storage_dir)?)))
}

fn open_filter() -> Result<CategoryFilter> {
    let storage_dir = ConfigManager::ensure_storage_dir()?;
    Ok(CategoryFilter::new(Box::new(FileStorage::new(
        storage_dir,
    )?)))
}

fn sync_engine() -> Result<SyncEngine> {
    let settings = SyncSettings::load()?;
    Ok(SyncEngine::new(Box::new(HttpRemote::new(
        settings.remote_url,
    ))))
}

fn print_quote(quote: &Quote) {
    println!("\n  \"{}\"", quote.text.bold());
    println!("      {} {}\n", "Category:".cyan(), quote.category);
}

fn show_quote(category: Option<String>) -> Result<()> {
    let store = open_store()?;
    let filter = category.unwrap_or_else(|| {
        open_filter()
            .map(|f| f.last_filter())
            .unwrap_or_else(|_| ALL_CATEGORIES.to_string())
    });

    match store.pick_random(&filter) {
        Some(quote) => {
            print_quote(quote);
            let mut session = SessionStorage::new();
            store::record_last_viewed(&mut session, quote)?;
            Ok(())
        }
        None => Err(anyhow!("No quotes in this category.")),
    }
}

fn add_quote(text: &str, category: &str) -> Result<()> {
    let mut store = open_store()?;
    let quote = store.add(text, category)?;

    println!("{}", "Quote added successfully!".green().bold());

    // Fire-and-forget push; local state is already saved either way
    sync_engine()?.notify_added(&quote);

    Ok(())
}

fn filter_quotes(category: &str) -> Result<()> {
    let store = open_store()?;
    let mut filter = open_filter()?;

    match filter.apply(&store, category)? {
        Some(quote) => {
            print_quote(quote);
            Ok(())
        }
        None => Err(anyhow!("No quotes in this category.")),
    }
}

fn list_categories() -> Result<()> {
    let store = open_store()?;

    println!("{}", "Categories:".bold());
    println!("  {}", ALL_CATEGORIES);
    for category in categories::distinct_categories(store.list()) {
        println!("  {category}");
    }

    Ok(())
}

fn export_quotes(output: Option<PathBuf>) -> Result<()> {
    let store = open_store()?;
    let path = output.unwrap_or_else(|| PathBuf::from(transfer::EXPORT_FILE_NAME));

    transfer::export_all(&store, &path)?;
    println!(
        "{}",
        format!("Exported {} quotes to {}", store.len(), path.display())
            .green()
            .bold()
    );

    Ok(())
}

fn import_quotes(file: &PathBuf) -> Result<()> {
    let contents = std::fs::read_to_string(file)
        .map_err(|e| anyhow!("Failed to read {}: {e}", file.display()))?;

    let mut store = open_store()?;
    let count = transfer::import_all(&mut store, &contents)?;

    println!(
        "{}",
        format!("Quotes imported successfully! ({count} added)")
            .green()
            .bold()
    );

    Ok(())
}

fn sync_once() -> Result<()> {
    let mut store = open_store()?;
    let outcome = sync_engine()?.run_once(&mut store)?;
    sync::report_outcome(&outcome);
    logger::log_to_file(&format!("sync outcome: {outcome:?}")).ok();
    Ok(())
}

fn watch(interval: Option<u64>) -> Result<()> {
    let settings = SyncSettings::load()?;
    let secs = interval.unwrap_or(settings.interval_secs);

    let mut store = open_store()?;
    sync_engine()?.watch(&mut store, Duration::from_secs(secs))
}

fn main() -> Result<()> {
    logger::init_logger()?;
    logger::rotate_log_if_needed().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { category } => show_quote(category),
        Commands::Add { text, category } => add_quote(&text, &category),
        Commands::Filter { category } => filter_quotes(&category),
        Commands::Categories => list_categories(),
        Commands::Export { output } => export_quotes(output),
        Commands::Import { file } => import_quotes(&file),
        Commands::Sync => sync_once(),
        Commands::Watch { interval } => watch(interval),
        Commands::Config {
            remote_url,
            interval,
            show,
        } => {
            if show {
                settings::show_settings()
            } else {
                settings::update_settings(remote_url, interval)
            }
        }
    }
}
