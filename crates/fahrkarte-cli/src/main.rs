//! CLI application for travel ticket extraction and management.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, ingest, list, manage};

/// Travel ticket organizer - extract structured trip data from ticket PDFs
#[derive(Parser)]
#[command(name = "fahrkarte")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to the ticket database (default: per-user data directory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a single ticket document
    Ingest(ingest::IngestArgs),

    /// Process multiple ticket documents
    Batch(batch::BatchArgs),

    /// List stored tickets
    List(list::ListArgs),

    /// Show one stored ticket in full
    Show(list::ShowArgs),

    /// Show ticket counts
    Stats,

    /// Re-run extraction for a stored ticket
    Reprocess(manage::ReprocessArgs),

    /// Delete a stored ticket
    Delete(manage::DeleteArgs),

    /// Remove all failed tickets
    Cleanup,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let db = cli.db.as_deref();
    match cli.command {
        Commands::Ingest(args) => ingest::run(args, db).await,
        Commands::Batch(args) => batch::run(args, db).await,
        Commands::List(args) => list::run(args, db).await,
        Commands::Show(args) => list::show(args, db).await,
        Commands::Stats => list::stats(db).await,
        Commands::Reprocess(args) => manage::reprocess(args, db).await,
        Commands::Delete(args) => manage::delete(args, db).await,
        Commands::Cleanup => manage::cleanup(db).await,
    }
}
