//! Batch command - process multiple ticket documents.

use std::path::Path;

use clap::Args;
use console::style;
use fahrkarte_core::{ProcessError, SourceRef};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use super::open_processor;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern for input files (e.g. "tickets/*.pdf")
    #[arg(required = true)]
    pattern: String,
}

pub async fn run(args: BatchArgs, db: Option<&Path>) -> anyhow::Result<()> {
    let inputs: Vec<_> = glob::glob(&args.pattern)?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();

    if inputs.is_empty() {
        anyhow::bail!("No files match pattern: {}", args.pattern);
    }

    let processor = open_processor(db)?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let mut stored = 0usize;
    let mut failed_records = 0usize;
    let mut duplicates = 0usize;
    let mut rejected = 0usize;

    for input in &inputs {
        pb.set_message(
            input.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default(),
        );

        match processor.process(&SourceRef::from_path(input)) {
            Ok(ticket) if ticket.is_processed => stored += 1,
            Ok(_) => failed_records += 1,
            Err(ProcessError::AlreadyExists { .. }) => duplicates += 1,
            Err(e) => {
                warn!("{}: {e}", input.display());
                rejected += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done");

    println!(
        "{} {} stored, {} failed records, {} duplicates, {} rejected",
        style("✓").green(),
        stored,
        failed_records,
        duplicates,
        rejected
    );

    Ok(())
}
