//! Ingest command - process a single ticket document.

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use fahrkarte_core::{ProcessError, SourceRef, Ticket};
use tracing::info;

use super::open_processor;

/// Arguments for the ingest command.
#[derive(Args)]
pub struct IngestArgs {
    /// Input ticket file (PDF)
    #[arg(required = true)]
    input: PathBuf,

    /// Print the stored record as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: IngestArgs, db: Option<&Path>) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());
    let processor = open_processor(db)?;

    match processor.process(&SourceRef::from_path(&args.input)) {
        Ok(ticket) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&ticket)?);
            } else {
                print_ticket(&ticket);
            }
            Ok(())
        }
        Err(ProcessError::AlreadyExists { fingerprint }) => {
            println!(
                "{} ticket already stored (fingerprint {})",
                style("duplicate:").yellow(),
                &fingerprint[..12]
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Print a one-record summary: outcome line plus the extracted fields.
pub fn print_ticket(ticket: &Ticket) {
    if ticket.is_processed {
        println!(
            "{} stored #{} {} [{}]",
            style("✓").green(),
            ticket.id,
            ticket.file_name,
            ticket.travel_mode
        );
    } else {
        println!(
            "{} stored #{} {} - {}",
            style("✗").red(),
            ticket.id,
            ticket.file_name,
            ticket.error_message.as_deref().unwrap_or("unknown error")
        );
        return;
    }

    if let Some(route) = ticket.route() {
        println!("  route:     {route}");
    }
    if let Some(dep) = ticket.departure_time {
        println!("  departure: {dep}");
    }
    if let Some(arr) = ticket.arrival_time {
        println!("  arrival:   {arr}");
    }
    if let Some(name) = &ticket.passenger_name {
        println!("  passenger: {name}");
    }
    if let Some(train) = &ticket.train_number {
        println!("  train:     {train}");
    }
    if let Some(carriage) = &ticket.carriage_number {
        println!("  carriage:  {carriage}");
    }
    if let Some(seat) = &ticket.seat_number {
        println!("  seat:      {seat}");
    }
    if let Some(payload) = &ticket.barcode_data {
        let preview: String = payload.chars().take(40).collect();
        println!("  barcode:   {preview}");
    }
}
