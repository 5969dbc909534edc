//! List, show and stats commands.

use std::path::Path;

use clap::Args;
use console::style;
use fahrkarte_core::{Ticket, TravelMode};

use super::{ingest::print_ticket, open_store};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Only failed tickets
    #[arg(long)]
    failed: bool,

    /// Filter by travel mode (train, bus, flight, ferry, unknown)
    #[arg(short, long)]
    mode: Option<String>,

    /// Filter by departure or arrival location substring
    #[arg(short, long)]
    location: Option<String>,

    /// Print records as JSON
    #[arg(long)]
    json: bool,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Ticket id
    id: i64,
}

pub async fn run(args: ListArgs, db: Option<&Path>) -> anyhow::Result<()> {
    let store = open_store(db)?;

    let tickets = if args.failed {
        store.list_unprocessed()?
    } else if let Some(mode) = &args.mode {
        store.list_by_mode(TravelMode::from_str(&mode.to_uppercase()))?
    } else if let Some(location) = &args.location {
        store.list_by_location(location)?
    } else {
        store.list_all()?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tickets)?);
        return Ok(());
    }

    if tickets.is_empty() {
        println!("no tickets");
        return Ok(());
    }

    for ticket in &tickets {
        print_row(ticket);
    }
    Ok(())
}

pub async fn show(args: ShowArgs, db: Option<&Path>) -> anyhow::Result<()> {
    let store = open_store(db)?;
    match store.find_by_id(args.id)? {
        Some(ticket) => {
            print_ticket(&ticket);
            if let Some(text) = &ticket.raw_text {
                if !text.is_empty() {
                    println!("  --- extracted text ---");
                    for line in text.lines().take(30) {
                        println!("  {line}");
                    }
                }
            }
            Ok(())
        }
        None => anyhow::bail!("ticket {} not found", args.id),
    }
}

pub async fn stats(db: Option<&Path>) -> anyhow::Result<()> {
    let store = open_store(db)?;
    println!("total:     {}", store.count()?);
    println!("processed: {}", store.count_processed()?);
    println!("failed:    {}", store.count_unprocessed()?);
    Ok(())
}

fn print_row(ticket: &Ticket) {
    let marker = if ticket.is_processed {
        style("✓").green()
    } else {
        style("✗").red()
    };
    let route = ticket.route().unwrap_or_else(|| "-".to_string());
    let when = ticket
        .departure_time
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());

    println!(
        "{marker} #{:<4} {:<8} {:<16} {:<42} {}",
        ticket.id,
        ticket.travel_mode.to_string(),
        when,
        route,
        ticket.file_name
    );
}
