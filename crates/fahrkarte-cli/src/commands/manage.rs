//! Reprocess, delete and cleanup commands.

use std::path::Path;

use clap::Args;
use console::style;
use fahrkarte_core::ProcessError;

use super::{ingest::print_ticket, open_processor};

/// Arguments for the reprocess command.
#[derive(Args)]
pub struct ReprocessArgs {
    /// Ticket id
    id: i64,
}

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// Ticket id
    id: i64,
}

pub async fn reprocess(args: ReprocessArgs, db: Option<&Path>) -> anyhow::Result<()> {
    let processor = open_processor(db)?;
    match processor.reprocess(args.id) {
        Ok(ticket) => {
            print_ticket(&ticket);
            Ok(())
        }
        Err(ProcessError::NotFound { id }) => anyhow::bail!("ticket {id} not found"),
        Err(e) => Err(e.into()),
    }
}

pub async fn delete(args: DeleteArgs, db: Option<&Path>) -> anyhow::Result<()> {
    let processor = open_processor(db)?;
    if processor.get(args.id)?.is_none() {
        anyhow::bail!("ticket {} not found", args.id);
    }
    processor.delete(args.id)?;
    println!("{} deleted #{}", style("✓").green(), args.id);
    Ok(())
}

pub async fn cleanup(db: Option<&Path>) -> anyhow::Result<()> {
    let processor = open_processor(db)?;
    let removed = processor.cleanup_failed()?;
    println!("{} removed {removed} failed tickets", style("✓").green());
    Ok(())
}
