//! CLI subcommands.

pub mod batch;
pub mod ingest;
pub mod list;
pub mod manage;

use std::fs;
use std::path::{Path, PathBuf};

use fahrkarte_core::{TicketProcessor, TicketStore};

/// Open the ticket store, defaulting to the per-user data directory.
pub fn open_store(db: Option<&Path>) -> anyhow::Result<TicketStore> {
    let path = match db {
        Some(path) => path.to_path_buf(),
        None => default_db_path()?,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(TicketStore::open(&path)?)
}

/// Open the store and wrap it in a processor.
pub fn open_processor(db: Option<&Path>) -> anyhow::Result<TicketProcessor> {
    Ok(TicketProcessor::new(open_store(db)?))
}

fn default_db_path() -> anyhow::Result<PathBuf> {
    let base = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("could not determine the user data directory"))?;
    Ok(base.join("fahrkarte").join("tickets.db"))
}
