//! Ticket processing pipeline: assembly, deduplication gate, storage.
//!
//! Processing one document is strictly sequential: read bytes, compute
//! the fingerprint, extract text, scan for a barcode payload, run the
//! field extractors, assemble the record. Concurrent ingestion of
//! different documents is the caller's choice; pipeline runs share
//! nothing but the store.

use chrono::Utc;
use tracing::{info, warn};

use crate::error::ProcessError;
use crate::fingerprint::fingerprint;
use crate::models::Ticket;
use crate::pdf;
use crate::scan;
use crate::source::SourceRef;
use crate::store::TicketStore;
use crate::ticket::TicketParser;

/// Result type for pipeline operations. `Err` means the operation was
/// rejected and nothing was stored; a failed extraction is an `Ok`
/// record with `is_processed == false`.
pub type Result<T> = std::result::Result<T, ProcessError>;

/// Orchestrates extraction and storage of tickets.
pub struct TicketProcessor {
    store: TicketStore,
    parser: TicketParser,
}

impl TicketProcessor {
    pub fn new(store: TicketStore) -> Self {
        Self { store, parser: TicketParser::new() }
    }

    /// Process one document: assemble a record and commit it through the
    /// duplicate gate. Returns the stored record with its assigned id.
    ///
    /// The gate rejects a non-empty fingerprint that is already stored
    /// (the new record is discarded, not merged). An empty fingerprint —
    /// the byte read failed upstream — bypasses the check: failed reads
    /// are always insertable, so repeated attempts stay visible for
    /// inspection and cleanup. The check-then-insert sequence is not
    /// atomic; concurrent ingestion of byte-identical documents can race
    /// past it, with the store serializing only the inserts themselves.
    pub fn process(&self, source: &SourceRef) -> Result<Ticket> {
        let mut ticket = self.assemble(source);

        if !ticket.file_hash.is_empty()
            && self.store.find_by_fingerprint(&ticket.file_hash)?.is_some()
        {
            info!("rejecting duplicate of {}", ticket.file_name);
            return Err(ProcessError::AlreadyExists { fingerprint: ticket.file_hash });
        }

        ticket.id = self.store.insert(&ticket)?;
        Ok(ticket)
    }

    /// Re-run the full pipeline against the stored file reference of an
    /// existing record, overwriting its fields in place. The id is
    /// preserved; the previous processed-at/error history is not. The
    /// duplicate check does not run — the fingerprint already belongs to
    /// this record.
    pub fn reprocess(&self, id: i64) -> Result<Ticket> {
        let existing = self
            .store
            .find_by_id(id)?
            .ok_or(ProcessError::NotFound { id })?;

        let mut ticket = self.assemble(&SourceRef::new(existing.file_path));
        ticket.id = id;
        self.store.update(&ticket)?;
        Ok(ticket)
    }

    /// Fetch a stored record.
    pub fn get(&self, id: i64) -> Result<Option<Ticket>> {
        Ok(self.store.find_by_id(id)?)
    }

    /// All stored records, most recently processed first.
    pub fn list(&self) -> Result<Vec<Ticket>> {
        Ok(self.store.list_all()?)
    }

    /// Delete a stored record outright.
    pub fn delete(&self, id: i64) -> Result<()> {
        Ok(self.store.delete_by_id(id)?)
    }

    /// Remove all failed records; returns how many were deleted.
    pub fn cleanup_failed(&self) -> Result<usize> {
        Ok(self.store.delete_unprocessed()?)
    }

    /// Access to the underlying store for read-side consumers.
    pub fn store(&self) -> &TicketStore {
        &self.store
    }

    /// Assemble a record from a source reference. Never fails: any error
    /// while reading the bytes is caught here and converted into a
    /// failed record carrying the error description, with the display
    /// name still derived from the reference.
    fn assemble(&self, source: &SourceRef) -> Ticket {
        match self.try_assemble(source) {
            Ok(ticket) => ticket,
            Err(e) => {
                warn!("processing {} failed: {e}", source.as_str());
                Ticket::failed(
                    source.display_name(),
                    source.as_str(),
                    e.to_string(),
                    Utc::now().naive_utc(),
                )
            }
        }
    }

    fn try_assemble(&self, source: &SourceRef) -> crate::error::Result<Ticket> {
        let bytes = source.read_bytes()?;

        let file_hash = fingerprint(&bytes);
        let raw_text = pdf::extract_text(&bytes);
        let barcode_data = scan::extract_payload(&bytes);
        let fields = self.parser.parse(&raw_text);

        let mut ticket = Ticket::processed(
            source.display_name(),
            source.as_str(),
            file_hash,
            Utc::now().naive_utc(),
        );
        ticket.passenger_name = fields.passenger_name;
        ticket.travel_mode = fields.travel_mode;
        ticket.departure_location = fields.departure_location;
        ticket.arrival_location = fields.arrival_location;
        ticket.departure_time = fields.departure_time;
        ticket.arrival_time = fields.arrival_time;
        ticket.train_number = fields.train_number;
        ticket.seat_number = fields.seat_number;
        ticket.carriage_number = fields.carriage_number;
        ticket.barcode_data = barcode_data;
        ticket.raw_text = Some(raw_text);

        info!(
            "processed {}: mode={}, barcode={}",
            ticket.file_name,
            ticket.travel_mode,
            ticket.barcode_data.is_some()
        );
        Ok(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessError;
    use pretty_assertions::assert_eq;

    fn processor() -> TicketProcessor {
        TicketProcessor::new(TicketStore::open_in_memory().unwrap())
    }

    fn write_source(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> SourceRef {
        let path = dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        SourceRef::from_path(&path)
    }

    #[test]
    fn unreadable_source_becomes_failed_record() {
        let processor = processor();
        let source = SourceRef::new("/definitely/missing/ticket.pdf");

        let ticket = processor.process(&source).unwrap();
        assert!(!ticket.is_processed);
        assert_eq!(ticket.file_hash, "");
        assert!(ticket.error_message.is_some());
        assert_eq!(ticket.file_name, "ticket.pdf");
        assert!(ticket.id > 0);
    }

    #[test]
    fn readable_non_pdf_degrades_to_empty_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let processor = processor();
        let source = write_source(&dir, "plain.pdf", b"just some bytes");

        let ticket = processor.process(&source).unwrap();
        assert!(ticket.is_processed);
        assert_eq!(ticket.error_message, None);
        assert_eq!(ticket.file_hash.len(), 64);
        assert_eq!(ticket.raw_text.as_deref(), Some(""));
        assert_eq!(ticket.barcode_data, None);
    }

    #[test]
    fn duplicate_fingerprint_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let processor = processor();
        let first = write_source(&dir, "a.pdf", b"identical bytes");
        let second = write_source(&dir, "b.pdf", b"identical bytes");

        processor.process(&first).unwrap();
        let rejection = processor.process(&second).unwrap_err();
        assert!(matches!(rejection, ProcessError::AlreadyExists { .. }));
        assert_eq!(processor.store().count().unwrap(), 1);
    }

    #[test]
    fn failed_reads_bypass_the_duplicate_gate() {
        let processor = processor();
        let source = SourceRef::new("/missing/same.pdf");

        processor.process(&source).unwrap();
        processor.process(&source).unwrap();
        assert_eq!(processor.store().count_unprocessed().unwrap(), 2);
    }

    #[test]
    fn reprocess_missing_id_is_not_found() {
        let processor = processor();
        let rejection = processor.reprocess(4711).unwrap_err();
        assert!(matches!(rejection, ProcessError::NotFound { id: 4711 }));
        assert_eq!(processor.store().count().unwrap(), 0);
    }

    #[test]
    fn reprocess_overwrites_preserving_id() {
        let dir = tempfile::tempdir().unwrap();
        let processor = processor();
        let source = write_source(&dir, "t.pdf", b"original bytes");

        let stored = processor.process(&source).unwrap();

        // Source content changes; reprocessing picks up the new bytes
        // under the same id.
        std::fs::write(dir.path().join("t.pdf"), b"changed bytes").unwrap();
        let reprocessed = processor.reprocess(stored.id).unwrap();

        assert_eq!(reprocessed.id, stored.id);
        assert_ne!(reprocessed.file_hash, stored.file_hash);
        assert_eq!(processor.store().count().unwrap(), 1);

        let fetched = processor.get(stored.id).unwrap().unwrap();
        assert_eq!(fetched.file_hash, reprocessed.file_hash);
    }

    #[test]
    fn delete_and_cleanup() {
        let dir = tempfile::tempdir().unwrap();
        let processor = processor();
        let good = write_source(&dir, "good.pdf", b"good bytes");

        let stored = processor.process(&good).unwrap();
        processor.process(&SourceRef::new("/missing/x.pdf")).unwrap();
        processor.process(&SourceRef::new("/missing/y.pdf")).unwrap();

        assert_eq!(processor.cleanup_failed().unwrap(), 2);
        processor.delete(stored.id).unwrap();
        assert_eq!(processor.store().count().unwrap(), 0);
    }
}
