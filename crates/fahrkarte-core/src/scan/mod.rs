//! Barcode scanning: QR detection over page images and payload
//! classification.
//!
//! Scanning is advisory. Every function here absorbs its failures and
//! returns empty results; a document whose pages cannot be rendered or
//! decoded still flows through the rest of the pipeline.

mod decoder;
mod validator;

pub use decoder::{scan_document, scan_image};
pub use validator::is_ticket_payload;

/// Scan every page of a document and return the first payload that
/// passes the ticket-likeness filter, in scan order.
///
/// All pages are scanned before selection; the candidate list is
/// accumulated across the whole document and the filter is applied to
/// the accumulated list.
pub fn extract_payload(bytes: &[u8]) -> Option<String> {
    scan_document(bytes)
        .into_iter()
        .find(|payload| is_ticket_payload(payload))
}
