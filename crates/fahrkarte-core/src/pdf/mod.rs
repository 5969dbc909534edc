//! PDF processing: linear text extraction and embedded page images.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Extract the linear text content of a document, all pages concatenated
/// in page order.
///
/// Failure here is absorbed, not surfaced: a document that cannot be
/// parsed as a text-bearing PDF yields the empty string so that field
/// extraction still runs (and finds nothing) instead of aborting the
/// pipeline.
pub fn extract_text(bytes: &[u8]) -> String {
    match PdfExtractor::load(bytes).and_then(|doc| doc.extract_text()) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!("text extraction degraded to empty: {e}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_yield_empty_text() {
        assert_eq!(extract_text(b"not a pdf at all"), "");
        assert_eq!(extract_text(b""), "");
    }
}
