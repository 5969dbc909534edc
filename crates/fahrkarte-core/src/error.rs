//! Error types for the fahrkarte-core library.

use thiserror::Error;

/// Main error type for the fahrkarte library.
#[derive(Error, Debug)]
pub enum FahrkarteError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Processing pipeline rejection.
    #[error("processing error: {0}")]
    Process(#[from] ProcessError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// Failed to decode an embedded image.
    #[error("failed to extract images: {0}")]
    ImageExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to the ticket store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open or initialize the database.
    #[error("failed to open database: {0}")]
    Open(String),

    /// Underlying SQLite failure.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Stored row could not be mapped back to a ticket.
    #[error("corrupt row: {0}")]
    CorruptRow(String),
}

/// Rejections surfaced by the processing pipeline.
///
/// These are caller-facing failures distinct from a stored-but-failed
/// ticket: when a `ProcessError` is returned, nothing was written.
#[derive(Error, Debug)]
pub enum ProcessError {
    /// A document with the same content fingerprint is already stored.
    #[error("ticket already exists (fingerprint {fingerprint})")]
    AlreadyExists { fingerprint: String },

    /// The requested ticket id does not exist.
    #[error("ticket not found (id {id})")]
    NotFound { id: i64 },

    /// Storage failed while committing the record.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for the fahrkarte library.
pub type Result<T> = std::result::Result<T, FahrkarteError>;
