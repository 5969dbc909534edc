//! Core library for travel ticket extraction.
//!
//! This crate provides:
//! - PDF processing (linear text and embedded page images)
//! - QR/barcode scanning with a ticket-payload noise filter
//! - Rule-based field extraction (mode, passenger, route, times, seats)
//! - Content-hash deduplication and local SQLite storage
//! - Push-based state containers for the ticket list and account session

pub mod account;
pub mod error;
pub mod feed;
pub mod fingerprint;
pub mod models;
pub mod pdf;
pub mod pipeline;
pub mod scan;
pub mod source;
pub mod store;
pub mod ticket;

pub use error::{FahrkarteError, PdfError, ProcessError, Result, StoreError};
pub use feed::{TicketFeed, TicketListSnapshot, TicketStats};
pub use fingerprint::fingerprint;
pub use models::{CalendarEvent, Ticket, TravelMode};
pub use pdf::PdfExtractor;
pub use pipeline::TicketProcessor;
pub use source::SourceRef;
pub use store::TicketStore;
pub use ticket::{TicketFields, TicketParser};
