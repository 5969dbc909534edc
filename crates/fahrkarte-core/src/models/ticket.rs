//! Ticket data model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A processed (or failed-to-process) travel ticket.
///
/// One record is created per ingestion attempt. Exactly one of the two
/// terminal shapes holds: `is_processed` with no `error_message`, or
/// failed with an `error_message` — the [`Ticket::processed`] and
/// [`Ticket::failed`] constructors enforce the pairing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    /// Storage-assigned id; 0 until the record is persisted.
    #[serde(default)]
    pub id: i64,

    /// Display name of the source document.
    pub file_name: String,

    /// Opaque reference to the source document (path or URI).
    pub file_path: String,

    /// Hex SHA-256 fingerprint of the raw bytes; empty when the byte
    /// read failed.
    pub file_hash: String,

    /// Extracted passenger name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passenger_name: Option<String>,

    /// Travel mode; `Unknown` when no keyword matched.
    pub travel_mode: TravelMode,

    /// Departure location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_location: Option<String>,

    /// Arrival location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_location: Option<String>,

    /// Departure timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<NaiveDateTime>,

    /// Arrival timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<NaiveDateTime>,

    /// Carrier/train identifier (e.g. "ICE 1234").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub train_number: Option<String>,

    /// Seat identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seat_number: Option<String>,

    /// Carriage identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carriage_number: Option<String>,

    /// First validated barcode payload found in the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode_data: Option<String>,

    /// Full extracted text; the audit trail for re-deriving any field.
    /// Never mutated after assembly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,

    /// When this record was assembled.
    pub processed_at: NaiveDateTime,

    /// Whether extraction completed.
    pub is_processed: bool,

    /// Failure description; present exactly when `is_processed` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Ticket {
    /// Assemble a successfully processed record. All extracted fields
    /// start absent; the caller fills in what the extractors found.
    pub fn processed(
        file_name: impl Into<String>,
        file_path: impl Into<String>,
        file_hash: impl Into<String>,
        processed_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: 0,
            file_name: file_name.into(),
            file_path: file_path.into(),
            file_hash: file_hash.into(),
            passenger_name: None,
            travel_mode: TravelMode::Unknown,
            departure_location: None,
            arrival_location: None,
            departure_time: None,
            arrival_time: None,
            train_number: None,
            seat_number: None,
            carriage_number: None,
            barcode_data: None,
            raw_text: None,
            processed_at,
            is_processed: true,
            error_message: None,
        }
    }

    /// Assemble a failed record: empty fingerprint, no extracted fields,
    /// error message set.
    pub fn failed(
        file_name: impl Into<String>,
        file_path: impl Into<String>,
        error: impl Into<String>,
        processed_at: NaiveDateTime,
    ) -> Self {
        let mut ticket = Self::processed(file_name, file_path, "", processed_at);
        ticket.is_processed = false;
        ticket.error_message = Some(error.into());
        ticket
    }

    /// One-line route summary for display ("Berlin Hbf → München Hbf").
    pub fn route(&self) -> Option<String> {
        match (&self.departure_location, &self.arrival_location) {
            (Some(from), Some(to)) => Some(format!("{from} → {to}")),
            (Some(from), None) => Some(format!("{from} → ?")),
            (None, Some(to)) => Some(format!("? → {to}")),
            (None, None) => None,
        }
    }
}

/// Enumerated category of a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    Train,
    Bus,
    Flight,
    Ferry,
    Unknown,
}

impl TravelMode {
    /// Stable string form used for the storage column.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Train => "TRAIN",
            TravelMode::Bus => "BUS",
            TravelMode::Flight => "FLIGHT",
            TravelMode::Ferry => "FERRY",
            TravelMode::Unknown => "UNKNOWN",
        }
    }

    /// Parse the storage string form; anything unrecognized maps to
    /// `Unknown` rather than failing, so schema drift cannot make stored
    /// rows unreadable.
    pub fn from_str(s: &str) -> Self {
        match s {
            "TRAIN" => TravelMode::Train,
            "BUS" => TravelMode::Bus,
            "FLIGHT" => TravelMode::Flight,
            "FERRY" => TravelMode::Ferry,
            _ => TravelMode::Unknown,
        }
    }
}

impl Default for TravelMode {
    fn default() -> Self {
        Self::Unknown
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn now() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2023, 12, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn processed_record_has_no_error() {
        let ticket = Ticket::processed("a.pdf", "/t/a.pdf", "abc123", now());
        assert!(ticket.is_processed);
        assert_eq!(ticket.error_message, None);
        assert_eq!(ticket.id, 0);
    }

    #[test]
    fn failed_record_pairs_flag_and_message() {
        let ticket = Ticket::failed("a.pdf", "/t/a.pdf", "could not read file", now());
        assert!(!ticket.is_processed);
        assert_eq!(ticket.error_message.as_deref(), Some("could not read file"));
        assert_eq!(ticket.file_hash, "");
        assert_eq!(ticket.travel_mode, TravelMode::Unknown);
    }

    #[test]
    fn travel_mode_string_roundtrip() {
        for mode in [
            TravelMode::Train,
            TravelMode::Bus,
            TravelMode::Flight,
            TravelMode::Ferry,
            TravelMode::Unknown,
        ] {
            assert_eq!(TravelMode::from_str(mode.as_str()), mode);
        }
        assert_eq!(TravelMode::from_str("TRAM"), TravelMode::Unknown);
    }

    #[test]
    fn route_formats_partial_endpoints() {
        let mut ticket = Ticket::processed("a.pdf", "/t/a.pdf", "abc", now());
        assert_eq!(ticket.route(), None);
        ticket.departure_location = Some("Berlin Hbf".into());
        assert_eq!(ticket.route().unwrap(), "Berlin Hbf → ?");
        ticket.arrival_location = Some("München Hbf".into());
        assert_eq!(ticket.route().unwrap(), "Berlin Hbf → München Hbf");
    }
}
