//! Ticket field parser: runs every rule extractor over the full text.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::models::TravelMode;

use super::rules::{
    extract_arrival_location, extract_arrival_time, extract_carriage_number,
    extract_departure_location, extract_departure_time, extract_passenger_name,
    extract_seat_number, extract_train_number, extract_travel_mode,
};

/// The partial field set recovered from one document's text.
///
/// Every field except the travel mode is independently optional;
/// missing fields are simply left absent.
#[derive(Debug, Clone, Default)]
pub struct TicketFields {
    pub passenger_name: Option<String>,
    pub travel_mode: TravelMode,
    pub departure_location: Option<String>,
    pub arrival_location: Option<String>,
    pub departure_time: Option<NaiveDateTime>,
    pub arrival_time: Option<NaiveDateTime>,
    pub train_number: Option<String>,
    pub seat_number: Option<String>,
    pub carriage_number: Option<String>,
}

/// Stateless field extraction engine.
pub struct TicketParser;

impl TicketParser {
    pub fn new() -> Self {
        Self
    }

    /// Run all extractors against the text. Extractors do not
    /// short-circuit each other; each one sees the full text.
    pub fn parse(&self, text: &str) -> TicketFields {
        let fields = TicketFields {
            passenger_name: extract_passenger_name(text),
            travel_mode: extract_travel_mode(text),
            departure_location: extract_departure_location(text),
            arrival_location: extract_arrival_location(text),
            departure_time: extract_departure_time(text),
            arrival_time: extract_arrival_time(text),
            train_number: extract_train_number(text),
            seat_number: extract_seat_number(text),
            carriage_number: extract_carriage_number(text),
        };

        debug!(
            "parsed {} characters: mode={}, route {:?} -> {:?}",
            text.len(),
            fields.travel_mode,
            fields.departure_location,
            fields.arrival_location
        );
        fields
    }
}

impl Default for TicketParser {
    fn default() -> Self {
        Self::new()
    }
}
