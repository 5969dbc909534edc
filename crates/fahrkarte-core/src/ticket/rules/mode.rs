//! Travel mode classification.

use crate::models::TravelMode;

use super::patterns::{BUS_KEYWORDS, FERRY_KEYWORDS, FLIGHT_KEYWORDS, TRAIN_KEYWORDS};

/// Classify the travel mode by case-insensitive keyword search.
///
/// Modes are checked in a fixed priority order (train, bus, flight,
/// ferry); the first mode with any matching keyword wins, and no match
/// yields `Unknown` — the mode is never left unset.
pub fn extract_travel_mode(text: &str) -> TravelMode {
    let lower = text.to_lowercase();

    let contains_any = |keywords: &[&str]| keywords.iter().any(|kw| lower.contains(kw));

    if contains_any(TRAIN_KEYWORDS) {
        TravelMode::Train
    } else if contains_any(BUS_KEYWORDS) {
        TravelMode::Bus
    } else if contains_any(FLIGHT_KEYWORDS) {
        TravelMode::Flight
    } else if contains_any(FERRY_KEYWORDS) {
        TravelMode::Ferry
    } else {
        TravelMode::Unknown
    }
}
