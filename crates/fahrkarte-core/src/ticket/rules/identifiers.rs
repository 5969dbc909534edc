//! Train, seat and carriage identifier extraction.

use super::patterns::{CARRIAGE_NUMBER, SEAT_NUMBER, TRAIN_NUMBER};

/// Extract the carrier/train identifier: a known carrier-class prefix
/// followed by digits ("ICE 1234"), or a generic short uppercase token
/// plus digits. The whole match is the identifier.
pub fn extract_train_number(text: &str) -> Option<String> {
    TRAIN_NUMBER.find(text).map(|m| m.as_str().to_string())
}

/// Extract the seat identifier after a seat label: letter-digit,
/// digit-letter, or bare digits.
pub fn extract_seat_number(text: &str) -> Option<String> {
    SEAT_NUMBER.captures(text).map(|caps| caps[1].to_string())
}

/// Extract the carriage identifier: digits after a carriage/wagon/coach
/// label.
pub fn extract_carriage_number(text: &str) -> Option<String> {
    CARRIAGE_NUMBER.captures(text).map(|caps| caps[1].to_string())
}
