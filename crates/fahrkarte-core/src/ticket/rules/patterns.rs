//! Regex patterns and keyword tables for ticket field extraction.
//!
//! Pattern lists are ordered by confidence: labeled, language-specific
//! patterns come before generic fallbacks, and the first pattern that
//! matches anywhere in the text wins.

use lazy_static::lazy_static;
use regex::Regex;

/// A date or date-time token: day-first dotted or ISO, with an optional
/// time part.
pub const DATE_TOKEN: &str = r"(?:[0-9]{1,2}\.[0-9]{1,2}\.[0-9]{2,4}(?:\s+[0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?)?|[0-9]{4}-[0-9]{2}-[0-9]{2}(?:[T\s][0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?)?)";

lazy_static! {
    // Passenger name: labeled patterns first, bare capitalized bigram last.
    pub static ref PASSENGER_LABELED: Regex = Regex::new(
        r"\b(?i:Passagier|Passenger|Name)\b\s*:?\s*([A-ZÄÖÜ][a-zäöüß]+\s+[A-ZÄÖÜ][a-zäöüß]+)"
    ).unwrap();

    pub static ref PASSENGER_FAHRGAST: Regex = Regex::new(
        r"\b(?i:Fahrgast|Reisender)\b\s*:?\s*([A-ZÄÖÜ][a-zäöüß]+\s+[A-ZÄÖÜ][a-zäöüß]+)"
    ).unwrap();

    pub static ref PASSENGER_BARE: Regex = Regex::new(
        r"\b([A-ZÄÖÜ][a-zäöüß]+\s+[A-ZÄÖÜ][a-zäöüß]+)\b"
    ).unwrap();

    // Departure location: directional preposition, then station suffix.
    pub static ref DEPARTURE_PREPOSITION: Regex = Regex::new(
        r"\b(?i:von|from|ab)\s+([A-ZÄÖÜ][a-zäöüß]+(?:\s+[A-ZÄÖÜ][a-zäöüß]+)*)"
    ).unwrap();

    pub static ref DEPARTURE_STATION_SUFFIX: Regex = Regex::new(
        r"([A-ZÄÖÜ][a-zäöüß]+(?:\s+[A-ZÄÖÜ][a-zäöüß]+)*)\s*(?:Hbf|Hauptbahnhof|Airport|Flughafen)"
    ).unwrap();

    // Arrival location: disjoint keyword set from departure.
    pub static ref ARRIVAL_PREPOSITION: Regex = Regex::new(
        r"\b(?i:nach|to)\s+([A-ZÄÖÜ][a-zäöüß]+(?:\s+[A-ZÄÖÜ][a-zäöüß]+)*)"
    ).unwrap();

    pub static ref ARRIVAL_ARROW: Regex = Regex::new(
        r"→\s*([A-ZÄÖÜ][a-zäöüß]+(?:\s+[A-ZÄÖÜ][a-zäöüß]+)*)"
    ).unwrap();

    // Carrier/train identifier: known carrier-class prefixes, then a
    // generic uppercase-letters-plus-digits token.
    pub static ref TRAIN_NUMBER: Regex = Regex::new(
        r"(?:ICE|IC|EC|RE|RB|S\d+)\s*\d+|\b[A-Z]{2,4}\s*\d+\b"
    ).unwrap();

    pub static ref SEAT_NUMBER: Regex = Regex::new(
        r"(?:Sitzplatz|Platz|Seat)\s*[:\s]*([A-Z]\d+|\d+[A-Z]|\d+)"
    ).unwrap();

    pub static ref CARRIAGE_NUMBER: Regex = Regex::new(
        r"(?:Wagen|Carriage|Coach)\s*[:\s]*(\d+)"
    ).unwrap();

    /// Departure timestamp anchors, one compiled pattern per keyword, in
    /// priority order.
    pub static ref DEPARTURE_TIME_PATTERNS: Vec<Regex> =
        anchored_date_patterns(&["ab", "departure", "von"]);

    /// Arrival timestamp anchors; disjoint from the departure set.
    pub static ref ARRIVAL_TIME_PATTERNS: Vec<Regex> =
        anchored_date_patterns(&["an", "arrival", "nach"]);
}

/// Travel-mode keyword tables, checked case-insensitively as substrings.
/// Priority order: train before bus before flight before ferry.
pub const TRAIN_KEYWORDS: &[&str] = &["zug", "train", "bahn", "hbf", "gleis"];
pub const BUS_KEYWORDS: &[&str] = &["bus"];
pub const FLIGHT_KEYWORDS: &[&str] = &["flug", "flight"];
pub const FERRY_KEYWORDS: &[&str] = &["fähre", "faehre", "ferry"];

fn anchored_date_patterns(keywords: &[&str]) -> Vec<Regex> {
    keywords
        .iter()
        .map(|kw| {
            Regex::new(&format!(r"\b(?i:{kw})\b[\s:]*({DATE_TOKEN})"))
                .expect("anchored date pattern must compile")
        })
        .collect()
}
