//! Departure and arrival timestamp extraction.

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use super::patterns::{ARRIVAL_TIME_PATTERNS, DEPARTURE_TIME_PATTERNS};

/// Date-time formats tried in order against a captured token. Formats
/// carrying seconds come before their seconds-less variants so a longer
/// token never loses to a prefix format.
const DATE_TIME_FORMATS: &[&str] = &[
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Date-only fallbacks; the timestamp resolves to midnight.
const DATE_ONLY_FORMATS: &[&str] = &["%d.%m.%Y", "%Y-%m-%d"];

/// Extract the departure timestamp (anchors: "ab", "departure", "von").
pub fn extract_departure_time(text: &str) -> Option<NaiveDateTime> {
    extract_anchored_time(text, &DEPARTURE_TIME_PATTERNS)
}

/// Extract the arrival timestamp (anchors: "an", "arrival", "nach").
pub fn extract_arrival_time(text: &str) -> Option<NaiveDateTime> {
    extract_anchored_time(text, &ARRIVAL_TIME_PATTERNS)
}

/// For each anchor pattern in order, capture the adjacent date token and
/// try to parse it; the first anchor/format combination that succeeds
/// wins. No combination succeeding yields `None`, never an error.
fn extract_anchored_time(text: &str, patterns: &[Regex]) -> Option<NaiveDateTime> {
    for pattern in patterns {
        if let Some(caps) = pattern.captures(text) {
            if let Some(parsed) = parse_date_token(&caps[1]) {
                return Some(parsed);
            }
        }
    }
    None
}

/// Parse a captured token against the ordered format lists.
fn parse_date_token(token: &str) -> Option<NaiveDateTime> {
    for format in DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(token, format) {
            return Some(parsed);
        }
    }
    for format in DATE_ONLY_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(token, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, 0).unwrap()
    }

    #[test]
    fn departure_dotted_with_time() {
        assert_eq!(
            extract_departure_time("ab 15.12.2023 10:30"),
            Some(dt(2023, 12, 15, 10, 30))
        );
    }

    #[test]
    fn arrival_dotted_with_time() {
        assert_eq!(
            extract_arrival_time("an 15.12.2023 14:45"),
            Some(dt(2023, 12, 15, 14, 45))
        );
    }

    #[test]
    fn dotted_with_seconds() {
        assert_eq!(
            extract_departure_time("Departure: 01.02.2024 08:05:30"),
            Some(
                NaiveDate::from_ymd_opt(2024, 2, 1)
                    .unwrap()
                    .and_hms_opt(8, 5, 30)
                    .unwrap()
            )
        );
    }

    #[test]
    fn iso_variants() {
        assert_eq!(
            extract_departure_time("ab 2023-12-15 10:30"),
            Some(dt(2023, 12, 15, 10, 30))
        );
        assert_eq!(
            extract_arrival_time("arrival 2023-12-15T14:45"),
            Some(dt(2023, 12, 15, 14, 45))
        );
    }

    #[test]
    fn date_only_resolves_to_midnight() {
        assert_eq!(extract_departure_time("ab 15.12.2023"), Some(dt(2023, 12, 15, 0, 0)));
        assert_eq!(extract_arrival_time("an 2023-12-16"), Some(dt(2023, 12, 16, 0, 0)));
    }

    #[test]
    fn anchors_are_directional() {
        let text = "an 15.12.2023 14:45";
        assert_eq!(extract_departure_time(text), None);

        let text = "ab 15.12.2023 10:30";
        assert_eq!(extract_arrival_time(text), None);
    }

    #[test]
    fn unparseable_token_is_absent() {
        // Anchored but the day is out of range for every format.
        assert_eq!(extract_departure_time("ab 99.99.2023 10:30"), None);
        assert_eq!(extract_departure_time("kein datum"), None);
    }
}
