//! Departure and arrival location extraction.
//!
//! The two directions use disjoint keyword sets and are extracted
//! independently — either may fail without affecting the other.

use super::patterns::{
    ARRIVAL_ARROW, ARRIVAL_PREPOSITION, DEPARTURE_PREPOSITION, DEPARTURE_STATION_SUFFIX,
};

/// Extract the departure location: directional preposition ("von",
/// "from", "ab") first, bare station-suffix pattern ("... Hbf") second.
pub fn extract_departure_location(text: &str) -> Option<String> {
    for pattern in [&*DEPARTURE_PREPOSITION, &*DEPARTURE_STATION_SUFFIX] {
        if let Some(caps) = pattern.captures(text) {
            return Some(caps[1].to_string());
        }
    }
    None
}

/// Extract the arrival location: directional preposition ("nach", "to")
/// first, arrow notation ("→ München") second.
pub fn extract_arrival_location(text: &str) -> Option<String> {
    for pattern in [&*ARRIVAL_PREPOSITION, &*ARRIVAL_ARROW] {
        if let Some(caps) = pattern.captures(text) {
            return Some(caps[1].to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn departure_from_preposition() {
        assert_eq!(
            extract_departure_location("von Berlin Hbf").as_deref(),
            Some("Berlin Hbf")
        );
        assert_eq!(
            extract_departure_location("from Munich Airport departing").as_deref(),
            Some("Munich Airport")
        );
    }

    #[test]
    fn departure_from_station_suffix() {
        assert_eq!(
            extract_departure_location("Abfahrt: Hamburg Hbf 10:30").as_deref(),
            Some("Hamburg")
        );
    }

    #[test]
    fn arrival_from_preposition() {
        assert_eq!(
            extract_arrival_location("nach München Hbf").as_deref(),
            Some("München Hbf")
        );
        assert_eq!(extract_arrival_location("nach Prague").as_deref(), Some("Prague"));
    }

    #[test]
    fn arrival_from_arrow() {
        assert_eq!(
            extract_arrival_location("Berlin → Leipzig").as_deref(),
            Some("Leipzig")
        );
    }

    #[test]
    fn directions_fail_independently() {
        assert_eq!(extract_departure_location("nach Kiel"), None);
        assert_eq!(extract_arrival_location("von Kiel"), None);
        assert_eq!(extract_departure_location("kein ort hier"), None);
    }
}
