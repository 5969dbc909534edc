//! Passenger name extraction.

use super::patterns::{PASSENGER_BARE, PASSENGER_FAHRGAST, PASSENGER_LABELED};

/// Extract the passenger name: the capture of the first pattern in the
/// ordered list that matches anywhere in the text. Labeled patterns are
/// tried before the generic capitalized-bigram fallback.
pub fn extract_passenger_name(text: &str) -> Option<String> {
    for pattern in [&*PASSENGER_LABELED, &*PASSENGER_FAHRGAST, &*PASSENGER_BARE] {
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
    fn labeled_german() {
        assert_eq!(
            extract_passenger_name("Passagier: Max Mustermann").as_deref(),
            Some("Max Mustermann")
        );
        assert_eq!(
            extract_passenger_name("Fahrgast Erika Musterfrau").as_deref(),
            Some("Erika Musterfrau")
        );
    }

    #[test]
    fn labeled_english() {
        assert_eq!(
            extract_passenger_name("Passenger: John Smith").as_deref(),
            Some("John Smith")
        );
    }

    #[test]
    fn label_beats_earlier_bare_bigram() {
        // The bare bigram "Deutsche Bahn" comes first in the text, but the
        // labeled pattern ranks higher.
        let text = "Deutsche Bahn\nPassagier: Max Mustermann";
        assert_eq!(extract_passenger_name(text).as_deref(), Some("Max Mustermann"));
    }

    #[test]
    fn generic_bigram_fallback() {
        assert_eq!(
            extract_passenger_name("Buchung für Anna Schmidt bestätigt").as_deref(),
            Some("Anna Schmidt")
        );
    }

    #[test]
    fn no_candidate() {
        assert_eq!(extract_passenger_name("ticket 0815 ohne namen"), None);
    }
}
