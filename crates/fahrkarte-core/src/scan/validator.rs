//! Barcode payload classification.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Base64 alphabet with optional `=` padding.
    static ref BASE64_PAYLOAD: Regex = Regex::new(r"^[A-Za-z0-9+/]+={0,2}$").unwrap();
}

/// Classify a decoded payload as ticket-like or noise.
///
/// This is a permissive noise filter, not an authenticity check; the
/// checks run in priority order and the first match accepts:
///
/// 1. known carrier prefix or carrier domain substring,
/// 2. URL,
/// 3. complete brace-delimited object (serialized structured data),
/// 4. base64-alphabet string longer than 20 characters,
/// 5. any string longer than 10 characters.
pub fn is_ticket_payload(payload: &str) -> bool {
    // Deutsche Bahn ticket formats
    if payload.starts_with("OTP") || payload.contains("bahn.de") {
        return true;
    }
    if payload.starts_with("http://") || payload.starts_with("https://") {
        return true;
    }
    if payload.starts_with('{') && payload.ends_with('}') {
        return true;
    }
    if BASE64_PAYLOAD.is_match(payload) && payload.len() > 20 {
        return true;
    }
    payload.len() > 10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_carrier_formats() {
        assert!(is_ticket_payload("OTP12"));
        assert!(is_ticket_payload("x bahn.de x"));
    }

    #[test]
    fn accepts_urls() {
        assert!(is_ticket_payload("https://t.co/x"));
        assert!(is_ticket_payload("http://a.b"));
    }

    #[test]
    fn accepts_json_objects() {
        assert!(is_ticket_payload(r#"{"t":"1"}"#));
    }

    #[test]
    fn accepts_long_base64() {
        assert!(is_ticket_payload("QWxsZXNHdXRlMTIzNDU2Nzg5MA=="));
        // base64 alphabet but too short for rule 4, too short for rule 5
        assert!(!is_ticket_payload("QWJj"));
    }

    #[test]
    fn accepts_any_moderately_long_string() {
        assert!(is_ticket_payload("ticket-0815-x"));
    }

    #[test]
    fn rejects_empty_and_short_noise() {
        assert!(!is_ticket_payload(""));
        assert!(!is_ticket_payload("ab cd"));
        assert!(!is_ticket_payload("x!"));
    }
}
