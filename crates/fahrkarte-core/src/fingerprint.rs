//! Content fingerprinting for document deduplication.

use sha2::{Digest, Sha256};

/// Compute the content fingerprint of a document: the lowercase hex
/// SHA-256 digest of its raw bytes.
///
/// Deterministic and total — the empty input yields the digest of the
/// empty byte string. The fingerprint is used purely as an equality key
/// for duplicate detection, never for security.
pub fn fingerprint(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}
