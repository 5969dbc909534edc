//! Source byte references.
//!
//! A [`SourceRef`] is the opaque URI-like handle the pipeline processes:
//! either a bare filesystem path or a `file://` URI. Reading it is the one
//! fallible external call the pipeline wraps with its top-level failure
//! handler; everything downstream degrades instead of failing.

use std::fs;
use std::io;
use std::path::Path;

const FILE_SCHEME: &str = "file://";

/// Fallback display name when the reference has no usable last segment.
const UNKNOWN_FILE: &str = "unknown_file.pdf";

/// An opaque reference to a source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef(String);

impl SourceRef {
    /// Wrap a raw reference string (path or `file://` URI).
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Build a reference from a filesystem path.
    pub fn from_path(path: &Path) -> Self {
        Self(path.to_string_lossy().into_owned())
    }

    /// The raw reference string, as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display name derived from the reference: its last path segment,
    /// or a fixed fallback when the reference ends in a separator or is
    /// empty.
    pub fn display_name(&self) -> String {
        let trimmed = self.0.strip_prefix(FILE_SCHEME).unwrap_or(&self.0);
        trimmed
            .rsplit(['/', '\\'])
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_FILE)
            .to_string()
    }

    /// Resolve the reference and read the raw document bytes.
    pub fn read_bytes(&self) -> io::Result<Vec<u8>> {
        let path = self.0.strip_prefix(FILE_SCHEME).unwrap_or(&self.0);
        fs::read(path)
    }
}

impl std::fmt::Display for SourceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
