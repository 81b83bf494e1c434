//! Object keys.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Slash-separated object key, e.g. `prod/tnt_acme/2025/01/31/<hash>.json`.
///
/// Keys are relative (no leading `/`), have no empty segments and never contain
/// a `.` or `..` segment, so they map onto a filesystem path without escaping
/// the bucket root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StorageKey(String);

impl StorageKey {
    /// Parses and validates a key.
    pub fn parse(value: impl Into<String>) -> Result<Self, StoreError> {
        let value = value.into();
        let valid = !value.is_empty()
            && !value.contains('\\')
            && value
                .split('/')
                .all(|segment| !segment.is_empty() && segment != "." && segment != "..");
        if !valid {
            return Err(StoreError::InvalidKey(value));
        }
        Ok(Self(value))
    }

    /// Builds a key from segments, validating the result.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = segments
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("/");
        Self::parse(joined)
    }

    /// Borrows the key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the slash-separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Final segment of the key.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl TryFrom<String> for StorageKey {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<StorageKey> for String {
    fn from(key: StorageKey) -> Self {
        key.0
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_traversal_and_empty_segments() {
        for bad in ["", "/abs/key", "a//b", "a/../b", "./a", "a/", "a\\b"] {
            assert!(StorageKey::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn exposes_segments_and_file_name() {
        let key = StorageKey::from_segments(["test", "tnt", "2025", "01", "02", "abc.json"]).unwrap();
        assert_eq!(key.as_str(), "test/tnt/2025/01/02/abc.json");
        assert_eq!(key.file_name(), "abc.json");
        assert_eq!(key.segments().count(), 6);
    }
}
