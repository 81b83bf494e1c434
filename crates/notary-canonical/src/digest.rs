use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest as Sha2Digest, Sha256};
use std::fmt;

use crate::canonicalizer::CanonicalBytes;
use crate::validation::ValidationError;

/// Lowercase hex SHA-256 digest of canonical bytes (64 characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    /// Parses a validated digest from its hex rendering.
    pub fn parse(hex: impl Into<String>) -> Result<Self, ValidationError> {
        let hex = hex.into();
        let re = Regex::new(r"^[0-9a-f]{64}$").expect("invalid regex");
        if !re.is_match(&hex) {
            return Err(ValidationError::PatternMismatch {
                field: "content_hash",
                value: hex,
            });
        }
        Ok(ContentHash(hex))
    }

    /// Hex rendering.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hashes canonical bytes.
///
/// Formula: `hex(sha256(canonical_bytes))`, no salt and no domain separator, so
/// any party holding the stored object can recompute the notarized value.
pub fn hash(bytes: &CanonicalBytes) -> ContentHash {
    hash_bytes(bytes.as_bytes())
}

/// Hashes an arbitrary byte slice.
pub fn hash_bytes(bytes: &[u8]) -> ContentHash {
    ContentHash(hex::encode(Sha256::digest(bytes)))
}
