//! Canonical encoding primitives for notarized interaction records.
//!
//! Every byte that participates in hashing is produced here: the RFC 8785
//! canonicalizer, the SHA-256 content hash, and the identifier newtypes that
//! end up inside payloads and storage keys.
//!
#![deny(missing_docs)]

/// Canonicalization helpers for deterministic hashing.
pub mod canonicalizer;
/// Content hash primitives.
pub mod digest;
/// Validated identifier newtypes.
pub mod identifiers;
/// Validation helpers used by canonical types.
pub mod validation;

pub use canonicalizer::{
    canonicalize, CanonicalBytes, Canonicalizer, EncodingError, DEFAULT_MAX_DEPTH,
};
pub use digest::{hash, hash_bytes, ContentHash};
pub use identifiers::{TenantId, Timestamp};
pub use validation::ValidationError;
