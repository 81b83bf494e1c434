//! Pluggable object storage for canonical interaction records.
//!
//! This crate provides:
//! - `StorageSink` and `StorageReader` traits for keyed object storage
//! - `StorageKey`, a validated slash-separated object key
//! - A filesystem backend that treats a directory as a bucket
//! - An in-memory backend for tests and embedding
//!
//! Objects are write-once per content: the same key always receives the same
//! bytes, so overwriting is safe and re-submission is idempotent.

#![deny(missing_docs)]

/// Error types for store operations.
pub mod error;
/// Filesystem-backed storage implementation.
pub mod fs;
/// Object keys.
pub mod key;
/// In-memory storage implementation.
pub mod memory;
/// Storage backend traits.
pub mod traits;

pub use error::StoreError;
pub use fs::{FsOptions, FsStorageSink};
pub use key::StorageKey;
pub use memory::MemoryStorageSink;
pub use traits::{PutRequest, StorageReader, StorageSink, StoredObject, JSON_CONTENT_TYPE};
