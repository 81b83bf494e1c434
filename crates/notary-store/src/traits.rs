//! Storage backend traits.

use crate::{StorageKey, StoreError};
use std::collections::BTreeMap;

/// Content type of every canonical record body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A single object write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutRequest {
    /// Destination key.
    pub key: StorageKey,
    /// Exact object body.
    pub body: Vec<u8>,
    /// MIME type recorded with the object.
    pub content_type: String,
    /// User metadata recorded with the object.
    pub tags: BTreeMap<String, String>,
}

impl PutRequest {
    /// Builds a JSON object write with no tags.
    pub fn json(key: StorageKey, body: Vec<u8>) -> Self {
        Self {
            key,
            body,
            content_type: JSON_CONTENT_TYPE.to_string(),
            tags: BTreeMap::new(),
        }
    }

    /// Adds one metadata tag.
    pub fn with_tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(name.into(), value.into());
        self
    }
}

/// An object as read back from a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Object key.
    pub key: StorageKey,
    /// Object body.
    pub body: Vec<u8>,
    /// Recorded MIME type.
    pub content_type: String,
    /// Recorded metadata tags.
    pub tags: BTreeMap<String, String>,
}

/// Durable object store addressed by key.
///
/// A put under an existing key replaces the object; callers rely on this for
/// idempotent re-submission of content-addressed records.
pub trait StorageSink: Send + Sync {
    /// Writes one object.
    fn put(&self, request: &PutRequest) -> Result<(), StoreError>;

    /// Human-readable backend location (bucket, directory) for logs.
    fn location(&self) -> String;
}

/// Read access to stored objects.
pub trait StorageReader {
    /// Fetches an object, or `None` if the key is absent.
    fn get(&self, key: &StorageKey) -> Result<Option<StoredObject>, StoreError>;

    /// Lists keys starting with `prefix`, in ascending order.
    fn list(&self, prefix: &str) -> Result<Vec<StorageKey>, StoreError>;
}

impl<S: StorageSink + ?Sized> StorageSink for std::sync::Arc<S> {
    fn put(&self, request: &PutRequest) -> Result<(), StoreError> {
        (**self).put(request)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}

impl<R: StorageReader + ?Sized> StorageReader for std::sync::Arc<R> {
    fn get(&self, key: &StorageKey) -> Result<Option<StoredObject>, StoreError> {
        (**self).get(key)
    }

    fn list(&self, prefix: &str) -> Result<Vec<StorageKey>, StoreError> {
        (**self).list(prefix)
    }
}
