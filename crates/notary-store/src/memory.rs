//! In-memory storage backend.

use crate::{PutRequest, StorageKey, StorageReader, StorageSink, StoreError, StoredObject};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Process-local object store backed by an ordered map.
#[derive(Debug, Default)]
pub struct MemoryStorageSink {
    name: String,
    objects: Mutex<BTreeMap<StorageKey, StoredObject>>,
}

impl MemoryStorageSink {
    /// Creates an empty store labelled `name` in logs.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Mutex::new(BTreeMap::new()),
        }
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.lock().map(|objects| objects.len()).unwrap_or(0)
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<StorageKey, StoredObject>>, StoreError> {
        self.objects
            .lock()
            .map_err(|_| StoreError::Other("memory store lock poisoned".to_string()))
    }
}

impl StorageSink for MemoryStorageSink {
    fn put(&self, request: &PutRequest) -> Result<(), StoreError> {
        let object = StoredObject {
            key: request.key.clone(),
            body: request.body.clone(),
            content_type: request.content_type.clone(),
            tags: request.tags.clone(),
        };
        self.lock()?.insert(request.key.clone(), object);
        Ok(())
    }

    fn location(&self) -> String {
        format!("memory://{}", self.name)
    }
}

impl StorageReader for MemoryStorageSink {
    fn get(&self, key: &StorageKey) -> Result<Option<StoredObject>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn list(&self, prefix: &str) -> Result<Vec<StorageKey>, StoreError> {
        Ok(self
            .lock()?
            .keys()
            .filter(|key| key.as_str().starts_with(prefix))
            .cloned()
            .collect())
    }
}
