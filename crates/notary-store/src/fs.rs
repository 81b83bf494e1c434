//! Filesystem-backed storage implementation.

use crate::{PutRequest, StorageKey, StorageReader, StorageSink, StoreError, StoredObject};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Suffix of the sidecar file that carries content type and tags.
const META_SUFFIX: &str = ".meta.json";

/// Options for filesystem writes.
#[derive(Debug, Clone, Default)]
pub struct FsOptions {
    /// Whether to fsync each object before it becomes visible (default: false).
    pub sync: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct ObjectMeta {
    content_type: String,
    #[serde(default)]
    tags: BTreeMap<String, String>,
}

/// Object store laid out as `<root>/<bucket>/<key>`.
///
/// Each body is written to a temporary file in the destination directory and
/// renamed into place, so readers never observe a partially written object.
/// Content type and tags live in a `<key>.meta.json` sidecar that is written
/// before the body.
#[derive(Debug, Clone)]
pub struct FsStorageSink {
    bucket: String,
    bucket_dir: PathBuf,
    sync: bool,
}

impl FsStorageSink {
    /// Opens (creating if needed) the bucket directory under `root`.
    pub fn open<P: AsRef<Path>>(
        root: P,
        bucket: impl Into<String>,
        options: FsOptions,
    ) -> Result<Self, StoreError> {
        let bucket = bucket.into();
        if bucket.is_empty() || bucket.contains('/') || bucket == "." || bucket == ".." {
            return Err(StoreError::InvalidKey(bucket));
        }
        let bucket_dir = root.as_ref().join(&bucket);
        fs::create_dir_all(&bucket_dir)?;
        Ok(Self {
            bucket,
            bucket_dir,
            sync: options.sync,
        })
    }

    /// Directory that holds the bucket's objects.
    pub fn bucket_dir(&self) -> &Path {
        &self.bucket_dir
    }

    fn object_path(&self, key: &StorageKey) -> PathBuf {
        key.segments()
            .fold(self.bucket_dir.clone(), |path, segment| path.join(segment))
    }

    fn meta_path(&self, key: &StorageKey) -> PathBuf {
        let mut path = self.object_path(key).into_os_string();
        path.push(META_SUFFIX);
        PathBuf::from(path)
    }

    fn write_atomically(&self, dest: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        let dir = dest
            .parent()
            .ok_or_else(|| StoreError::Other(format!("no parent for {}", dest.display())))?;
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(bytes)?;
        tmp.flush()?;
        if self.sync {
            tmp.as_file().sync_all()?;
        }
        tmp.persist(dest).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }

    fn collect_keys(&self, dir: &Path, prefix: &str, keys: &mut Vec<StorageKey>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            if entry.file_type()?.is_dir() {
                self.collect_keys(&path, prefix, keys)?;
                continue;
            }
            if name.ends_with(META_SUFFIX) {
                continue;
            }
            let Ok(relative) = path.strip_prefix(&self.bucket_dir) else {
                continue;
            };
            let text = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            if !text.starts_with(prefix) {
                continue;
            }
            if let Ok(key) = StorageKey::parse(text) {
                keys.push(key);
            }
        }
        Ok(())
    }
}

impl StorageSink for FsStorageSink {
    fn put(&self, request: &PutRequest) -> Result<(), StoreError> {
        if request.key.as_str().ends_with(META_SUFFIX) {
            return Err(StoreError::InvalidKey(request.key.to_string()));
        }
        let meta = ObjectMeta {
            content_type: request.content_type.clone(),
            tags: request.tags.clone(),
        };
        self.write_atomically(&self.meta_path(&request.key), &serde_json::to_vec(&meta)?)?;
        self.write_atomically(&self.object_path(&request.key), &request.body)?;
        tracing::debug!(
            bucket = %self.bucket,
            key = %request.key,
            bytes = request.body.len(),
            "object written"
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.bucket.clone()
    }
}

impl StorageReader for FsStorageSink {
    fn get(&self, key: &StorageKey) -> Result<Option<StoredObject>, StoreError> {
        let body = match fs::read(self.object_path(key)) {
            Ok(body) => body,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let meta = match fs::read(self.meta_path(key)) {
            Ok(bytes) => serde_json::from_slice::<ObjectMeta>(&bytes)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => ObjectMeta {
                content_type: "application/octet-stream".to_string(),
                tags: BTreeMap::new(),
            },
            Err(e) => return Err(e.into()),
        };
        Ok(Some(StoredObject {
            key: key.clone(),
            body,
            content_type: meta.content_type,
            tags: meta.tags,
        }))
    }

    fn list(&self, prefix: &str) -> Result<Vec<StorageKey>, StoreError> {
        let mut keys = Vec::new();
        self.collect_keys(&self.bucket_dir, prefix, &mut keys)?;
        keys.sort();
        Ok(keys)
    }
}
