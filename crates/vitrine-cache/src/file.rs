//! JSON file backed store for native hosts.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{CacheError, KvStore};

/// Key-value store persisted as a single JSON object on disk.
///
/// Every write rewrites the whole file. Values must be UTF-8, which holds for
/// everything [`crate::Cache`] writes.
///
/// A file that is not a JSON object fails reads with
/// [`CacheError::SerializeError`]; the next `set` or `delete` replaces it.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open (lazily) the store at `path`. The file is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, CacheError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| {
            CacheError::OpenError(format!("{}: {}", self.path.display(), e))
        })?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Current entries for a write, starting over when the file is unparseable.
    fn entries_for_write(&self) -> Result<BTreeMap<String, String>, CacheError> {
        match self.read_all() {
            Err(CacheError::SerializeError(_)) => Ok(BTreeMap::new()),
            other => other,
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| CacheError::StoreError(format!("{}: {}", parent.display(), e)))?;
            }
        }
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content)
            .map_err(|e| CacheError::StoreError(format!("{}: {}", self.path.display(), e)))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.read_all()?.remove(key).map(String::into_bytes))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let value = String::from_utf8(value.to_vec())
            .map_err(|e| CacheError::StoreError(format!("value for {} is not UTF-8: {}", key, e)))?;
        let mut entries = self.entries_for_write()?;
        entries.insert(key.to_string(), value);
        self.write_all(&entries)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = match self.read_all() {
            Err(CacheError::SerializeError(_)) => return self.write_all(&BTreeMap::new()),
            other => other?,
        };
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}
