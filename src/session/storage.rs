//! Persistent client storage backends for session entries.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{ApiError, Result};
use crate::fs::{bitebox_home, write_file_atomic};

/// Flat string key/value storage shared by every part of the client.
///
/// Batch operations are all-or-nothing: a concurrent reader observes either
/// none or all of the entries in a `write_all` / `remove_all` call.
pub trait SessionStorage: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>>;

    fn write_all(&self, entries: &[(&str, &str)]) -> Result<()>;

    /// Removing keys that are not present is a no-op.
    fn remove_all(&self, keys: &[&str]) -> Result<()>;
}

/// In-process storage, for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn write_all(&self, entries: &[(&str, &str)]) -> Result<()> {
        let mut map = self.entries.lock();
        for (key, value) in entries {
            map.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove_all(&self, keys: &[&str]) -> Result<()> {
        let mut map = self.entries.lock();
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }
}

/// JSON-object file storage. Every mutation rewrites the whole file atomically.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Storage at `$BITEBOX_HOME/session.json`.
    pub fn default_location() -> Self {
        Self::new(bitebox_home().join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(ApiError::Storage(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )));
            }
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            ApiError::Storage(format!("corrupt session file {}: {e}", self.path.display()))
        })
    }

    fn store(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if map.is_empty() {
            return match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(ApiError::Storage(format!(
                    "failed to remove {}: {e}",
                    self.path.display()
                ))),
            };
        }
        let content = serde_json::to_string_pretty(map)?;
        write_file_atomic(&self.path, &content)
    }
}

impl SessionStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn write_all(&self, entries: &[(&str, &str)]) -> Result<()> {
        let _guard = self.lock.lock();
        let mut map = self.load()?;
        for (key, value) in entries {
            map.insert((*key).to_string(), (*value).to_string());
        }
        self.store(&map)
    }

    fn remove_all(&self, keys: &[&str]) -> Result<()> {
        let _guard = self.lock.lock();
        let mut map = self.load()?;
        let before = map.len();
        for key in keys {
            map.remove(*key);
        }
        if map.len() == before {
            return Ok(());
        }
        self.store(&map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage_batch_ops() {
        let storage = MemoryStorage::new();
        storage
            .write_all(&[("token", "abc"), ("user", "{}")])
            .unwrap();
        assert_eq!(storage.read("token").unwrap().as_deref(), Some("abc"));
        assert_eq!(storage.len(), 2);

        storage.remove_all(&["token", "user"]).unwrap();
        assert!(storage.is_empty());

        // Removing again is a no-op
        storage.remove_all(&["token", "user"]).unwrap();
    }

    #[test]
    fn test_file_storage_missing_file_reads_none() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path().join("session.json"));
        assert_eq!(storage.read("token").unwrap(), None);
        storage.remove_all(&["token"]).unwrap();
    }

    #[test]
    fn test_file_storage_persists_across_instances() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("session.json");

        FileStorage::new(&path)
            .write_all(&[("token", "abc"), ("user", r#"{"id":1}"#)])
            .unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.read("token").unwrap().as_deref(), Some("abc"));
        assert_eq!(
            reopened.read("user").unwrap().as_deref(),
            Some(r#"{"id":1}"#)
        );
    }

    #[test]
    fn test_file_storage_remove_all_deletes_empty_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("session.json");
        let storage = FileStorage::new(&path);

        storage.write_all(&[("token", "a"), ("user", "b")]).unwrap();
        storage.remove_all(&["token", "user"]).unwrap();

        assert!(!path.exists());
        assert_eq!(storage.read("user").unwrap(), None);
    }

    #[test]
    fn test_file_storage_keeps_unrelated_keys() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path().join("session.json"));

        storage
            .write_all(&[("token", "a"), ("user", "b"), ("cart", "[]")])
            .unwrap();
        storage.remove_all(&["token", "user"]).unwrap();

        assert_eq!(storage.read("cart").unwrap().as_deref(), Some("[]"));
        assert_eq!(storage.read("token").unwrap(), None);
    }

    #[test]
    fn test_file_storage_corrupt_file_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let err = FileStorage::new(&path).read("token").unwrap_err();
        assert!(matches!(err, ApiError::Storage(_)));
    }
}
