use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::KeyValueStore;
use crate::error::StoreError;
use crate::log_warn;

const ENABLE_LOGS: bool = true;

/// All keys in one pretty-printed JSON object, rewritten on every mutation.
///
/// An unreadable or malformed file opens as an empty store; the next write
/// replaces it.
pub struct JsonFileStore {
    path: PathBuf,
    data: RwLock<BTreeMap<String, String>>,
}

impl JsonFileStore {
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
                    log_warn!("Ignoring malformed store {}: {}", path.display(), err);
                    BTreeMap::new()
                }),
                Err(err) => {
                    log_warn!("Failed to read store {}: {}", path.display(), err);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, String>> {
        match self.data.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, String>> {
        match self.data.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn persist(&self, data: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut guard = self.write();
        guard.insert(key.to_string(), value.to_string());
        self.persist(&guard)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut guard = self.write();
        if guard.remove(key).is_some() {
            self.persist(&guard)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");

        let store = JsonFileStore::open(path.clone()).unwrap();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.remove("a").unwrap();
        drop(store);

        let reopened = JsonFileStore::open(path).unwrap();
        assert_eq!(reopened.get("a").unwrap(), None);
        assert_eq!(reopened.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn malformed_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::open(path.clone()).unwrap();
        assert_eq!(store.get("anything").unwrap(), None);

        store.set("k", "v").unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"k\""));
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("store.json");
        let store = JsonFileStore::open(path.clone()).unwrap();
        store.set("k", "v").unwrap();
        assert!(path.exists());
    }
}
