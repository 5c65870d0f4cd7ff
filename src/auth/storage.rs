use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// String key/value pairs persisted as one JSON object on disk.
pub struct KeyValueStorage {
    path: Option<PathBuf>,
    entries: Mutex<BTreeMap<String, String>>,
}

impl KeyValueStorage {
    /// Loads the file if it exists; a missing file is an empty storage.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read storage file {}", path.display()))?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw)
                    .with_context(|| format!("Storage file {} is not a JSON object of strings", path.display()))?
            }
        } else {
            BTreeMap::new()
        };

        log::debug!("Opened storage {} with {} keys", path.display(), entries.len());
        Ok(Self {
            path: Some(path),
            entries: Mutex::new(entries),
        })
    }

    /// Storage that never touches disk.
    pub fn memory() -> Self {
        Self {
            path: None,
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    pub fn set_item(&self, key: &str, value: impl Into<String>) -> Result<()> {
        let mut entries = self.lock();
        entries.insert(key.to_string(), value.into());
        self.flush(&entries)
    }

    pub fn remove_item(&self, key: &str) -> Result<()> {
        let mut entries = self.lock();
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let raw = serde_json::to_string_pretty(entries)?;
        fs::write(path, raw).with_context(|| format!("Failed to write storage file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file() -> PathBuf {
        std::env::temp_dir().join(format!("restsys-storage-{}.json", uuid::Uuid::new_v4().simple()))
    }

    #[test]
    fn test_values_survive_reopen() {
        let path = scratch_file();

        let storage = KeyValueStorage::open(&path).unwrap();
        assert!(storage.get_item("userData").is_none());
        storage.set_item("userData", r#"{"id":1}"#).unwrap();
        storage.set_item("theme", "dark").unwrap();
        storage.remove_item("theme").unwrap();

        let reopened = KeyValueStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item("userData").as_deref(), Some(r#"{"id":1}"#));
        assert!(reopened.get_item("theme").is_none());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = scratch_file();
        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(KeyValueStorage::open(&path).is_err());
        fs::remove_file(&path).unwrap();
    }
}
