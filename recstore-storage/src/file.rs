//! JSON-file backend.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::backend::{Backend, Entries, lock};
use crate::error::BackendError;

/// Backend persisted as a single JSON object of `key -> value` strings.
///
/// The file is read once at open and rewritten after every mutation. A
/// mutation whose rewrite fails is rolled back in memory.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    entries: Mutex<Entries>,
}

impl FileBackend {
    /// Opens the backend at `path`, starting empty if the file does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BackendError> {
        Self::open_with_quota(path, None)
    }

    /// Opens the backend with an optional byte quota.
    pub fn open_with_quota(
        path: impl AsRef<Path>,
        quota: Option<usize>,
    ) -> Result<Self, BackendError> {
        let path = path.as_ref().to_path_buf();
        let map: BTreeMap<String, String> = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), entries = map.len(), "opened file backend");
        Ok(Self {
            path,
            entries: Mutex::new(Entries::new(map, quota)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, map: &BTreeMap<String, String>) -> Result<(), BackendError> {
        let json = serde_json::to_string_pretty(map)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Backend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(lock(&self.entries)?.map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        let mut entries = lock(&self.entries)?;
        let previous = entries.map.get(key).cloned();
        entries.set(key, value)?;
        if let Err(e) = self.persist(&entries.map) {
            match previous {
                Some(old) => entries.set(key, &old)?,
                None => {
                    entries.remove(key);
                }
            }
            return Err(e);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        let mut entries = lock(&self.entries)?;
        let Some(old) = entries.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.persist(&entries.map) {
            entries.set(key, &old)?;
            return Err(e);
        }
        Ok(())
    }

    fn len(&self) -> usize {
        lock(&self.entries).map_or(0, |e| e.map.len())
    }

    fn key_at(&self, index: usize) -> Option<String> {
        lock(&self.entries).ok()?.key_at(index)
    }

    fn keys(&self) -> Vec<String> {
        lock(&self.entries).map_or_else(|_| Vec::new(), |e| e.map.keys().cloned().collect())
    }
}
