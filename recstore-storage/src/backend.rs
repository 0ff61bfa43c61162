//! The key-value backend contract and the in-memory backend.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::BackendError;

/// A flat, string-keyed store with indexed key enumeration.
///
/// Enumeration through [`len`](Backend::len) and [`key_at`](Backend::key_at)
/// must be stable for the duration of a single scan when no writes happen
/// in between; no ordering is promised across calls.
pub trait Backend: Send + Sync {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, BackendError>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), BackendError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), BackendError>;

    /// Number of entries.
    fn len(&self) -> usize;

    /// The key at enumeration position `index`.
    fn key_at(&self, index: usize) -> Option<String>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every key, in enumeration order.
    fn keys(&self) -> Vec<String> {
        (0..self.len()).filter_map(|i| self.key_at(i)).collect()
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        (**self).remove(key)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn key_at(&self, index: usize) -> Option<String> {
        (**self).key_at(index)
    }

    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }
}

/// Entries kept in key order, with an optional byte quota.
#[derive(Debug, Default)]
pub(crate) struct Entries {
    pub(crate) map: BTreeMap<String, String>,
    quota: Option<usize>,
    used: usize,
}

impl Entries {
    pub(crate) fn new(map: BTreeMap<String, String>, quota: Option<usize>) -> Self {
        let used = map.iter().map(|(k, v)| k.len() + v.len()).sum();
        Self { map, quota, used }
    }

    pub(crate) fn set(&mut self, key: &str, value: &str) -> Result<(), BackendError> {
        let previous = self.map.get(key).map_or(0, |v| key.len() + v.len());
        let used = self.used - previous + key.len() + value.len();
        if let Some(limit) = self.quota
            && used > limit
        {
            return Err(BackendError::QuotaExceeded {
                key: key.to_string(),
                limit,
            });
        }
        self.map.insert(key.to_string(), value.to_string());
        self.used = used;
        Ok(())
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<String> {
        let removed = self.map.remove(key);
        if let Some(v) = &removed {
            self.used -= key.len() + v.len();
        }
        removed
    }

    pub(crate) fn key_at(&self, index: usize) -> Option<String> {
        self.map.keys().nth(index).cloned()
    }

    pub(crate) fn used(&self) -> usize {
        self.used
    }
}

pub(crate) fn lock<'a, T>(mutex: &'a Mutex<T>) -> Result<MutexGuard<'a, T>, BackendError> {
    mutex
        .lock()
        .map_err(|e| BackendError::Unavailable(format!("lock poisoned: {e}")))
}

/// Process-local backend, modelled on browser local storage.
///
/// With a quota, writes that would push the summed key and value lengths
/// past the limit fail with [`BackendError::QuotaExceeded`].
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<Entries>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that refuses writes beyond `limit` bytes.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            entries: Mutex::new(Entries::new(BTreeMap::new(), Some(limit))),
        }
    }

    /// Bytes currently used by keys and values.
    pub fn used_bytes(&self) -> usize {
        lock(&self.entries).map_or(0, |e| e.used())
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(lock(&self.entries)?.map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        lock(&self.entries)?.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        lock(&self.entries)?.remove(key);
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
