//! Record persistence on top of a [`Backend`].

use recstore_model::{ModelRegistry, ModelSchema, Record, RecordState};
use recstore_types::{KeyCodec, KeyMatch, RecordId};
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::backend::Backend;
use crate::builder::build_record;
use crate::codec;
use crate::error::{StorageError, StorageResult};

/// Saves, deletes and finds records of registered models.
///
/// The store holds no state between calls beyond its collaborators: every
/// operation goes straight to the backend. Each public operation has a
/// `try_*` twin returning the typed error; the plain form collapses
/// single-entity failures to `false` / `None` and logs them.
pub struct Store<B: Backend> {
    backend: B,
    codec: KeyCodec,
    registry: Arc<ModelRegistry>,
}

impl<B: Backend> Store<B> {
    /// Creates a store, rejecting registered model names that would make
    /// keys ambiguous.
    pub fn new(backend: B, codec: KeyCodec, registry: Arc<ModelRegistry>) -> StorageResult<Self> {
        for model in registry.models() {
            KeyCodec::validate_model_name(model)?;
        }
        Ok(Self {
            backend,
            codec,
            registry,
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn codec(&self) -> &KeyCodec {
        &self.codec
    }

    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    fn schema(&self, model: &str) -> StorageResult<&ModelSchema> {
        self.registry
            .schema(model)
            .ok_or_else(|| StorageError::UnknownModel(model.to_string()))
    }

    // ── save ─────────────────────────────────────────────────────

    /// Writes `record` under its key. Returns `false` on any failure.
    pub fn save(&self, record: &Record) -> bool {
        match self.try_save(record) {
            Ok(_) => true,
            Err(e) => {
                warn!(model = %record.model, id = ?record.id, error = %e, "failed to save record");
                false
            }
        }
    }

    /// Writes `record` under its key and returns the key.
    pub fn try_save(&self, record: &Record) -> StorageResult<String> {
        self.schema(&record.model)?;
        let id = record
            .id
            .ok_or_else(|| StorageError::MissingId(record.model.clone()))?;

        if let Some(handler) = self.registry.handler(&record.model) {
            handler
                .validate(record)
                .map_err(|reason| StorageError::Rejected {
                    model: record.model.clone(),
                    reason,
                })?;
        }

        let key = self.codec.build_key(&record.model, id);
        let payload = codec::encode(record)?;
        self.backend.set(&key, &payload)?;
        self.registry.track(&record.model, id);
        debug!(key = %key, "saved record");
        Ok(key)
    }

    // ── delete ───────────────────────────────────────────────────

    /// Removes the record `(model, id)` and drops its id from the registry
    /// cache. Returns `false` if it did not exist or the backend failed.
    pub fn delete(&self, model: &str, id: RecordId) -> bool {
        match self.try_delete(model, id) {
            Ok(()) => true,
            Err(StorageError::KeyNotFound(key)) => {
                debug!(key = %key, "nothing to delete");
                false
            }
            Err(e) => {
                warn!(model = %model, id = %id, error = %e, "failed to delete record");
                false
            }
        }
    }

    pub fn try_delete(&self, model: &str, id: RecordId) -> StorageResult<()> {
        self.schema(model)?;
        let key = self.codec.build_key(model, id);
        if self.backend.get(&key)?.is_none() {
            return Err(StorageError::KeyNotFound(key));
        }
        self.backend.remove(&key)?;
        self.registry.forget(model, id);
        debug!(key = %key, "deleted record");
        Ok(())
    }

    // ── find ─────────────────────────────────────────────────────

    /// Loads one record by full key or bare id.
    ///
    /// Missing keys, absent entries, malformed keys and backend read
    /// failures yield `Ok(None)`. A corrupt payload or an unregistered
    /// model is an error.
    pub fn find_by_key(
        &self,
        model: &str,
        key_or_id: Option<&str>,
    ) -> StorageResult<Option<Record>> {
        let Some(key_or_id) = key_or_id.filter(|k| !k.is_empty()) else {
            warn!(model = %model, "find by key called without a key");
            return Ok(None);
        };

        match self.try_find_by_key(model, key_or_id) {
            Ok(record) => Ok(Some(record)),
            Err(e @ (StorageError::Decode(_) | StorageError::UnknownModel(_))) => Err(e),
            Err(StorageError::KeyNotFound(key)) => {
                debug!(key = %key, "no record under key");
                Ok(None)
            }
            Err(StorageError::MalformedKey(key)) => {
                error!(key = %key, model = %model, "key has no valid record id");
                Ok(None)
            }
            Err(e) => {
                warn!(model = %model, key = %key_or_id, error = %e, "failed to load record");
                Ok(None)
            }
        }
    }

    pub fn try_find_by_key(&self, model: &str, key_or_id: &str) -> StorageResult<Record> {
        let schema = self.schema(model)?;
        let key = if self.codec.looks_like_full_key(key_or_id) {
            key_or_id.to_string()
        } else {
            format!("{}{key_or_id}", self.codec.model_prefix(model))
        };
        let id = self
            .codec
            .parse_key(&key, model)
            .ok_or_else(|| StorageError::MalformedKey(key.clone()))?;
        let raw = self
            .backend
            .get(&key)?
            .ok_or(StorageError::KeyNotFound(key))?;
        self.load(model, schema, id, &raw)
    }

    /// Loads every record of `model`, in backend enumeration order.
    ///
    /// Entries whose id segment does not parse are logged and skipped. A
    /// corrupt payload aborts the scan.
    pub fn find_all(&self, model: &str) -> StorageResult<Vec<Record>> {
        let schema = self.schema(model)?;
        let mut records = Vec::new();
        for (key, id) in self.scan(model) {
            let raw = match self.backend.get(&key) {
                Ok(Some(raw)) => raw,
                Ok(None) => {
                    debug!(key = %key, "entry vanished during scan");
                    continue;
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "failed to read entry during scan");
                    continue;
                }
            };
            records.push(self.load(model, schema, id, &raw)?);
        }
        Ok(records)
    }

    /// Keys of every well-formed entry of `model`.
    pub fn all_keys(&self, model: &str) -> Vec<String> {
        self.scan(model).into_iter().map(|(key, _)| key).collect()
    }

    /// Number of well-formed entries of `model`.
    pub fn count(&self, model: &str) -> usize {
        self.scan(model).len()
    }

    /// Removes every well-formed entry of `model`. Returns how many were
    /// removed.
    pub fn delete_all(&self, model: &str) -> usize {
        let mut removed = 0;
        for (key, id) in self.scan(model) {
            match self.backend.remove(&key) {
                Ok(()) => {
                    self.registry.forget(model, id);
                    removed += 1;
                }
                Err(e) => warn!(key = %key, error = %e, "failed to remove entry"),
            }
        }
        removed
    }

    fn scan(&self, model: &str) -> Vec<(String, RecordId)> {
        let mut matches = Vec::new();
        for key in self.backend.keys() {
            match self.codec.classify(&key, model) {
                KeyMatch::Foreign => {}
                KeyMatch::Malformed => {
                    error!(key = %key, model = %model, "skipping entry with malformed record id");
                }
                KeyMatch::Record(id) => matches.push((key, id)),
            }
        }
        matches
    }

    fn load(
        &self,
        model: &str,
        schema: &ModelSchema,
        id: RecordId,
        raw: &str,
    ) -> StorageResult<Record> {
        let fields = build_record(raw, schema)?;
        let mut record = self
            .registry
            .instantiate(model, fields, id, RecordState::Valid);
        if let Some(handler) = self.registry.handler(model) {
            handler.on_after_load(&mut record);
        }
        Ok(record)
    }
}
