//! Model registry: schema lookup, record factory, and the in-memory id cache.

use recstore_types::RecordId;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{ModelSchema, Record, RecordHandler, RecordState, Value};

struct ModelEntry {
    schema: ModelSchema,
    handler: Option<Arc<dyn RecordHandler>>,
}

/// Ids known to be live for one model, plus the next id to hand out.
#[derive(Debug)]
struct IdCache {
    next: RecordId,
    cached: BTreeSet<RecordId>,
}

impl Default for IdCache {
    fn default() -> Self {
        Self {
            next: RecordId::new(1),
            cached: BTreeSet::new(),
        }
    }
}

impl IdCache {
    fn track(&mut self, id: RecordId) {
        if id >= self.next {
            self.next = id.next();
        }
        self.cached.insert(id);
    }
}

/// Per-model schemas and handlers, with the id bookkeeping callers need.
///
/// Schemas are registered up front (`&mut self`); the id cache uses interior
/// mutability so a registry can be shared behind an `Arc` by the store.
#[derive(Default)]
pub struct ModelRegistry {
    models: HashMap<String, ModelEntry>,
    ids: Mutex<HashMap<String, IdCache>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema, returning the one it replaces.
    pub fn register(&mut self, schema: ModelSchema) -> Option<ModelSchema> {
        self.insert(schema, None)
    }

    /// Registers a schema together with its record handler.
    pub fn register_with_handler(
        &mut self,
        schema: ModelSchema,
        handler: Arc<dyn RecordHandler>,
    ) -> Option<ModelSchema> {
        self.insert(schema, Some(handler))
    }

    fn insert(
        &mut self,
        schema: ModelSchema,
        handler: Option<Arc<dyn RecordHandler>>,
    ) -> Option<ModelSchema> {
        self.models
            .insert(schema.model.clone(), ModelEntry { schema, handler })
            .map(|old| old.schema)
    }

    pub fn schema(&self, model: &str) -> Option<&ModelSchema> {
        self.models.get(model).map(|e| &e.schema)
    }

    pub fn handler(&self, model: &str) -> Option<&Arc<dyn RecordHandler>> {
        self.models.get(model).and_then(|e| e.handler.as_ref())
    }

    /// Names of all registered models, in no particular order.
    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    /// Creates an empty record of `model` with a freshly allocated id.
    ///
    /// Returns `None` if the model is not registered.
    pub fn create_record(&self, model: &str) -> Option<Record> {
        self.schema(model)?;
        let mut ids = self.lock_ids();
        let cache = ids.entry(model.to_string()).or_default();
        let id = cache.next;
        cache.track(id);
        Some(Record::new(model).with_id(id))
    }

    /// Builds a record wrapper around loaded fields and caches its id.
    pub fn instantiate(
        &self,
        model: &str,
        fields: BTreeMap<String, Value>,
        id: RecordId,
        state: RecordState,
    ) -> Record {
        self.track(model, id);
        Record {
            model: model.to_string(),
            id: Some(id),
            state,
            fields,
        }
    }

    /// Records `id` as live for `model`.
    pub fn track(&self, model: &str, id: RecordId) {
        self.lock_ids().entry(model.to_string()).or_default().track(id);
    }

    /// Drops `id` from the cache. Returns whether it was cached.
    pub fn forget(&self, model: &str, id: RecordId) -> bool {
        self.lock_ids()
            .get_mut(model)
            .is_some_and(|cache| cache.cached.remove(&id))
    }

    pub fn is_cached(&self, model: &str, id: RecordId) -> bool {
        self.lock_ids()
            .get(model)
            .is_some_and(|cache| cache.cached.contains(&id))
    }

    /// Cached ids of `model` in ascending order.
    pub fn cached_ids(&self, model: &str) -> Vec<RecordId> {
        self.lock_ids()
            .get(model)
            .map(|cache| cache.cached.iter().copied().collect())
            .unwrap_or_default()
    }

    // Poisoned locks are recovered: cached ids are advisory.
    fn lock_ids(&self) -> MutexGuard<'_, HashMap<String, IdCache>> {
        self.ids.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut models: Vec<&str> = self.models().collect();
        models.sort_unstable();
        f.debug_struct("ModelRegistry").field("models", &models).finish()
    }
}
