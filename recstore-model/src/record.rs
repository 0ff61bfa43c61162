use chrono::{DateTime, Utc};
use recstore_types::RecordId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::Value;

/// Lifecycle state of an in-memory record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordState {
    /// Created in memory, not yet loaded from or confirmed by the backend.
    #[default]
    New,
    /// Rehydrated from a backend entry.
    Valid,
}

/// One stored instance of a model.
///
/// Only `fields` is persisted. The id is carried by the backend key and the
/// state exists only in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub model: String,
    pub id: Option<RecordId>,
    pub state: RecordState,
    pub fields: BTreeMap<String, Value>,
}

impl Record {
    /// Creates an empty record of `model` with no id.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            id: None,
            state: RecordState::New,
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style id assignment.
    #[must_use]
    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }

    /// Builder-style field assignment.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a field, returning the previous value.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.to_string(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Extract a string field.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Extract a numeric field.
    pub fn get_number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    /// Extract a boolean field.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Extract a date field.
    pub fn get_date(&self, name: &str) -> Option<DateTime<Utc>> {
        self.get(name).and_then(Value::as_date)
    }
}
