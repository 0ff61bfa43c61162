use recstore_model::Record;
use recstore_storage::{Backend, StorageResult, Store};
use tracing::debug;

use crate::{evaluate, parse_query};

/// What to look for: a key, a query, or neither for everything.
///
/// A non-empty key wins over a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindRequest {
    pub key: Option<String>,
    pub query: Option<String>,
}

impl FindRequest {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            query: None,
        }
    }

    pub fn by_query(query: impl Into<String>) -> Self {
        Self {
            key: None,
            query: Some(query.into()),
        }
    }
}

/// Result of [`find`]: one record for a key lookup, a list otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Found {
    One(Option<Record>),
    Many(Vec<Record>),
}

impl Found {
    pub fn into_records(self) -> Vec<Record> {
        match self {
            Self::One(record) => record.into_iter().collect(),
            Self::Many(records) => records,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::One(record) => usize::from(record.is_some()),
            Self::Many(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Looks up records of `model` by key, by query, or all of them.
///
/// An invalid query is logged and yields `Many([])`.
pub fn find<B: Backend>(
    store: &Store<B>,
    model: &str,
    request: &FindRequest,
) -> StorageResult<Found> {
    if let Some(key) = request.key.as_deref().filter(|k| !k.is_empty()) {
        debug!(model = %model, key = %key, "find by key");
        return store.find_by_key(model, Some(key)).map(Found::One);
    }

    if let Some(text) = request.query.as_deref() {
        debug!(model = %model, query = %text, "find by query");
        let Some(query) = parse_query(text) else {
            return Ok(Found::Many(Vec::new()));
        };
        return Ok(Found::Many(evaluate(store.find_all(model)?, &query)));
    }

    store.find_all(model).map(Found::Many)
}
