//! JSON encoding of record payloads.
//!
//! Only the field map is written; the id lives in the key.

use recstore_model::{Record, Value};
use serde_json::Map;

use crate::error::{DecodeError, StorageError, StorageResult};

/// Encodes a record's fields as a JSON object.
pub fn encode(record: &Record) -> StorageResult<String> {
    let mut object = Map::with_capacity(record.fields.len());
    for (name, value) in &record.fields {
        let json = value.to_json().ok_or_else(|| match value {
            Value::Date(_) => StorageError::DateOutOfRange {
                field: name.clone(),
            },
            _ => StorageError::NonFiniteNumber {
                field: name.clone(),
            },
        })?;
        object.insert(name.clone(), json);
    }
    Ok(serde_json::to_string(&object)?)
}

/// Decodes a payload into untyped field values.
///
/// No schema is consulted; see [`build_record`](crate::build_record) for the
/// typed path.
pub fn decode(raw: &str) -> Result<Vec<(String, Value)>, DecodeError> {
    match serde_json::from_str::<serde_json::Value>(raw)? {
        serde_json::Value::Object(object) => Ok(object
            .into_iter()
            .map(|(name, value)| (name, Value::from_json(value)))
            .collect()),
        _ => Err(DecodeError::NotAnObject),
    }
}
