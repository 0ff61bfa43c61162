//! Rehydrates raw payloads into schema-typed field maps.

use recstore_model::{ModelSchema, Value, coerce};
use std::collections::BTreeMap;

use crate::codec::decode;
use crate::error::DecodeError;

/// Decodes `raw` and coerces every schema-declared field to its declared type.
///
/// Fields the schema does not mention pass through unchanged, as do `null`s.
/// A declared field whose value cannot be converted fails the whole build:
/// the payload is treated as corrupt.
pub fn build_record(
    raw: &str,
    schema: &ModelSchema,
) -> Result<BTreeMap<String, Value>, DecodeError> {
    let mut fields = BTreeMap::new();
    for (name, value) in decode(raw)? {
        let value = match schema.field_type(&name) {
            Some(tag) if value.kind() != Some(tag) => {
                coerce(tag, value).map_err(|source| DecodeError::Coercion {
                    field: name.clone(),
                    source,
                })?
            }
            _ => value,
        };
        fields.insert(name, value);
    }
    Ok(fields)
}
