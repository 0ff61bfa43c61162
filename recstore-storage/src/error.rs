//! Error types for the storage layer.

use recstore_model::CoercionError;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Failures reported by a [`Backend`](crate::Backend).
#[derive(Debug, Error)]
pub enum BackendError {
    /// Writing would exceed the backend's capacity.
    #[error("quota exceeded writing {key}: limit is {limit} bytes")]
    QuotaExceeded { key: String, limit: usize },

    /// The backend cannot serve requests (e.g., a poisoned lock).
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend's own persisted form could not be read or written.
    #[error("persistence error: {0}")]
    Persist(#[from] serde_json::Error),
}

/// A stored payload could not be turned into a typed record.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload is not valid JSON.
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The payload is valid JSON but not an object.
    #[error("payload is not an object")]
    NotAnObject,

    /// A schema-declared field holds a value of the wrong, unconvertible type.
    #[error("field {field:?}: {source}")]
    Coercion {
        field: String,
        #[source]
        source: CoercionError,
    },
}

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend failed to read, write or remove an entry.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(#[from] BackendError),

    /// No entry exists under the key.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// A key does not carry a valid record id for the model.
    #[error("malformed key: {0}")]
    MalformedKey(String),

    /// A stored payload is corrupt.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A numeric field holds NaN or an infinity.
    #[error("field {field:?} holds a non-finite number")]
    NonFiniteNumber { field: String },

    /// A date field lies outside years 0000 to 9999.
    #[error("field {field:?} holds a date outside years 0000 to 9999")]
    DateOutOfRange { field: String },

    /// The model is not registered.
    #[error("unknown model: {0}")]
    UnknownModel(String),

    /// The record has no id, so it has no key.
    #[error("record of model {0} has no id")]
    MissingId(String),

    /// The model's record handler rejected the write.
    #[error("record of model {model} rejected: {reason}")]
    Rejected { model: String, reason: String },

    /// Namespace, app identity or model name would make keys ambiguous.
    #[error("invalid key: {0}")]
    InvalidKey(#[from] recstore_types::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
