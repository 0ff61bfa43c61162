//! Core type definitions for recstore.
//!
//! This crate defines the addressing primitives every other recstore crate
//! builds on:
//! - [`RecordId`], the non-negative integer identifying a record within a model
//! - [`KeyCodec`], which maps `(model, id)` to a flat backend key and back
//!
//! Nothing here touches a backend; keys are pure string views over
//! `(namespace, app identity, model, id)`.

mod ids;
mod key;

pub use ids::RecordId;
pub use key::{DEFAULT_NAMESPACE, KEY_SEPARATOR, KeyCodec, KeyMatch};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid record id: {0:?}")]
    InvalidId(String),

    #[error(
        "ambiguous {part} {value:?}: the namespace and app identity must not contain \"_\", \
         and the app identity must be non-empty"
    )]
    AmbiguousIdentity { part: &'static str, value: String },

    #[error("invalid model name {0:?}: must be non-empty and must not contain \"_\"")]
    InvalidModelName(String),
}
