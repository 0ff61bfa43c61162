//! Key-value persistence layer for recstore.
//!
//! Stores typed records in a flat, string-keyed backend.
//!
//! # Architecture
//!
//! - Records are stored as JSON objects under keys built by [`KeyCodec`]
//! - Payloads are rehydrated by [`build_record`], coercing fields to their
//!   schema-declared types
//! - [`Store`] offers save / delete / find-by-key / find-all / all-keys over
//!   any [`Backend`]
//! - Scans are linear: every backend key is classified against the model
//!
//! [`KeyCodec`]: recstore_types::KeyCodec

mod backend;
mod builder;
mod config;
mod error;
mod file;
mod store;

pub mod codec;

pub use backend::{Backend, MemoryBackend};
pub use builder::build_record;
pub use config::StoreConfig;
pub use error::{BackendError, DecodeError, StorageError, StorageResult};
pub use file::FileBackend;
pub use store::Store;
