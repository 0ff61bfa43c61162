//! Record model for recstore.
//!
//! Defines the types that sit between the raw key-value backend and callers:
//! - [`Record`]: one stored entity instance (model, id, state, typed fields)
//! - [`Value`]: a typed field value, plus [`coerce`] for schema-directed conversion
//! - [`ModelSchema`]: declares a model's fields and their [`FieldType`]s
//! - [`ModelRegistry`]: schema lookup, record factory, and in-memory id cache
//! - [`RecordHandler`]: optional per-model validation and post-load hooks
//!
//! Storage and query crates consume these types; none of them know how
//! records are laid out in the backend.

mod handler;
mod record;
mod registry;
mod schema;
mod value;

pub use handler::RecordHandler;
pub use record::{Record, RecordState};
pub use registry::ModelRegistry;
pub use schema::{FieldType, ModelSchema, SchemaField};
pub use value::{CoercionError, Value, coerce, parse_date};
