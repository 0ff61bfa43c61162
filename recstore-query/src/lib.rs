//! Single-predicate query language over recstore records.
//!
//! A query compares one field against one literal:
//!
//! ```text
//! username = 'paul'
//! price < 12.23
//! result >= -23
//! ```
//!
//! There is no AND/OR composition. [`parse_query`] turns text into a
//! [`Query`], [`evaluate`] filters records with it, and [`find`] dispatches
//! between key lookup, query filtering and a full scan.

mod error;
mod eval;
mod find;
mod parser;
mod query;

pub use error::QueryError;
pub use eval::evaluate;
pub use find::{FindRequest, Found, find};
pub use parser::parse_query;
pub use query::{Literal, Operator, Query};
