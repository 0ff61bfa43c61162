use recstore_model::{Record, Value, coerce};
use std::cmp::Ordering;

use crate::{Literal, Operator, Query};

/// Keeps the records that satisfy `query`, preserving their order.
pub fn evaluate(records: impl IntoIterator<Item = Record>, query: &Query) -> Vec<Record> {
    records.into_iter().filter(|r| query.matches(r)).collect()
}

impl Query {
    /// Whether `record` satisfies the predicate.
    ///
    /// A missing or null field only satisfies `!=`.
    pub fn matches(&self, record: &Record) -> bool {
        match record.get(&self.field).filter(|v| !v.is_null()) {
            Some(value) => self.operator.accepts(self.literal.compare_with(value)),
            None => self.operator == Operator::Ne,
        }
    }
}

impl Literal {
    /// Orders `value` against this literal.
    ///
    /// The literal is first coerced to the value's kind; if that fails both
    /// sides are compared by their text.
    pub fn compare_with(&self, value: &Value) -> Option<Ordering> {
        let typed = value
            .kind()
            .and_then(|kind| coerce(kind, self.to_value()).ok());
        match typed {
            Some(literal) => value.compare(&literal),
            None => Some(value.repr().cmp(&self.to_value().repr())),
        }
    }
}
