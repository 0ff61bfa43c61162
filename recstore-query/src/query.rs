use recstore_model::Value;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::QueryError;

/// A comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl Operator {
    pub const ALL: [Operator; 6] = [Self::Eq, Self::Ne, Self::Lt, Self::Gt, Self::Le, Self::Ge];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
        }
    }

    /// Whether a field/literal comparison with this `ordering` satisfies the
    /// operator. `None` means the two sides are unordered; only `!=` holds.
    pub fn accepts(&self, ordering: Option<Ordering>) -> bool {
        match self {
            Self::Eq => ordering == Some(Ordering::Equal),
            Self::Ne => ordering != Some(Ordering::Equal),
            Self::Lt => ordering == Some(Ordering::Less),
            Self::Gt => ordering == Some(Ordering::Greater),
            Self::Le => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
            Self::Ge => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        }
    }
}

impl FromStr for Operator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| QueryError::UnknownOperator(s.to_string()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The right-hand side of a query.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A quoted string, quotes removed.
    Text(String),
    Number(f64),
}

impl Literal {
    pub fn to_value(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Number(n) => Value::Number(*n),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "'{s}'"),
            Self::Number(_) => f.write_str(&self.to_value().repr()),
        }
    }
}

/// A parsed `field operator literal` predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub field: String,
    pub operator: Operator,
    pub literal: Literal,
}

impl Query {
    pub fn new(field: impl Into<String>, operator: Operator, literal: Literal) -> Self {
        Self {
            field: field.into(),
            operator,
            literal,
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator, self.literal)
    }
}
