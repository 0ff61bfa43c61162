use thiserror::Error;

/// Ways a query string can violate the grammar.
///
/// Positions are byte offsets into the query text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("empty query")]
    Empty,

    #[error("expected a field name at {pos}")]
    ExpectedIdentifier { pos: usize },

    #[error("expected a comparison operator at {pos}")]
    ExpectedOperator { pos: usize },

    #[error("unknown operator {0:?}")]
    UnknownOperator(String),

    #[error("expected a quoted string or a number at {pos}")]
    ExpectedLiteral { pos: usize },

    #[error("string literal at {pos} is not closed by a matching quote")]
    UnterminatedString { pos: usize },

    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    #[error("unexpected input at {pos}")]
    TrailingInput { pos: usize },
}
