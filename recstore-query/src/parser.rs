use tracing::warn;

use crate::{Literal, Operator, Query, QueryError};

/// Parses `text`, logging a grammar violation instead of returning it.
pub fn parse_query(text: &str) -> Option<Query> {
    match Query::parse(text) {
        Ok(query) => Some(query),
        Err(e) => {
            warn!(query = %text, error = %e, "query does not match the grammar");
            None
        }
    }
}

impl Query {
    /// Parses `field operator literal`.
    ///
    /// Whitespace may surround every token. Field names and quoted strings
    /// are limited to ASCII letters, digits and `_`.
    pub fn parse(text: &str) -> Result<Query, QueryError> {
        Parser::new(text).query()
    }
}

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_operator(b: u8) -> bool {
    matches!(b, b'<' | b'>' | b'!' | b'=')
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn query(mut self) -> Result<Query, QueryError> {
        self.skip_ws();
        if self.at_end() {
            return Err(QueryError::Empty);
        }
        let field = self.identifier()?;
        self.skip_ws();
        let operator = self.operator()?;
        self.skip_ws();
        let literal = self.literal()?;
        self.skip_ws();
        if !self.at_end() {
            return Err(QueryError::TrailingInput { pos: self.pos });
        }
        Ok(Query {
            field: field.to_string(),
            operator,
            literal,
        })
    }

    fn identifier(&mut self) -> Result<&'a str, QueryError> {
        let start = self.pos;
        let word = self.take_while(is_word);
        if word.is_empty() {
            return Err(QueryError::ExpectedIdentifier { pos: start });
        }
        Ok(word)
    }

    // The longest run of operator characters is one token, so `<<` or `=<`
    // is rejected as a whole rather than split.
    fn operator(&mut self) -> Result<Operator, QueryError> {
        let start = self.pos;
        let token = self.take_while(is_operator);
        if token.is_empty() {
            return Err(QueryError::ExpectedOperator { pos: start });
        }
        token.parse()
    }

    fn literal(&mut self) -> Result<Literal, QueryError> {
        match self.peek() {
            Some(quote @ (b'\'' | b'"')) => self.string(quote),
            Some(b'+' | b'-') => self.number(),
            Some(b) if b.is_ascii_digit() => self.number(),
            _ => Err(QueryError::ExpectedLiteral { pos: self.pos }),
        }
    }

    fn string(&mut self, quote: u8) -> Result<Literal, QueryError> {
        let start = self.pos;
        self.pos += 1;
        let body = self.take_while(is_word);
        if self.peek() != Some(quote) {
            return Err(QueryError::UnterminatedString { pos: start });
        }
        self.pos += 1;
        Ok(Literal::Text(body.to_string()))
    }

    fn number(&mut self) -> Result<Literal, QueryError> {
        let start = self.pos;
        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        let integral = self.take_while(|b| b.is_ascii_digit());
        if integral.is_empty() {
            return Err(QueryError::InvalidNumber(self.src[start..self.pos].to_string()));
        }
        if self.peek() == Some(b'.') {
            self.pos += 1;
            if self.take_while(|b| b.is_ascii_digit()).is_empty() {
                return Err(QueryError::InvalidNumber(self.src[start..self.pos].to_string()));
            }
        }
        let text = &self.src[start..self.pos];
        text.parse::<f64>()
            .map(Literal::Number)
            .map_err(|_| QueryError::InvalidNumber(text.to_string()))
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn skip_ws(&mut self) {
        self.take_while(|b| b.is_ascii_whitespace());
    }

    // Only ever consumes ASCII bytes, so `pos` stays on a char boundary.
    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let src = self.src;
        let start = self.pos;
        while let Some(b) = self.peek()
            && pred(b)
        {
            self.pos += 1;
        }
        &src[start..self.pos]
    }
}
