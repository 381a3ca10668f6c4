//! Parser error types.

use crate::diagnostic::{Diagnostic, NESTED_TOO_DEEPLY};
use crate::lexer::{Range, Token, TokenKind};

/// A syntax error. Aborts the statement it occurs in, never the whole parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SyntaxError {
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub location: Range,
    /// What the grammar expected (if applicable).
    pub expected: Option<String>,
    /// The kind of the offending token.
    pub found: Option<TokenKind>,
}

impl SyntaxError {
    /// Creates a new syntax error.
    #[must_use]
    pub fn new(message: impl Into<String>, location: Range) -> Self {
        Self {
            message: message.into(),
            location,
            expected: None,
            found: None,
        }
    }

    /// Creates an "unexpected input" error located at `token`.
    #[must_use]
    pub fn unexpected(token: &Token, expected: impl Into<String>) -> Self {
        let expected: String = expected.into();
        let message = if token.is_eof() {
            format!("Unexpected end of input, expected {expected}")
        } else {
            format!("Unexpected input '{}', expected {expected}", token.contents)
        };
        Self {
            message,
            location: token.location,
            expected: Some(expected),
            found: Some(token.kind),
        }
    }

    /// Creates the error reported when an expression exceeds the nesting
    /// limit.
    #[must_use]
    pub fn nested_too_deeply(location: Range) -> Self {
        Self::new(NESTED_TOO_DEEPLY, location)
    }
}

impl From<SyntaxError> for Diagnostic {
    fn from(error: SyntaxError) -> Self {
        Self::new(error.message, error.location)
    }
}
