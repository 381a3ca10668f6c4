//! Dialect support.
//!
//! The two supported dialects differ in exactly one decision: whether a
//! double quote delimits an identifier or a string literal. Single quotes
//! always delimit strings and backticks always delimit identifiers.

use core::fmt;
use core::str::FromStr;

use crate::lexer::TokenKind;

/// How a bare `"` is tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// Double quotes delimit identifiers, as in ANSI SQL.
    AnsiQuotes,
    /// Double quotes delimit string literals, as in MySQL without
    /// `ANSI_QUOTES`.
    #[default]
    DoubleQuotedStrings,
}

impl Dialect {
    /// Returns the name of the dialect.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AnsiQuotes => "ansi-quotes",
            Self::DoubleQuotedStrings => "double-quoted-strings",
        }
    }

    /// Returns the kind of token delimited by the given quote character, or
    /// `None` if the character is not a quote.
    #[must_use]
    pub const fn quoted_kind(&self, quote: char) -> Option<TokenKind> {
        match (quote, *self) {
            ('\'', _) | ('"', Self::DoubleQuotedStrings) => Some(TokenKind::String),
            ('`', _) | ('"', Self::AnsiQuotes) => Some(TokenKind::Identifier),
            _ => None,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a dialect name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown dialect '{0}', expected 'ansi-quotes' or 'double-quoted-strings'")]
pub struct DialectParseError(pub String);

impl FromStr for Dialect {
    type Err = DialectParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ansi-quotes" | "ansi" => Ok(Self::AnsiQuotes),
            "double-quoted-strings" | "double-quoted" => Ok(Self::DoubleQuotedStrings),
            _ => Err(DialectParseError(s.to_string())),
        }
    }
}
