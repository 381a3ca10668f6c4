//! Non-fatal diagnostics produced by the lexer and the parser.

use core::fmt;

use serde::Serialize;

use crate::lexer::Range;

/// Message of the keyword casing warning.
pub const KEYWORD_CASE: &str = "Style: Keywords should be written in ALLCAPS";
/// Message of the error reported for a quote that is never closed.
pub const UNCLOSED_QUOTE: &str = "Unclosed quote";
/// Message reported when a value list contains a non-constant expression.
pub const CONSTANT_VALUES_ONLY: &str = "Only constant expressions are allowed in value list";
/// Message reported for calls to anything but `NOW()`.
pub const ONLY_NOW_SUPPORTED: &str = "The only supported function is NOW()";
/// Message reported when an expression exceeds the nesting limit.
pub const NESTED_TOO_DEEPLY: &str = "Expression nested too deeply";

/// A warning or error with the source range it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Human-readable message.
    pub message: String,
    /// The offending span.
    pub location: Range,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    #[must_use]
    pub fn new(message: impl Into<String>, location: Range) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}",
            self.location.from.line, self.location.from.column, self.message
        )
    }
}
