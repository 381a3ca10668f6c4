//! SQL Parser
//!
//! A hand-written recursive descent parser with Pratt expression parsing and
//! statement-level error recovery.

mod error;
#[allow(clippy::module_inception)]
mod parser;
mod pratt;

pub use error::SyntaxError;
pub use parser::{parse, parse_source, ParseResult, Parser, MAX_EXPRESSION_DEPTH};
