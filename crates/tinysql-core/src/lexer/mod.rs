//! Lexer/Tokenizer
//!
//! This module provides a hand-written lexer that turns source text into a
//! list of located tokens, collecting style warnings and quoting errors on
//! the way instead of stopping at the first problem.

mod location;
mod token;
mod tokenizer;

pub use location::{Point, Range};
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::{is_identifier_continue, is_identifier_start, is_space, lex, LexResult, Lexer};
