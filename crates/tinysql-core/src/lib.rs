//! # tinysql-core
//!
//! Lexer and error-recovering parser for a small SQL-like query language.
//!
//! This crate provides:
//! - A Unicode-aware lexer with two quoting dialects
//! - A hand-written recursive descent parser with Pratt expression parsing
//! - Statement-level error recovery: a malformed command is reported and
//!   skipped, the commands around it still parse
//! - Source locations on every token, AST node and diagnostic
//!
//! ## Parsing
//!
//! ```rust
//! use tinysql_core::{parse_source, Command, Dialect};
//!
//! let result = parse_source("SELECT * WHERE id > 42; USE db;", Dialect::default());
//!
//! // The first command is missing its FROM clause...
//! assert_eq!(
//!     result.errors[0].message,
//!     "Unexpected input 'WHERE', expected FROM clause"
//! );
//! // ...but the second one still parses.
//! assert!(matches!(&result.commands[..], [Command::Use(u)] if u.database == "db"));
//! ```
//!
//! ## Dialects
//!
//! The dialect decides whether `"` quotes an identifier or a string:
//!
//! ```rust
//! use tinysql_core::{lex, Dialect, TokenKind};
//!
//! let ansi = lex(r#"SELECT * FROM "t""#, Dialect::AnsiQuotes);
//! assert_eq!(ansi.tokens[3].kind, TokenKind::Identifier);
//!
//! let mysql = lex(r#"SELECT * FROM "t""#, Dialect::DoubleQuotedStrings);
//! assert_eq!(mysql.tokens[3].kind, TokenKind::String);
//! ```

pub mod ast;
pub mod diagnostic;
pub mod dialect;
pub mod json;
pub mod lexer;
pub mod lint;
pub mod parser;

pub use ast::{Command, ConstantExpr, Expr};
pub use diagnostic::Diagnostic;
pub use dialect::Dialect;
pub use json::{to_json_value, to_pretty_json, Locations};
pub use lexer::{lex, LexResult, Lexer, Point, Range, Token, TokenKind};
pub use lint::{lint, LintMarker, Severity};
pub use parser::{parse, parse_source, ParseResult, Parser, SyntaxError};
