//! # tinysql-cli
//!
//! Runs the tinysql lexer and parser over files or standard input and prints
//! tokens, the AST and diagnostics.

pub mod error;
pub mod runner;

pub use error::CliError;
pub use runner::{run_source, Format, Input, Options};
