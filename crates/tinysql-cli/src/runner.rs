//! Processing of a single input.

use core::fmt;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::debug;

use tinysql_core::lint::{lint, Severity};
use tinysql_core::{
    lex, parse, to_json_value, to_pretty_json, Diagnostic, Dialect, Locations, ParseResult, Token,
};

use crate::error::CliError;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    /// Human-readable sections: source, tokens, AST and diagnostics.
    #[default]
    Report,
    /// One JSON document per line and input.
    Json,
    /// One `name:line:column: severity: message` line per diagnostic.
    Lint,
}

/// Settings shared by all inputs of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    pub dialect: Dialect,
    pub format: Format,
    pub locations: Locations,
}

/// Where a source comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    /// Maps command-line arguments to inputs. No arguments means stdin, as
    /// does `-`.
    #[must_use]
    pub fn from_args(files: &[PathBuf]) -> Vec<Self> {
        if files.is_empty() {
            return vec![Self::Stdin];
        }
        files
            .iter()
            .map(|path| {
                if path == Path::new("-") {
                    Self::Stdin
                } else {
                    Self::File(path.clone())
                }
            })
            .collect()
    }

    /// Reads the whole input.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or stdin cannot be read, or is not UTF-8.
    pub fn read(&self) -> Result<String, CliError> {
        match self {
            Self::Stdin => {
                let mut source = String::new();
                io::stdin()
                    .read_to_string(&mut source)
                    .map_err(CliError::Stdin)?;
                Ok(source)
            }
            Self::File(path) => std::fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            }),
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Processes one source and writes the result to `out`.
///
/// Returns true if the source produced at least one error diagnostic.
///
/// # Errors
///
/// Returns an error if writing or serializing the output fails.
pub fn run_source<W: Write>(
    out: &mut W,
    name: &str,
    source: &str,
    options: &Options,
) -> Result<bool, CliError> {
    match options.format {
        Format::Report => write_report(out, name, source, options),
        Format::Json => write_json(out, name, source, options),
        Format::Lint => write_lint(out, name, source, options.dialect),
    }
}

/// Lexes and parses `source`, keeping a copy of the tokens for output.
fn analyze(name: &str, source: &str, dialect: Dialect) -> (Vec<Token>, ParseResult) {
    let lexed = lex(source, dialect);
    let tokens = lexed.tokens.clone();
    let result = parse(lexed);
    debug!(
        input = name,
        tokens = tokens.len(),
        commands = result.commands.len(),
        warnings = result.warnings.len(),
        errors = result.errors.len(),
        "processed input"
    );
    (tokens, result)
}

fn write_report<W: Write>(
    out: &mut W,
    name: &str,
    source: &str,
    options: &Options,
) -> Result<bool, CliError> {
    let (tokens, result) = analyze(name, source, options.dialect);

    writeln!(out, "== {name} ==")?;
    writeln!(out, "Source:")?;
    writeln!(out, "{source}")?;
    writeln!(out)?;

    writeln!(out, "Tokens:")?;
    for token in &tokens {
        let token = to_json_value(token, options.locations)?;
        writeln!(out, "{token}")?;
    }
    writeln!(out)?;

    writeln!(out, "AST:")?;
    writeln!(out, "{}", to_pretty_json(&result.commands, options.locations)?)?;
    writeln!(out)?;

    write_diagnostics(out, "Warnings", &result.warnings)?;
    write_diagnostics(out, "Errors", &result.errors)?;
    Ok(!result.errors.is_empty())
}

fn write_json<W: Write>(
    out: &mut W,
    name: &str,
    source: &str,
    options: &Options,
) -> Result<bool, CliError> {
    let (tokens, result) = analyze(name, source, options.dialect);
    // Diagnostics always keep their locations.
    let document = json!({
        "name": name,
        "tokens": to_json_value(&tokens, options.locations)?,
        "commands": to_json_value(&result.commands, options.locations)?,
        "warnings": result.warnings,
        "errors": result.errors,
    });
    serde_json::to_writer(&mut *out, &document)?;
    writeln!(out)?;
    Ok(!result.errors.is_empty())
}

fn write_diagnostics<W: Write>(
    out: &mut W,
    title: &str,
    diagnostics: &[Diagnostic],
) -> Result<(), CliError> {
    writeln!(out, "{title}:")?;
    if diagnostics.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for diagnostic in diagnostics {
        writeln!(out, "  {diagnostic}")?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_lint<W: Write>(
    out: &mut W,
    name: &str,
    source: &str,
    dialect: Dialect,
) -> Result<bool, CliError> {
    let markers = lint(source, dialect);
    for marker in &markers {
        writeln!(
            out,
            "{name}:{}:{}: {}: {}",
            marker.start_line + 1,
            marker.start_column,
            marker.severity.as_str(),
            marker.message
        )?;
    }
    Ok(markers.iter().any(|m| m.severity == Severity::Error))
}
