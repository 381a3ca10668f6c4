//! Editor lint markers.
//!
//! Diagnostics use 1-indexed lines. Editors generally expect 0-indexed lines,
//! so markers shift the line and keep the code-point column as is.

use serde::Serialize;

use crate::diagnostic::Diagnostic;
use crate::dialect::Dialect;
use crate::parser::parse_source;

/// How severe a marker is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    /// Returns the lowercase name of the severity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A diagnostic positioned for an editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LintMarker {
    pub severity: Severity,
    pub message: String,
    /// 0-indexed line.
    pub start_line: u32,
    /// Code-point column.
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl LintMarker {
    /// Converts a diagnostic into a marker.
    #[must_use]
    pub fn from_diagnostic(severity: Severity, diagnostic: &Diagnostic) -> Self {
        let Diagnostic { message, location } = diagnostic;
        Self {
            severity,
            message: message.clone(),
            start_line: location.from.line.saturating_sub(1),
            start_column: location.from.column,
            end_line: location.to.line.saturating_sub(1),
            end_column: location.to.column,
        }
    }
}

/// Lexes and parses `source`, returning warnings followed by errors as
/// markers.
#[must_use]
pub fn lint(source: &str, dialect: Dialect) -> Vec<LintMarker> {
    let result = parse_source(source, dialect);
    let warnings = result
        .warnings
        .iter()
        .map(|d| LintMarker::from_diagnostic(Severity::Warning, d));
    let errors = result
        .errors
        .iter()
        .map(|d| LintMarker::from_diagnostic(Severity::Error, d));
    warnings.chain(errors).collect()
}
