//! Error types for the command-line runner.

use std::path::PathBuf;

/// Errors that stop the runner. Diagnostics in the processed sources are not
/// errors; they are part of the output.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// An input file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Read {
        /// The file that failed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Standard input could not be read.
    #[error("Failed to read standard input: {0}")]
    Stdin(#[source] std::io::Error),

    /// Output could not be written.
    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),

    /// Output could not be serialized.
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}
