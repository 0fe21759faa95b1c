//! Error types for the CLI.

use core_types::RillError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O error
    #[error("could not read source file: {0}")]
    Io(#[from] std::io::Error),

    /// Lex, parse, compile, or runtime error from the pipeline
    #[error("{0}")]
    Script(#[from] RillError),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
