//! Error types for TSV conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading, projecting or rendering a table.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input path does not resolve to a file.
    #[error("Input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    /// Any other I/O failure on the input or output file.
    #[error("IO error for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input has no header line.
    #[error("Input is empty: no header row found")]
    EmptyInput,

    /// A data row's field count differs from the header's.
    #[error("Malformed row at line {line}: expected {expected} fields, found {found}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// A selected column is not present in the header.
    #[error("Unknown column: '{column}'")]
    UnknownColumn { column: String },

    /// The script variable name is not a usable JavaScript identifier.
    #[error("Invalid variable name: '{0}'")]
    InvalidVariableName(String),

    /// The delimiter cannot be used for delimited text.
    #[error("Invalid delimiter: {0:?}")]
    InvalidDelimiter(char),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConvertError {
    /// Maps an I/O error on `path`, singling out a missing file.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            ConvertError::InputNotFound { path }
        } else {
            ConvertError::Io { path, source }
        }
    }
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
