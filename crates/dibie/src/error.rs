//! Error types for the dibie library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dibie operations.
#[derive(Debug, Error)]
pub enum DibieError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Keyword pattern compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Empty file or no data to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A ratio-based computation was handed input it cannot divide by.
    #[error("Invalid input for {context}: {message}")]
    InvalidInput { context: String, message: String },

    /// A single column could not be profiled.
    #[error("Column '{column}' could not be analyzed: {message}")]
    ColumnFailure { column: String, message: String },

    /// A column referenced by name does not exist in the table.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DibieError {
    /// Build an [`DibieError::InvalidInput`] for the named computation.
    pub fn invalid_input(context: impl Into<String>, message: impl Into<String>) -> Self {
        DibieError::InvalidInput {
            context: context.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for dibie operations.
pub type Result<T> = std::result::Result<T, DibieError>;
