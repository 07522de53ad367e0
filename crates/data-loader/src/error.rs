//! Error types for the data-loader crate.
//!
//! Everything that can go wrong between a ratings file on disk and a
//! well-formed `RatingMatrix` ends up in `DataLoadError`.

use thiserror::Error;

/// Errors that can occur while loading, validating or writing rating data
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading or writing a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in the ratings file couldn't be parsed
    ///
    /// Stores where the error occurred so the user can fix the file
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A row has a different number of ratings than the first row
    #[error("Expected {expected} fields but found {found} in line {line}")]
    FieldCountMismatch {
        expected: usize,
        found: usize,
        line: usize,
    },

    /// Rows of an in-memory matrix don't all have the same length
    #[error("Row {row} has {found} items, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
