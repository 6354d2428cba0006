//! Error types for table utilities.

use thiserror::Error;

/// Result alias for table operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// Error type for table construction, masking and target extraction.
#[derive(Error, Debug)]
pub enum TableError {
    /// Axis given by name or number is not valid for the value it was applied to.
    #[error("Invalid axis: {0}")]
    InvalidAxis(String),

    /// Regex pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Requested column does not exist.
    #[error("Column '{0}' not found")]
    MissingColumn(String),

    /// A column with this name already exists.
    #[error("Column '{0}' already exists")]
    DuplicateColumn(String),

    /// Column or index length disagrees with the table.
    #[error("Length mismatch: expected {expected} values, got {got}")]
    LengthMismatch { expected: usize, got: usize },
}
