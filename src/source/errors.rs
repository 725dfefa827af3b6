//! Row source errors

use thiserror::Error;

/// Result type for row source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors surfaced by a [`RowSource`](super::RowSource)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// No table with this name
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Table exists but could not be read
    #[error("Failed to read table {table}: {reason}")]
    ReadFailed { table: String, reason: String },
}

impl SourceError {
    /// Create a read failure for `table`
    pub fn read_failed(table: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ReadFailed {
            table: table.into(),
            reason: reason.into(),
        }
    }
}
