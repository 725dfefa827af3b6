//! Crate-level query errors

use thiserror::Error;

use crate::executor::ExecutorError;
use crate::parser::ParseError;
use crate::source::SourceError;

/// Result type for query execution
pub type QueryResult<T> = Result<T, QueryError>;

/// Every way a query can fail
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Query text is malformed
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// A condition could not be evaluated
    #[error("{0}")]
    Execution(#[from] ExecutorError),

    /// A table could not be loaded
    #[error("{0}")]
    Source(#[from] SourceError),

    /// Aggregate without GROUP BY, refused by configuration
    #[error("Aggregate function requires GROUP BY: {0}")]
    UngroupedAggregate(String),
}

impl QueryError {
    /// Stable code for logs and callers
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::Parse(e) => e.code().code(),
            QueryError::Execution(e) => e.code().code(),
            QueryError::Source(SourceError::TableNotFound(_)) => "SOURCE_TABLE_NOT_FOUND",
            QueryError::Source(SourceError::ReadFailed { .. }) => "SOURCE_READ_FAILED",
            QueryError::UngroupedAggregate(_) => "QUERY_UNGROUPED_AGGREGATE",
        }
    }
}
