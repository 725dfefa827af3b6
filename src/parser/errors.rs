//! Parser error types
//!
//! Error codes:
//! - QUERY_INVALID_SELECT (REJECT)
//! - QUERY_INVALID_JOIN (REJECT)
//! - QUERY_INVALID_WHERE (REJECT)
//! - QUERY_INVALID_GROUP_BY (REJECT)
//! - QUERY_INVALID_ORDER_BY (REJECT)

use std::fmt;

/// Severity levels for parser errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Query text rejected
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Parser error codes, one per clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorCode {
    /// Leading clause is not `SELECT <fields> FROM <table>`
    InvalidSelect,
    /// JOIN sub-clause is malformed
    InvalidJoin,
    /// WHERE condition has no recognized operator or an empty side
    InvalidWhere,
    /// GROUP BY field list is malformed
    InvalidGroupBy,
    /// ORDER BY field list is malformed
    InvalidOrderBy,
}

impl ParseErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ParseErrorCode::InvalidSelect => "QUERY_INVALID_SELECT",
            ParseErrorCode::InvalidJoin => "QUERY_INVALID_JOIN",
            ParseErrorCode::InvalidWhere => "QUERY_INVALID_WHERE",
            ParseErrorCode::InvalidGroupBy => "QUERY_INVALID_GROUP_BY",
            ParseErrorCode::InvalidOrderBy => "QUERY_INVALID_ORDER_BY",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for ParseErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Parser error type with full context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Error code
    code: ParseErrorCode,
    /// Human-readable message
    message: String,
    /// Offending fragment of query text, if any
    fragment: Option<String>,
}

impl ParseError {
    /// Create an invalid SELECT error
    pub fn invalid_select(fragment: impl Into<String>) -> Self {
        let f = fragment.into();
        Self {
            code: ParseErrorCode::InvalidSelect,
            message: format!("Invalid SELECT format: '{}'", f),
            fragment: Some(f),
        }
    }

    /// Create an invalid JOIN error
    pub fn invalid_join(reason: impl Into<String>) -> Self {
        Self {
            code: ParseErrorCode::InvalidJoin,
            message: reason.into(),
            fragment: None,
        }
    }

    /// Create an invalid WHERE condition error
    pub fn invalid_where(condition: impl Into<String>) -> Self {
        let c = condition.into();
        Self {
            code: ParseErrorCode::InvalidWhere,
            message: format!("Invalid WHERE clause format: '{}'", c),
            fragment: Some(c),
        }
    }

    /// Create an invalid GROUP BY error
    pub fn invalid_group_by(reason: impl Into<String>) -> Self {
        Self {
            code: ParseErrorCode::InvalidGroupBy,
            message: reason.into(),
            fragment: None,
        }
    }

    /// Create an invalid ORDER BY error
    pub fn invalid_order_by(reason: impl Into<String>) -> Self {
        Self {
            code: ParseErrorCode::InvalidOrderBy,
            message: reason.into(),
            fragment: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ParseErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending fragment if applicable
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// Result type for parser operations
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ParseErrorCode::InvalidSelect.code(), "QUERY_INVALID_SELECT");
        assert_eq!(ParseErrorCode::InvalidJoin.code(), "QUERY_INVALID_JOIN");
        assert_eq!(ParseErrorCode::InvalidWhere.code(), "QUERY_INVALID_WHERE");
        assert_eq!(
            ParseErrorCode::InvalidGroupBy.code(),
            "QUERY_INVALID_GROUP_BY"
        );
        assert_eq!(
            ParseErrorCode::InvalidOrderBy.code(),
            "QUERY_INVALID_ORDER_BY"
        );
    }

    #[test]
    fn test_error_display() {
        let err = ParseError::invalid_where("age 30");
        let display = format!("{}", err);
        assert!(display.contains("REJECT"));
        assert!(display.contains("QUERY_INVALID_WHERE"));
        assert!(display.contains("age 30"));
        assert_eq!(err.fragment(), Some("age 30"));
    }
}
