//! Executor error types
//!
//! Error codes:
//! - QUERY_UNSUPPORTED_OPERATOR (ERROR)
//! - QUERY_LIKE_NOT_SUPPORTED (ERROR)

use std::fmt;

/// Executor-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorErrorCode {
    /// Operator has no rule for the row value's kind
    UnsupportedOperator,
    /// LIKE condition reached the evaluator with pattern matching disabled
    LikeNotSupported,
}

impl ExecutorErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ExecutorErrorCode::UnsupportedOperator => "QUERY_UNSUPPORTED_OPERATOR",
            ExecutorErrorCode::LikeNotSupported => "QUERY_LIKE_NOT_SUPPORTED",
        }
    }
}

impl fmt::Display for ExecutorErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Evaluation error with full context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorError {
    /// Error code
    code: ExecutorErrorCode,
    /// Human-readable message
    message: String,
    /// Field of the failing condition
    field: Option<String>,
}

impl ExecutorError {
    /// Create an unsupported operator error for `operator` applied to a `kind` value
    pub fn unsupported_operator(
        field: impl Into<String>,
        operator: impl Into<String>,
        kind: &str,
    ) -> Self {
        let f = field.into();
        Self {
            code: ExecutorErrorCode::UnsupportedOperator,
            message: format!(
                "Unsupported operator: {} on {} value of '{}'",
                operator.into(),
                kind,
                f
            ),
            field: Some(f),
        }
    }

    /// Create a LIKE-not-supported error for the condition on `field`
    pub fn like_not_supported(field: impl Into<String>) -> Self {
        let f = field.into();
        Self {
            code: ExecutorErrorCode::LikeNotSupported,
            message: format!(
                "LIKE condition on '{}' cannot be evaluated: pattern matching is disabled (enable like_matching)",
                f
            ),
            field: Some(f),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ExecutorErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the condition field if applicable
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }
}

impl fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ERROR] {}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for ExecutorError {}

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;
