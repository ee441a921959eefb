//! Error types for cosmorm

use thiserror::Error;

/// Result type alias for cosmorm operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Error types for criteria building and query execution
#[derive(Debug, Error)]
pub enum OrmError {
    /// Criteria builder misuse (mode mismatch, unbalanced blocks, unknown operator, ...)
    #[error("Criteria builder error: {0}")]
    Builder(String),

    /// A page index past the end of the result set was requested
    #[error("Page {index} out of range ({available} pages available)")]
    PageOutOfRange { index: usize, available: usize },

    /// Failure reported by the query executor (network, rejected query, auth)
    #[error("Executor error: {0}")]
    Executor(String),

    /// A record could not be decoded into the container type
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid call arguments
    #[error("Validation error: {0}")]
    Validation(String),

    /// A page did not arrive within the configured timeout
    #[error("Query timeout after {0:?}")]
    Timeout(std::time::Duration),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl OrmError {
    /// Create a criteria builder error
    pub fn builder(message: impl Into<String>) -> Self {
        Self::Builder(message.into())
    }

    /// Create an executor error
    pub fn executor(message: impl Into<String>) -> Self {
        Self::Executor(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is a criteria builder misuse error
    pub fn is_builder_misuse(&self) -> bool {
        matches!(self, Self::Builder(_))
    }

    /// Check if this is a page out of range error
    pub fn is_page_out_of_range(&self) -> bool {
        matches!(self, Self::PageOutOfRange { .. })
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

impl From<serde_json::Error> for OrmError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
