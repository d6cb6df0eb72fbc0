use thiserror::Error;

/// Errors from document store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failure surfaced by the SQL backend (constraint violation, malformed
    /// statement, I/O). The backend message is propagated verbatim.
    #[error("{0}")]
    Backend(String),

    /// The connection pool could not hand out a connection.
    #[error("connection pool error: {0}")]
    Pool(String),

    /// The JSON path in a request could not be parsed.
    #[error("invalid JSON path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// A stored document could not be decoded as JSON.
    #[error("stored document is not valid JSON: {0}")]
    Serialization(String),
}

impl StoreError {
    pub(crate) fn backend(err: rusqlite::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
