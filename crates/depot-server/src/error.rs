use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use depot_protocol::{ErrorBody, ProtocolError};
use depot_store::StoreError;
use depot_types::TypeError;

/// Process-level failures: configuration, binding, store bootstrap.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Request-level failures.
///
/// Every variant converts to the uniform `{status:"error", message}`
/// envelope. Validation and store failures are client errors (400); only a
/// missing document or namespace on a read/delete is 404. Nothing here is
/// retried or fatal to the process.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    InvalidName(#[from] TypeError),

    /// `extract` resolved to no value.
    #[error("the provided path does not match inside the JSON object")]
    PathNotFound,

    /// A mutation affected zero rows. Deliberately ambiguous: the object may
    /// not exist, the path may not match, or the edit was a true no-op.
    #[error("value not modified: either the path does not match or the namespace/object pair does not exist")]
    NotModified,

    #[error("object not found: {namespace}/{object}")]
    ObjectNotFound { namespace: String, object: String },

    #[error("namespace not found: {0}")]
    NamespaceNotFound(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::ObjectNotFound { .. } | Self::NamespaceNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(%status, error = %self, "request failed");
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
