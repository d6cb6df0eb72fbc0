use thiserror::Error;

/// Errors produced by type construction and validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },
}
