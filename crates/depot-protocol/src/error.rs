use thiserror::Error;

/// Errors from parsing an action request body.
///
/// Every variant is a client error: the request never reaches the store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// A required field is absent from the request body.
    #[error("the \"{0}\" key is required in the JSON body of the request")]
    MissingField(&'static str),

    /// The `action` field names no known action.
    #[error(
        "unknown action {got:?}: the \"action\" key must be one of \"extract\", \
         \"insert\", \"patch\", \"remove\", \"replace\" or \"set\""
    )]
    InvalidAction { got: String },

    /// A field is present but has the wrong JSON type.
    #[error("the \"{field}\" key must be a JSON {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}
