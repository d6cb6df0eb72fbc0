use serde_json::Value;

use crate::error::ProtocolError;

/// The closed set of document mutation actions.
///
/// Each variant carries exactly the fields its operation requires. Required
/// fields are validated in a fixed order when parsing: `action` first, then
/// `path`, then `value`; the first missing one wins.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Read the value at `path`; returns the value, not the whole document.
    Extract { path: String },
    /// Write `value` at `path` only if `path` does not already exist.
    Insert { path: String, value: Value },
    /// RFC 7396 merge patch of `value` into the document.
    Patch { value: Value },
    /// Delete the value at `path`.
    Remove { path: String },
    /// Write `value` at `path` only if `path` already exists.
    Replace { path: String, value: Value },
    /// Write `value` at `path` unconditionally, creating it if absent.
    Set { path: String, value: Value },
}

/// Action keywords accepted on the wire, in catalog order.
pub const ACTION_NAMES: [&str; 6] = ["extract", "insert", "patch", "remove", "replace", "set"];

/// Fixed confirmation messages returned when a mutation modified the
/// document.
pub mod confirm {
    pub const INSERT: &str = "Insert executed, and value modified.";
    pub const PATCH: &str = "Patch executed, and value modified.";
    pub const REMOVE: &str = "Remove executed, and value modified.";
    pub const REPLACE: &str = "Replace executed, and value modified.";
    pub const SET: &str = "Set executed, and value modified.";
}

impl Action {
    /// Parse a decoded JSON request body into an action.
    ///
    /// A body that is not a JSON object is treated the same as an object
    /// without an `action` key.
    pub fn from_request(body: &Value) -> Result<Self, ProtocolError> {
        let map = match body.as_object() {
            Some(map) => map,
            None => return Err(ProtocolError::MissingField("action")),
        };
        let action = map
            .get("action")
            .ok_or(ProtocolError::MissingField("action"))?;
        let action = action.as_str().ok_or_else(|| ProtocolError::InvalidAction {
            got: action.to_string(),
        })?;

        match action {
            "extract" => Ok(Self::Extract {
                path: required_path(map)?,
            }),
            "insert" => Ok(Self::Insert {
                path: required_path(map)?,
                value: required_value(map)?,
            }),
            "patch" => Ok(Self::Patch {
                value: required_value(map)?,
            }),
            "remove" => Ok(Self::Remove {
                path: required_path(map)?,
            }),
            "replace" => Ok(Self::Replace {
                path: required_path(map)?,
                value: required_value(map)?,
            }),
            "set" => Ok(Self::Set {
                path: required_path(map)?,
                value: required_value(map)?,
            }),
            other => Err(ProtocolError::InvalidAction {
                got: other.to_string(),
            }),
        }
    }

    /// The wire keyword for this action.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Extract { .. } => "extract",
            Self::Insert { .. } => "insert",
            Self::Patch { .. } => "patch",
            Self::Remove { .. } => "remove",
            Self::Replace { .. } => "replace",
            Self::Set { .. } => "set",
        }
    }

    /// Fixed confirmation message returned when a mutation modified the
    /// document. `None` for the read-only `extract`.
    pub fn confirmation(&self) -> Option<&'static str> {
        match self {
            Self::Extract { .. } => None,
            Self::Insert { .. } => Some(confirm::INSERT),
            Self::Patch { .. } => Some(confirm::PATCH),
            Self::Remove { .. } => Some(confirm::REMOVE),
            Self::Replace { .. } => Some(confirm::REPLACE),
            Self::Set { .. } => Some(confirm::SET),
        }
    }
}

fn required_path(map: &serde_json::Map<String, Value>) -> Result<String, ProtocolError> {
    let path = map.get("path").ok_or(ProtocolError::MissingField("path"))?;
    path.as_str()
        .map(str::to_string)
        .ok_or(ProtocolError::InvalidField {
            field: "path",
            expected: "string",
        })
}

fn required_value(map: &serde_json::Map<String, Value>) -> Result<Value, ProtocolError> {
    map.get("value")
        .cloned()
        .ok_or(ProtocolError::MissingField("value"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_extract() {
        let action = Action::from_request(&json!({"action": "extract", "path": "$.foo"})).unwrap();
        assert_eq!(
            action,
            Action::Extract {
                path: "$.foo".into()
            }
        );
        assert_eq!(action.name(), "extract");
        assert!(action.confirmation().is_none());
    }

    #[test]
    fn parse_insert() {
        let action =
            Action::from_request(&json!({"action": "insert", "path": "$.k", "value": 1})).unwrap();
        assert_eq!(
            action,
            Action::Insert {
                path: "$.k".into(),
                value: json!(1)
            }
        );
    }

    #[test]
    fn parse_patch_needs_only_value() {
        let action =
            Action::from_request(&json!({"action": "patch", "value": {"a": null}})).unwrap();
        assert_eq!(
            action,
            Action::Patch {
                value: json!({"a": null})
            }
        );
    }

    #[test]
    fn missing_action_key() {
        let err = Action::from_request(&json!({"path": "$.foo"})).unwrap_err();
        assert_eq!(err, ProtocolError::MissingField("action"));
    }

    #[test]
    fn non_object_body_counts_as_missing_action() {
        let err = Action::from_request(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err, ProtocolError::MissingField("action"));
        let err = Action::from_request(&json!("extract")).unwrap_err();
        assert_eq!(err, ProtocolError::MissingField("action"));
    }

    #[test]
    fn unknown_action() {
        let err = Action::from_request(&json!({"action": "merge"})).unwrap_err();
        assert_eq!(
            err,
            ProtocolError::InvalidAction {
                got: "merge".into()
            }
        );
    }

    #[test]
    fn non_string_action_is_invalid() {
        let err = Action::from_request(&json!({"action": 7})).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidAction { .. }));
    }

    #[test]
    fn path_is_checked_before_value() {
        // Missing both: the path error must win.
        let err = Action::from_request(&json!({"action": "insert"})).unwrap_err();
        assert_eq!(err, ProtocolError::MissingField("path"));

        let err =
            Action::from_request(&json!({"action": "insert", "path": "$.k"})).unwrap_err();
        assert_eq!(err, ProtocolError::MissingField("value"));
    }

    #[test]
    fn replace_and_set_require_both_fields() {
        for action in ["replace", "set"] {
            let err = Action::from_request(&json!({"action": action})).unwrap_err();
            assert_eq!(err, ProtocolError::MissingField("path"));
            let err =
                Action::from_request(&json!({"action": action, "path": "$.k"})).unwrap_err();
            assert_eq!(err, ProtocolError::MissingField("value"));
        }
    }

    #[test]
    fn remove_requires_only_path() {
        let action = Action::from_request(&json!({"action": "remove", "path": "$.k"})).unwrap();
        assert_eq!(action, Action::Remove { path: "$.k".into() });
    }

    #[test]
    fn null_value_is_a_present_value() {
        // `value: null` is present; only a truly absent key is missing.
        let action =
            Action::from_request(&json!({"action": "set", "path": "$.k", "value": null}))
                .unwrap();
        assert_eq!(
            action,
            Action::Set {
                path: "$.k".into(),
                value: Value::Null
            }
        );
    }

    #[test]
    fn non_string_path_is_rejected() {
        let err = Action::from_request(&json!({"action": "remove", "path": 3})).unwrap_err();
        assert_eq!(
            err,
            ProtocolError::InvalidField {
                field: "path",
                expected: "string"
            }
        );
    }

    #[test]
    fn every_mutation_has_a_confirmation() {
        let cases = [
            json!({"action": "insert", "path": "$.k", "value": 1}),
            json!({"action": "patch", "value": {}}),
            json!({"action": "remove", "path": "$.k"}),
            json!({"action": "replace", "path": "$.k", "value": 1}),
            json!({"action": "set", "path": "$.k", "value": 1}),
        ];
        for body in cases {
            let action = Action::from_request(&body).unwrap();
            let confirmation = action.confirmation().unwrap();
            assert!(confirmation.ends_with("value modified."));
        }
    }
}
