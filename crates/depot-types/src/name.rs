//! Namespace and object name validation.
//!
//! Valid names:
//! - Must be non-empty
//! - Must be at most 512 bytes
//! - Must not contain NUL or other ASCII control characters
//!
//! Names arrive as URL path segments, so the usual URL metacharacters never
//! reach this layer; the rules here guard what the router cannot.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypeError;

/// Maximum length of a namespace or object name, in bytes.
pub const MAX_NAME_LEN: usize = 512;

fn validate(name: &str) -> Result<(), TypeError> {
    if name.is_empty() {
        return Err(TypeError::InvalidName {
            name: name.to_string(),
            reason: "name must not be empty".into(),
        });
    }
    if name.len() > MAX_NAME_LEN {
        return Err(TypeError::InvalidName {
            name: name.to_string(),
            reason: format!("name exceeds {MAX_NAME_LEN} bytes"),
        });
    }
    if let Some(ch) = name.chars().find(|c| c.is_ascii_control()) {
        return Err(TypeError::InvalidName {
            name: name.to_string(),
            reason: format!("contains control character: {ch:?}"),
        });
    }
    Ok(())
}

/// A validated namespace identifier.
///
/// A namespace must exist before any object can be created under it; deleting
/// a namespace cascades to all of its objects.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespaceName(String);

impl NamespaceName {
    /// Validate and wrap a namespace name.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        validate(&name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NamespaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated object identifier within a namespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectName(String);

impl ObjectName {
    /// Validate and wrap an object name.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        validate(&name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
