use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypeError;
use crate::name::{NamespaceName, ObjectName};

/// The `(namespace, object)` pair that uniquely addresses a document.
///
/// The pair is a composite primary key: it determines at most one document,
/// and the namespace component must reference an existing namespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentKey {
    pub namespace: NamespaceName,
    pub object: ObjectName,
}

impl DocumentKey {
    pub fn new(
        namespace: impl Into<String>,
        object: impl Into<String>,
    ) -> Result<Self, TypeError> {
        Ok(Self {
            namespace: NamespaceName::new(namespace)?,
            object: ObjectName::new(object)?,
        })
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.object)
    }
}
