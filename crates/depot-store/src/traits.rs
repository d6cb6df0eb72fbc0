use async_trait::async_trait;
use serde_json::Value;

use depot_types::{DocumentKey, NamespaceName};

use crate::error::StoreResult;

/// A document mutation, carrying the fields its operation requires.
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
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

impl Mutation {
    /// The JSON path this mutation addresses, if it takes one (`patch`
    /// operates on the whole document).
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Insert { path, .. }
            | Self::Remove { path }
            | Self::Replace { path, .. }
            | Self::Set { path, .. } => Some(path),
            Self::Patch { .. } => None,
        }
    }
}

/// Whether a mutation changed the stored document.
///
/// `Unchanged` is deliberately ambiguous: the document may not exist, the
/// path may not match, or the edit may be a true no-op. The store reports
/// only what the guard clause observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutateOutcome {
    Modified,
    Unchanged,
}

/// Namespaced JSON document store.
///
/// All implementations must satisfy these invariants:
/// - A namespace must exist before a document can be created under it;
///   violating this is a backend error, not a silent success.
/// - `(namespace, object)` determines at most one document.
/// - Every mutation is guarded: a write happens only when the computed
///   document differs from the current one, and `Unchanged` is reported
///   otherwise.
/// - Each call is a single atomic operation; concurrent conflicting writes
///   interleave at operation granularity, last committed wins.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create a namespace. Creating a namespace that already exists is a
    /// backend error.
    async fn create_namespace(&self, namespace: &NamespaceName) -> StoreResult<()>;

    /// Delete a namespace and, by cascade, every document under it.
    /// Returns `false` if the namespace did not exist.
    async fn delete_namespace(&self, namespace: &NamespaceName) -> StoreResult<bool>;

    /// Full replace-or-insert of a document's JSON body.
    async fn upsert_object(&self, key: &DocumentKey, data: &Value) -> StoreResult<()>;

    /// Read a document's JSON body. Returns `Ok(None)` if no document
    /// matches the key.
    async fn get_object(&self, key: &DocumentKey) -> StoreResult<Option<Value>>;

    /// Read the value at `path` inside the addressed document.
    ///
    /// Returns `Ok(None)` when the document is missing, the path matches
    /// nothing, or the value at the path is JSON null; the three cases are
    /// not distinguished.
    async fn extract(&self, key: &DocumentKey, path: &str) -> StoreResult<Option<Value>>;

    /// Apply a guarded mutation to the addressed document.
    async fn mutate(&self, key: &DocumentKey, mutation: &Mutation) -> StoreResult<MutateOutcome>;
}
