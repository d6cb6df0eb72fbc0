use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use depot_types::{DocumentKey, NamespaceName};

use crate::error::{StoreError, StoreResult};
use crate::path::{self, EditMode, JsonPath};
use crate::traits::{DocumentStore, MutateOutcome, Mutation};

/// In-memory, HashMap-based document store.
///
/// Intended for tests and embedding. Applies the same edit semantics as the
/// SQL templates, with the no-op guard expressed directly: a mutation is
/// applied to a copy of the document and committed only when the result
/// differs. Constraint failures carry the same messages SQLite would
/// produce, so callers observe one backend vocabulary.
pub struct MemoryStore {
    namespaces: RwLock<HashMap<String, HashMap<String, Value>>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            namespaces: RwLock::new(HashMap::new()),
        }
    }

    /// Number of namespaces currently stored.
    pub fn namespace_count(&self) -> usize {
        self.namespaces.read().expect("lock poisoned").len()
    }

    /// Number of documents across all namespaces.
    pub fn object_count(&self) -> usize {
        self.namespaces
            .read()
            .expect("lock poisoned")
            .values()
            .map(HashMap::len)
            .sum()
    }

    /// Remove all namespaces and documents.
    pub fn clear(&self) {
        self.namespaces.write().expect("lock poisoned").clear();
    }

    fn apply(doc: &mut Value, mutation: &Mutation) -> StoreResult<()> {
        match mutation {
            Mutation::Insert { path, value } => {
                let path = JsonPath::parse(path)?;
                path::edit(doc, &path, value.clone(), EditMode::Insert);
            }
            Mutation::Patch { value } => path::merge_patch(doc, value),
            Mutation::Remove { path } => {
                let path = JsonPath::parse(path)?;
                path::remove(doc, &path);
            }
            Mutation::Replace { path, value } => {
                let path = JsonPath::parse(path)?;
                path::edit(doc, &path, value.clone(), EditMode::Replace);
            }
            Mutation::Set { path, value } => {
                let path = JsonPath::parse(path)?;
                path::edit(doc, &path, value.clone(), EditMode::Set);
            }
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("namespace_count", &self.namespace_count())
            .field("object_count", &self.object_count())
            .finish()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create_namespace(&self, namespace: &NamespaceName) -> StoreResult<()> {
        let mut map = self.namespaces.write().expect("lock poisoned");
        if map.contains_key(namespace.as_str()) {
            return Err(StoreError::Backend(
                "UNIQUE constraint failed: namespace.namespace".into(),
            ));
        }
        map.insert(namespace.as_str().to_string(), HashMap::new());
        Ok(())
    }

    async fn delete_namespace(&self, namespace: &NamespaceName) -> StoreResult<bool> {
        let mut map = self.namespaces.write().expect("lock poisoned");
        Ok(map.remove(namespace.as_str()).is_some())
    }

    async fn upsert_object(&self, key: &DocumentKey, data: &Value) -> StoreResult<()> {
        let mut map = self.namespaces.write().expect("lock poisoned");
        let objects = map
            .get_mut(key.namespace.as_str())
            .ok_or_else(|| StoreError::Backend("FOREIGN KEY constraint failed".into()))?;
        objects.insert(key.object.as_str().to_string(), data.clone());
        Ok(())
    }

    async fn get_object(&self, key: &DocumentKey) -> StoreResult<Option<Value>> {
        let map = self.namespaces.read().expect("lock poisoned");
        Ok(map
            .get(key.namespace.as_str())
            .and_then(|objects| objects.get(key.object.as_str()))
            .cloned())
    }

    async fn extract(&self, key: &DocumentKey, path: &str) -> StoreResult<Option<Value>> {
        let parsed = JsonPath::parse(path)?;
        let map = self.namespaces.read().expect("lock poisoned");
        let doc = map
            .get(key.namespace.as_str())
            .and_then(|objects| objects.get(key.object.as_str()));
        let Some(doc) = doc else {
            return Ok(None);
        };
        // Absent and JSON null collapse to the same missing result.
        Ok(path::extract(doc, &parsed)
            .filter(|v| !v.is_null())
            .cloned())
    }

    async fn mutate(&self, key: &DocumentKey, mutation: &Mutation) -> StoreResult<MutateOutcome> {
        if let Some(path) = mutation.path() {
            JsonPath::parse(path)?;
        }
        let mut map = self.namespaces.write().expect("lock poisoned");
        let doc = map
            .get_mut(key.namespace.as_str())
            .and_then(|objects| objects.get_mut(key.object.as_str()));
        let Some(doc) = doc else {
            // No matching row: zero rows affected.
            return Ok(MutateOutcome::Unchanged);
        };
        let mut next = doc.clone();
        Self::apply(&mut next, mutation)?;
        if next == *doc {
            return Ok(MutateOutcome::Unchanged);
        }
        *doc = next;
        Ok(MutateOutcome::Modified)
    }
}
