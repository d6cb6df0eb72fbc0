//! The operation dispatcher.
//!
//! Maps a validated action request onto exactly one store operation and
//! normalizes the result. Validation failures never reach the store: parsing
//! the body into an [`Action`] happens before a connection is touched, so a
//! request with a missing field or an unknown action costs zero store round
//! trips.

use serde_json::Value;

use depot_protocol::{confirm, Action};
use depot_store::{DocumentStore, MutateOutcome, Mutation};
use depot_types::DocumentKey;

use crate::error::ApiError;

/// Successful dispatch result.
#[derive(Clone, Debug, PartialEq)]
pub enum DispatchOutcome {
    /// The value `extract` found at the requested path.
    Extracted(Value),
    /// The fixed confirmation message of a mutation that modified the
    /// document.
    Confirmed(&'static str),
}

/// Validate `body`, run the matching store operation, and interpret the
/// result.
///
/// Result interpretation:
/// - `extract` resolving to nothing (or JSON null) → [`ApiError::PathNotFound`];
/// - a mutation affecting zero rows → [`ApiError::NotModified`];
/// - store failures propagate as [`ApiError::Store`] with the backend
///   message intact.
pub async fn dispatch(
    store: &dyn DocumentStore,
    key: &DocumentKey,
    body: &Value,
) -> Result<DispatchOutcome, ApiError> {
    let action = Action::from_request(body)?;
    tracing::debug!(key = %key, action = action.name(), "dispatching action");

    match action {
        Action::Extract { path } => match store.extract(key, &path).await? {
            Some(value) => Ok(DispatchOutcome::Extracted(value)),
            None => Err(ApiError::PathNotFound),
        },
        Action::Insert { path, value } => {
            run_mutation(store, key, Mutation::Insert { path, value }, confirm::INSERT).await
        }
        Action::Patch { value } => {
            run_mutation(store, key, Mutation::Patch { value }, confirm::PATCH).await
        }
        Action::Remove { path } => {
            run_mutation(store, key, Mutation::Remove { path }, confirm::REMOVE).await
        }
        Action::Replace { path, value } => {
            run_mutation(
                store,
                key,
                Mutation::Replace { path, value },
                confirm::REPLACE,
            )
            .await
        }
        Action::Set { path, value } => {
            run_mutation(store, key, Mutation::Set { path, value }, confirm::SET).await
        }
    }
}

async fn run_mutation(
    store: &dyn DocumentStore,
    key: &DocumentKey,
    mutation: Mutation,
    confirmation: &'static str,
) -> Result<DispatchOutcome, ApiError> {
    match store.mutate(key, &mutation).await? {
        MutateOutcome::Modified => Ok(DispatchOutcome::Confirmed(confirmation)),
        MutateOutcome::Unchanged => Err(ApiError::NotModified),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use depot_protocol::ProtocolError;
    use depot_store::{MemoryStore, StoreResult};
    use depot_types::NamespaceName;

    /// Wrapper that counts store round trips.
    struct CountingStore {
        inner: MemoryStore,
        round_trips: AtomicUsize,
    }

    impl CountingStore {
        fn new(inner: MemoryStore) -> Self {
            Self {
                inner,
                round_trips: AtomicUsize::new(0),
            }
        }

        fn round_trips(&self) -> usize {
            self.round_trips.load(Ordering::SeqCst)
        }

        fn tick(&self) {
            self.round_trips.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl DocumentStore for CountingStore {
        async fn create_namespace(&self, namespace: &NamespaceName) -> StoreResult<()> {
            self.tick();
            self.inner.create_namespace(namespace).await
        }

        async fn delete_namespace(&self, namespace: &NamespaceName) -> StoreResult<bool> {
            self.tick();
            self.inner.delete_namespace(namespace).await
        }

        async fn upsert_object(&self, key: &DocumentKey, data: &Value) -> StoreResult<()> {
            self.tick();
            self.inner.upsert_object(key, data).await
        }

        async fn get_object(&self, key: &DocumentKey) -> StoreResult<Option<Value>> {
            self.tick();
            self.inner.get_object(key).await
        }

        async fn extract(&self, key: &DocumentKey, path: &str) -> StoreResult<Option<Value>> {
            self.tick();
            self.inner.extract(key, path).await
        }

        async fn mutate(
            &self,
            key: &DocumentKey,
            mutation: &Mutation,
        ) -> StoreResult<MutateOutcome> {
            self.tick();
            self.inner.mutate(key, mutation).await
        }
    }

    async fn seeded_store(doc: Value) -> (Arc<CountingStore>, DocumentKey) {
        let inner = MemoryStore::new();
        let ns = NamespaceName::new("app").unwrap();
        inner.create_namespace(&ns).await.unwrap();
        let key = DocumentKey::new("app", "doc").unwrap();
        inner.upsert_object(&key, &doc).await.unwrap();
        (Arc::new(CountingStore::new(inner)), key)
    }

    #[tokio::test]
    async fn extract_returns_the_value() {
        let (store, key) = seeded_store(json!({"foo": "bar"})).await;
        let outcome = dispatch(store.as_ref(), &key, &json!({"action": "extract", "path": "$.foo"}))
            .await
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Extracted(json!("bar")));
    }

    #[tokio::test]
    async fn extract_missing_path_is_path_not_found() {
        let (store, key) = seeded_store(json!({"foo": "bar"})).await;
        let err = dispatch(store.as_ref(), &key, &json!({"action": "extract", "path": "$.nope"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::PathNotFound));
    }

    #[tokio::test]
    async fn mutation_returns_its_confirmation() {
        let (store, key) = seeded_store(json!({})).await;
        let outcome = dispatch(
            store.as_ref(),
            &key,
            &json!({"action": "set", "path": "$.k", "value": 1}),
        )
        .await
        .unwrap();
        assert_eq!(outcome, DispatchOutcome::Confirmed(confirm::SET));
    }

    #[tokio::test]
    async fn unchanged_mutation_is_not_modified() {
        let (store, key) = seeded_store(json!({"k": 1})).await;
        let err = dispatch(
            store.as_ref(),
            &key,
            &json!({"action": "set", "path": "$.k", "value": 1}),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::NotModified));
    }

    #[tokio::test]
    async fn validation_failure_costs_zero_round_trips() {
        let (store, key) = seeded_store(json!({})).await;
        let before = store.round_trips();

        let err = dispatch(store.as_ref(), &key, &json!({"action": "insert"}))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Protocol(ProtocolError::MissingField("path"))
        ));

        let err = dispatch(store.as_ref(), &key, &json!({"action": "warp"}))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Protocol(ProtocolError::InvalidAction { .. })
        ));

        let err = dispatch(store.as_ref(), &key, &json!({})).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Protocol(ProtocolError::MissingField("action"))
        ));

        assert_eq!(store.round_trips(), before, "no store call may happen");
    }

    #[tokio::test]
    async fn successful_dispatch_costs_exactly_one_round_trip() {
        let (store, key) = seeded_store(json!({})).await;
        let before = store.round_trips();
        dispatch(
            store.as_ref(),
            &key,
            &json!({"action": "insert", "path": "$.k", "value": 1}),
        )
        .await
        .unwrap();
        assert_eq!(store.round_trips(), before + 1);
    }

    #[tokio::test]
    async fn missing_namespace_mutation_is_not_modified() {
        let (store, _) = seeded_store(json!({})).await;
        // A key under a namespace that was never created: zero rows
        // affected, not a store error.
        let key = DocumentKey::new("ghost", "doc").unwrap();
        let err = dispatch(
            store.as_ref(),
            &key,
            &json!({"action": "set", "path": "$.k", "value": 1}),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::NotModified));
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let (store, key) = seeded_store(json!({})).await;
        let err = dispatch(
            store.as_ref(),
            &key,
            &json!({"action": "set", "path": "not-a-path", "value": 1}),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Store(_)));
    }
}
