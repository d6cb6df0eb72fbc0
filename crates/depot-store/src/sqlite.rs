use async_trait::async_trait;
use deadpool_sqlite::{Config, Pool, PoolConfig, Runtime, Status};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use depot_types::{DocumentKey, NamespaceName};

use crate::catalog::{self, StatementId};
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::path::JsonPath;
use crate::traits::{DocumentStore, MutateOutcome, Mutation};

/// SQLite-backed document store behind a bounded connection pool.
///
/// Each operation acquires one pooled connection, runs exactly one statement
/// from the catalog on the pool's blocking executor, and returns the
/// connection when the guard drops — on every exit path.
pub struct SqliteStore {
    pool: Pool,
}

impl SqliteStore {
    /// Open (or create) the database, bootstrap the schema, register the
    /// statement catalog, and pre-warm the pool to `pool_min` connections.
    pub async fn open(config: &StoreConfig) -> StoreResult<Self> {
        let mut cfg = Config::new(config.path.clone());
        cfg.pool = Some(PoolConfig::new(config.pool_max));
        let pool = cfg
            .create_pool(Runtime::Tokio1)
            .map_err(|e| StoreError::Pool(e.to_string()))?;

        let store = Self { pool };
        store
            .with_conn(|conn| {
                // WAL persists in the database file and lets concurrent
                // writers on separate connections queue instead of failing.
                conn.execute_batch("PRAGMA journal_mode = WAL;")?;
                conn.execute_batch(catalog::SCHEMA)?;
                catalog::register_all(conn)
            })
            .await?;
        store.prewarm(config.pool_min).await?;

        tracing::info!(
            path = %config.path.display(),
            pool_min = config.pool_min,
            pool_max = config.pool_max,
            "document store ready"
        );
        Ok(store)
    }

    /// Current pool accounting (size, available, waiting).
    pub fn pool_status(&self) -> Status {
        self.pool.status()
    }

    /// Eagerly create connections up to `min` by holding them simultaneously,
    /// then return them all to the pool.
    async fn prewarm(&self, min: usize) -> StoreResult<()> {
        let min = min.min(self.pool.status().max_size);
        let mut held = Vec::with_capacity(min);
        for _ in 0..min {
            held.push(
                self.pool
                    .get()
                    .await
                    .map_err(|e| StoreError::Pool(e.to_string()))?,
            );
        }
        drop(held);
        tracing::debug!(connections = min, "pool pre-warmed");
        Ok(())
    }

    /// Acquire a connection and run `f` on the blocking executor.
    ///
    /// Foreign-key enforcement and the busy timeout are per-connection
    /// settings in SQLite, so the pragmas run before every statement; both
    /// are no-ops once set.
    async fn with_conn<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Connection) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self
            .pool
            .get()
            .await
            .map_err(|e| StoreError::Pool(e.to_string()))?;
        let result = conn
            .interact(move |conn| {
                conn.execute_batch(
                    "PRAGMA foreign_keys = ON;\n\
                     PRAGMA busy_timeout = 5000;",
                )?;
                f(conn)
            })
            .await
            .map_err(|e| StoreError::Pool(e.to_string()))?;
        result.map_err(StoreError::backend)
    }
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool_status();
        f.debug_struct("SqliteStore")
            .field("pool_size", &status.size)
            .field("pool_available", &status.available)
            .finish()
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn create_namespace(&self, namespace: &NamespaceName) -> StoreResult<()> {
        let ns = namespace.as_str().to_string();
        self.with_conn(move |conn| {
            conn.prepare_cached(StatementId::CreateNamespace.sql())?
                .execute(params![ns])?;
            Ok(())
        })
        .await
    }

    async fn delete_namespace(&self, namespace: &NamespaceName) -> StoreResult<bool> {
        let ns = namespace.as_str().to_string();
        self.with_conn(move |conn| {
            let rows = conn
                .prepare_cached(StatementId::DeleteNamespace.sql())?
                .execute(params![ns])?;
            Ok(rows > 0)
        })
        .await
    }

    async fn upsert_object(&self, key: &DocumentKey, data: &Value) -> StoreResult<()> {
        let ns = key.namespace.as_str().to_string();
        let obj = key.object.as_str().to_string();
        let body = data.to_string();
        self.with_conn(move |conn| {
            conn.prepare_cached(StatementId::UpsertObject.sql())?
                .execute(params![ns, obj, body])?;
            Ok(())
        })
        .await
    }

    async fn get_object(&self, key: &DocumentKey) -> StoreResult<Option<Value>> {
        let ns = key.namespace.as_str().to_string();
        let obj = key.object.as_str().to_string();
        let text = self
            .with_conn(move |conn| {
                conn.prepare_cached(StatementId::GetObject.sql())?
                    .query_row(params![ns, obj], |row| row.get::<_, String>(0))
                    .optional()
            })
            .await?;
        match text {
            None => Ok(None),
            Some(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|e| StoreError::Serialization(e.to_string())),
        }
    }

    async fn extract(&self, key: &DocumentKey, path: &str) -> StoreResult<Option<Value>> {
        // Validate before dispatch: `->` would read a non-`$` right-hand
        // side as a bare field label rather than rejecting it.
        JsonPath::parse(path)?;
        let ns = key.namespace.as_str().to_string();
        let obj = key.object.as_str().to_string();
        let path = path.to_string();
        let text = self
            .with_conn(move |conn| {
                conn.prepare_cached(StatementId::Extract.sql())?
                    .query_row(params![ns, obj, path], |row| {
                        row.get::<_, Option<String>>(0)
                    })
                    .optional()
            })
            .await?;
        // Outer None: no such document. Inner None: path matched nothing.
        let Some(Some(text)) = text else {
            return Ok(None);
        };
        let value: Value = serde_json::from_str(&text)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        // JSON null at the path collapses to the same missing result.
        Ok(Some(value).filter(|v| !v.is_null()))
    }

    async fn mutate(&self, key: &DocumentKey, mutation: &Mutation) -> StoreResult<MutateOutcome> {
        if let Some(path) = mutation.path() {
            JsonPath::parse(path)?;
        }
        let ns = key.namespace.as_str().to_string();
        let obj = key.object.as_str().to_string();
        let mutation = mutation.clone();
        self.with_conn(move |conn| {
            let sql = mutation.statement().sql();
            let rows = match &mutation {
                Mutation::Insert { path, value }
                | Mutation::Replace { path, value }
                | Mutation::Set { path, value } => conn
                    .prepare_cached(sql)?
                    .execute(params![ns, obj, path, value.to_string()])?,
                Mutation::Patch { value } => conn
                    .prepare_cached(sql)?
                    .execute(params![ns, obj, value.to_string()])?,
                Mutation::Remove { path } => {
                    conn.prepare_cached(sql)?.execute(params![ns, obj, path])?
                }
            };
            Ok(if rows == 0 {
                MutateOutcome::Unchanged
            } else {
                MutateOutcome::Modified
            })
        })
        .await
    }
}
