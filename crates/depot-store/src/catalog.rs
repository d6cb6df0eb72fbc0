//! The fixed catalog of named store operations.
//!
//! Operation names and parameter arities are known to both the dispatcher
//! and the store at startup. Registration is idempotent: bootstrap prepares
//! every template on a live connection, which both validates the SQL and
//! seeds the per-connection statement cache (a statement already cached under
//! the same text is simply reused).
//!
//! Every UPDATE template ends with the no-op guard
//! `AND data != json_<fn>(...)`: the write commits only when the computed
//! document differs from the stored one, so a no-op edit — or a path or
//! document that matches nothing — reports zero rows affected.

use rusqlite::Connection;

use crate::traits::Mutation;

/// Table schema. `json_data.namespace` references the namespace table with
/// cascade semantics, so deleting a namespace deletes its documents.
pub const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS namespace (
    namespace TEXT PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS json_data (
    namespace   TEXT NOT NULL,
    object_name TEXT NOT NULL,
    data        TEXT NOT NULL,
    PRIMARY KEY (namespace, object_name),
    FOREIGN KEY (namespace) REFERENCES namespace(namespace)
        ON UPDATE CASCADE ON DELETE CASCADE
);
";

/// Identifier of a catalog operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatementId {
    CreateNamespace,
    DeleteNamespace,
    UpsertObject,
    GetObject,
    Extract,
    Insert,
    Patch,
    Remove,
    Replace,
    Set,
}

impl StatementId {
    pub const ALL: [StatementId; 10] = [
        StatementId::CreateNamespace,
        StatementId::DeleteNamespace,
        StatementId::UpsertObject,
        StatementId::GetObject,
        StatementId::Extract,
        StatementId::Insert,
        StatementId::Patch,
        StatementId::Remove,
        StatementId::Replace,
        StatementId::Set,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::CreateNamespace => "create_namespace",
            Self::DeleteNamespace => "delete_namespace",
            Self::UpsertObject => "upsert_object",
            Self::GetObject => "get_object",
            Self::Extract => "extract",
            Self::Insert => "insert",
            Self::Patch => "patch",
            Self::Remove => "remove",
            Self::Replace => "replace",
            Self::Set => "set",
        }
    }

    /// The parameterized SQL template for this operation.
    ///
    /// `extract` uses the `->` operator rather than `json_extract` so the
    /// result is always a JSON text representation: strings stay quoted and
    /// true/false survive (json_extract would flatten them to SQL scalars).
    pub fn sql(self) -> &'static str {
        match self {
            Self::CreateNamespace => "INSERT INTO namespace (namespace) VALUES (?1)",
            Self::DeleteNamespace => "DELETE FROM namespace WHERE namespace = ?1",
            Self::UpsertObject => {
                "INSERT OR REPLACE INTO json_data (namespace, object_name, data) \
                 VALUES (?1, ?2, json(?3))"
            }
            Self::GetObject => {
                "SELECT data FROM json_data WHERE namespace = ?1 AND object_name = ?2"
            }
            Self::Extract => {
                "SELECT data -> ?3 FROM json_data \
                 WHERE namespace = ?1 AND object_name = ?2"
            }
            Self::Insert => {
                "UPDATE json_data SET data = json_insert(data, ?3, json(?4)) \
                 WHERE namespace = ?1 AND object_name = ?2 \
                 AND data != json_insert(data, ?3, json(?4))"
            }
            Self::Patch => {
                "UPDATE json_data SET data = json_patch(data, json(?3)) \
                 WHERE namespace = ?1 AND object_name = ?2 \
                 AND data != json_patch(data, json(?3))"
            }
            Self::Remove => {
                "UPDATE json_data SET data = json_remove(data, ?3) \
                 WHERE namespace = ?1 AND object_name = ?2 \
                 AND data != json_remove(data, ?3)"
            }
            Self::Replace => {
                "UPDATE json_data SET data = json_replace(data, ?3, json(?4)) \
                 WHERE namespace = ?1 AND object_name = ?2 \
                 AND data != json_replace(data, ?3, json(?4))"
            }
            Self::Set => {
                "UPDATE json_data SET data = json_set(data, ?3, json(?4)) \
                 WHERE namespace = ?1 AND object_name = ?2 \
                 AND data != json_set(data, ?3, json(?4))"
            }
        }
    }
}

impl Mutation {
    /// The catalog operation backing this mutation.
    pub fn statement(&self) -> StatementId {
        match self {
            Mutation::Insert { .. } => StatementId::Insert,
            Mutation::Patch { .. } => StatementId::Patch,
            Mutation::Remove { .. } => StatementId::Remove,
            Mutation::Replace { .. } => StatementId::Replace,
            Mutation::Set { .. } => StatementId::Set,
        }
    }
}

/// Prepare every catalog statement on the given connection.
///
/// Run once at bootstrap to validate the templates, and implicitly on each
/// pooled connection through the statement cache.
pub fn register_all(conn: &Connection) -> rusqlite::Result<()> {
    for id in StatementId::ALL {
        conn.prepare_cached(id.sql())?;
        tracing::debug!(statement = id.name(), "registered statement");
    }
    tracing::info!(count = StatementId::ALL.len(), "statement catalog registered");
    Ok(())
}
