//! Document storage backend for the depot document store.
//!
//! Documents are JSON values keyed by `(namespace, object)`. The store
//! exposes a fixed catalog of named operations; every mutating operation
//! carries a no-op guard so that an edit which would leave the document
//! unchanged (or which addresses a missing document or path) reports
//! [`MutateOutcome::Unchanged`] instead of writing.
//!
//! Two backends implement the [`DocumentStore`] seam:
//!
//! - [`SqliteStore`] — SQLite with the JSON1 extension behind a bounded
//!   `deadpool-sqlite` pool; the production backend.
//! - [`MemoryStore`] — a `RwLock`-protected map applying the same edit
//!   semantics in process; intended for tests and embedding.

pub mod catalog;
pub mod config;
pub mod error;
pub mod memory;
pub mod path;
pub mod sqlite;
pub mod traits;

pub use catalog::StatementId;
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{DocumentStore, MutateOutcome, Mutation};
