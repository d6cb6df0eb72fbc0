use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the SQLite-backed store.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the SQLite database file.
    pub path: PathBuf,
    /// Connections opened eagerly at startup.
    pub pool_min: usize,
    /// Upper bound on concurrently open connections. Acquisition suspends
    /// once the pool is exhausted.
    pub pool_max: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("depot.db"),
            pool_min: 5,
            pool_max: 1000,
        }
    }
}
