use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use depot_store::StoreConfig;

use crate::error::{ServerError, ServerResult};

/// Server configuration.
///
/// Layered at startup: defaults, then an optional TOML file, then `DEPOT_*`
/// environment variables (CLI flags are applied on top by the binary).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            store: StoreConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        toml::from_str(&text).map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))
    }

    /// Defaults, overlaid with the file (if any), overlaid with environment
    /// variables.
    pub fn load(file: Option<&Path>) -> ServerResult<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> ServerResult<()> {
        if let Ok(addr) = std::env::var("DEPOT_BIND_ADDR") {
            self.bind_addr = addr
                .parse()
                .map_err(|e| ServerError::Config(format!("DEPOT_BIND_ADDR: {e}")))?;
        }
        if let Ok(path) = std::env::var("DEPOT_DB_PATH") {
            self.store.path = path.into();
        }
        if let Ok(min) = std::env::var("DEPOT_POOL_MIN") {
            self.store.pool_min = min
                .parse()
                .map_err(|e| ServerError::Config(format!("DEPOT_POOL_MIN: {e}")))?;
        }
        if let Ok(max) = std::env::var("DEPOT_POOL_MAX") {
            self.store.pool_max = max
                .parse()
                .map_err(|e| ServerError::Config(format!("DEPOT_POOL_MAX: {e}")))?;
        }
        Ok(())
    }
}
