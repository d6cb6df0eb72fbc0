use std::sync::Arc;

use tokio::net::TcpListener;

use depot_store::{DocumentStore, SqliteStore};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::{build_router, AppState};

/// The depot HTTP server.
pub struct DepotServer {
    config: ServerConfig,
}

impl DepotServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router over an injected store (useful for testing).
    pub fn router(store: Arc<dyn DocumentStore>) -> axum::Router {
        build_router(AppState::new(store))
    }

    /// Open the store, bind, and serve until the process is stopped.
    pub async fn serve(self) -> ServerResult<()> {
        let store = SqliteStore::open(&self.config.store).await?;
        let app = build_router(AppState::new(Arc::new(store)));
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!("depot listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_construction() {
        let server = DepotServer::new(ServerConfig::default());
        assert_eq!(
            server.config().bind_addr,
            "127.0.0.1:3000".parse().unwrap()
        );
    }

    #[test]
    fn router_builds() {
        let store = Arc::new(depot_store::MemoryStore::new());
        let _router = DepotServer::router(store);
    }
}
