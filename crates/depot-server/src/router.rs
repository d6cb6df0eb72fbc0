use std::sync::Arc;

use axum::routing::{get, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use depot_store::DocumentStore;

use crate::handler;

/// Shared request state: the injected document store.
///
/// The store (and the pool inside it) is constructed once by the process and
/// handed to the router; handlers never reach for ambient state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

/// Build the axum router with all depot endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handler::health))
        .route(
            "/:namespace",
            put(handler::create_namespace).delete(handler::delete_namespace),
        )
        .route(
            "/:namespace/:object",
            get(handler::get_object)
                .put(handler::put_object)
                .patch(handler::patch_object),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
