//! HTTP gateway for the depot document store.
//!
//! Thin axum layer over the operation dispatcher: path parameters and
//! request bodies come in, one store operation runs per request, and the
//! result is mapped onto the uniform response envelopes.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use dispatch::{dispatch, DispatchOutcome};
pub use error::{ApiError, ServerError, ServerResult};
pub use router::{build_router, AppState};
pub use server::DepotServer;
