//! KyberLink Gateway
//!
//! A post-quantum secure proxy: clients establish an ephemeral ML-KEM-1024
//! session, wrap their real request in a double-encrypted envelope, and the
//! gateway forwards the decrypted call to a private backend before sealing
//! the response to a client-chosen key. Sessions are one-shot and a replay
//! window rejects stale or duplicated inner requests.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod replay;
pub mod session;
pub mod state;
pub mod types;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::state::Shared;

/// Inbound request body ceiling.
pub const MAX_BODY_BYTES: usize = 1 << 20;

/// Build the gateway router with all middleware attached.
pub fn app(state: Shared) -> Router {
    Router::new()
        .route(
            "/kempublic",
            get(handlers::init_session)
                .route_layer(from_fn_with_state(state.clone(), middleware::rate_limit_middleware)),
        )
        .route("/gateway", post(handlers::gateway))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(from_fn_with_state(state.clone(), middleware::cors_middleware))
        .with_state(state)
}
