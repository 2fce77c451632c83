//! KyberLink Gateway server binary.
//!
//! Configuration (environment variables, `.env` honored):
//!   PORT                 - listen port (default: 45782)
//!   BACKEND_URL          - forwarding target (default: http://localhost:34890)
//!   CORS_ORIGIN          - Access-Control-Allow-Origin value (default: *)
//!   RATE_LIMIT_RPS       - handshake tokens per second per IP (default: 2.0)
//!   RATE_LIMIT_BURST     - handshake burst per IP (default: 100)
//!   KYBERLINK_LOG_FORMAT - "json" for structured logging, "pretty" for dev

use std::net::SocketAddr;

use kyberlink_gateway::config::Config;
use kyberlink_gateway::state::AppState;
use kyberlink_gateway::{app, middleware, replay, session};

fn init_tracing() {
    let log_format = std::env::var("KYBERLINK_LOG_FORMAT").unwrap_or_else(|_| "pretty".into());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "kyberlink_gateway=info".into());
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env();
    let state = AppState::new(config.clone());

    tokio::spawn(session::run_reaper(state.sessions.clone()));
    tokio::spawn(replay::run_reaper(state.replay.clone()));
    tokio::spawn(middleware::run_sweeper(state.clone()));

    let app = app(state);

    tracing::info!(
        port = config.port,
        backend = %config.backend_url,
        cors = %config.cors_origin,
        "starting KyberLink Gateway"
    );

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listener");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("server failed");
}
