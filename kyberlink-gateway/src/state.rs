//! Shared application state.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::middleware::RateLimiter;
use crate::replay::ReplayStore;
use crate::session::SessionStore;

/// Hard timeout on a backend call.
pub const BACKEND_TIMEOUT: Duration = Duration::from_secs(30);

pub struct AppState {
    pub config: Config,
    pub sessions: Arc<SessionStore>,
    pub replay: Arc<ReplayStore>,
    pub rate_limiter: RateLimiter,
    pub http: reqwest::Client,
}

pub type Shared = Arc<AppState>;

impl AppState {
    pub fn new(config: Config) -> Shared {
        Self::with_stores(
            config,
            Arc::new(SessionStore::new()),
            Arc::new(ReplayStore::new()),
        )
    }

    /// Store injection for tests.
    pub fn with_stores(
        config: Config,
        sessions: Arc<SessionStore>,
        replay: Arc<ReplayStore>,
    ) -> Shared {
        let http = reqwest::Client::builder()
            .timeout(BACKEND_TIMEOUT)
            .build()
            .expect("failed to build http client");

        let rate_limiter = RateLimiter::new(config.rate_limit_rps, config.rate_limit_burst);

        Arc::new(AppState {
            config,
            sessions,
            replay,
            rate_limiter,
            http,
        })
    }
}
