//! Environment configuration.

use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    /// Listen port.
    pub port: u16,
    /// Base URL every decrypted request is forwarded to.
    pub backend_url: String,
    /// `Access-Control-Allow-Origin` value.
    pub cors_origin: String,
    /// Handshake tokens per second per client IP.
    pub rate_limit_rps: f64,
    /// Handshake burst capacity per client IP.
    pub rate_limit_burst: u32,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(45782);
        let backend_url =
            env::var("BACKEND_URL").unwrap_or_else(|_| "http://localhost:34890".into());
        let cors_origin = env::var("CORS_ORIGIN")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "*".into());
        let rate_limit_rps = env::var("RATE_LIMIT_RPS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2.0);
        let rate_limit_burst = env::var("RATE_LIMIT_BURST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100);

        Self {
            port,
            backend_url,
            cors_origin,
            rate_limit_rps,
            rate_limit_burst,
        }
    }
}
