//! Nonce/timestamp replay protection.
//!
//! A decrypted inner request must carry a timestamp inside the freshness
//! window and a nonce unseen within it. Nonces are opaque strings compared
//! as bytes; the outer transport's body cap bounds their size.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Freshness window for both the timestamp and nonce uniqueness.
pub const REPLAY_TTL: Duration = Duration::from_secs(60);

/// Sweep cadence for the background reaper.
pub const REAP_INTERVAL: Duration = Duration::from_secs(60);

pub struct ReplayStore {
    seen: Mutex<HashMap<String, Instant>>,
    ttl: Duration,
}

impl Default for ReplayStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplayStore {
    pub fn new() -> Self {
        Self::with_ttl(REPLAY_TTL)
    }

    /// TTL injection for tests.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            seen: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// True when the timestamp falls outside the freshness window or the
    /// nonce was already observed inside it. Fresh nonces are recorded.
    pub fn is_replay(&self, nonce: &str, timestamp: i64) -> bool {
        let mut seen = self.seen.lock().unwrap();

        let now = unix_now();
        let window = self.ttl.as_secs() as i64;
        if now - timestamp > window {
            tracing::warn!(age_secs = now - timestamp, "timestamp too old");
            return true;
        }
        if timestamp - now > window {
            tracing::warn!(ahead_secs = timestamp - now, "timestamp from the future");
            return true;
        }

        if seen.contains_key(nonce) {
            tracing::warn!("duplicate nonce");
            return true;
        }

        seen.insert(nonce.to_string(), Instant::now());
        false
    }

    /// Drop nonces older than the window.
    pub fn reap(&self) {
        let ttl = self.ttl;
        let mut seen = self.seen.lock().unwrap();
        seen.retain(|_, observed_at| observed_at.elapsed() <= ttl);
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Background sweep on a fixed interval.
pub async fn run_reaper(store: Arc<ReplayStore>) {
    let mut interval = tokio::time::interval(REAP_INTERVAL);
    loop {
        interval.tick().await;
        store.reap();
    }
}
