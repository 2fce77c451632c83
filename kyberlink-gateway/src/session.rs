//! Ephemeral one-shot session store.
//!
//! One handshake mints one ML-KEM-1024 keypair under a random 256-bit id.
//! The private key stays readable until the record expires, but the request
//! pipeline burns the record after its single secure request via
//! [`SessionGuard`]. Records never survive the process; the store is purely
//! in-memory.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use kyberlink_envelope::{codec, KemProvider, MlKem1024Provider, PublicKey, SecretKey};

/// Sessions live for five minutes between handshake and secure request.
pub const SESSION_TTL: Duration = Duration::from_secs(300);

/// Sweep cadence for the background reaper.
pub const REAP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug)]
pub enum SessionError {
    NotFound,
    Expired,
    Keygen,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "session not found"),
            Self::Expired => write!(f, "session expired"),
            Self::Keygen => write!(f, "session key generation failed"),
        }
    }
}

impl std::error::Error for SessionError {}

struct SessionRecord {
    private_key: Arc<SecretKey>,
    created_at: Instant,
    expires_at: Instant,
}

pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_ttl(SESSION_TTL)
    }

    /// TTL injection for tests.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Mint a fresh keypair under a new 64-hex-character session id.
    pub fn generate_session(&self) -> Result<(String, PublicKey), SessionError> {
        let (public_key, private_key) = MlKem1024Provider::keygen();
        let id_bytes = codec::random_bytes(32).map_err(|_| SessionError::Keygen)?;
        let session_id = codec::hex_encode(&id_bytes);

        let now = Instant::now();
        let record = SessionRecord {
            private_key: Arc::new(private_key),
            created_at: now,
            expires_at: now + self.ttl,
        };

        let mut sessions = self.sessions.write().unwrap();
        sessions.insert(session_id.clone(), record);

        Ok((session_id, public_key))
    }

    /// Look up the private key for a live session.
    ///
    /// The record is left in place; burning it is the caller's job (see
    /// [`SessionGuard`]), so the lookup itself stays read-only.
    pub fn private_key(&self, session_id: &str) -> Result<Arc<SecretKey>, SessionError> {
        let sessions = self.sessions.read().unwrap();
        let record = sessions.get(session_id).ok_or(SessionError::NotFound)?;

        if Instant::now() > record.expires_at {
            return Err(SessionError::Expired);
        }

        Ok(record.private_key.clone())
    }

    /// Remove a session. Idempotent.
    pub fn delete_session(&self, session_id: &str) {
        let mut sessions = self.sessions.write().unwrap();
        if let Some(record) = sessions.remove(session_id) {
            tracing::debug!(
                session = %id_prefix(session_id),
                age_secs = record.created_at.elapsed().as_secs(),
                "session burned"
            );
        }
    }

    /// Drop every expired record. Lookup enforces expiry regardless; the
    /// sweep only frees memory.
    pub fn reap(&self) {
        let now = Instant::now();
        let mut sessions = self.sessions.write().unwrap();
        sessions.retain(|_, record| now <= record.expires_at);
    }
}

/// Log-safe prefix of a session id. Full ids never appear in logs.
///
/// Ids minted here are hex, but the request path also feeds this
/// client-supplied strings, so cut on a char boundary.
pub fn id_prefix(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Scope guard that burns a session on drop.
///
/// Created right after a successful private-key lookup so the one-shot
/// guarantee holds on every exit path, including handler cancellation.
pub struct SessionGuard {
    store: Arc<SessionStore>,
    session_id: String,
}

impl SessionGuard {
    pub fn new(store: Arc<SessionStore>, session_id: String) -> Self {
        Self { store, session_id }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.store.delete_session(&self.session_id);
    }
}

/// Background sweep on a fixed interval.
pub async fn run_reaper(store: Arc<SessionStore>) {
    let mut interval = tokio::time::interval(REAP_INTERVAL);
    loop {
        interval.tick().await;
        store.reap();
    }
}
