//! The four-phase request pipeline.
//!
//! Phase 1 (`GET /kempublic`): mint a one-shot session, hand out its public
//! key. Phase 2 (`POST /gateway`): decapsulate the client's ciphertext and
//! open the envelope. Phase 3: forward the decrypted call to the backend.
//! Phase 4: encapsulate against the client's response key and seal the
//! backend's bytes back into an envelope.
//!
//! Decrypt-side failures all answer with the same generic strings; the
//! sub-cause stays in the logs.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kyberlink_envelope::{codec, envelope, wire, KemProvider, MlKem1024Provider, PublicKey};

use crate::session::{id_prefix, SessionGuard};
use crate::state::Shared;
use crate::types::{ApiError, HandshakeResponse, InnerRequest, SecureRequest, SecureResponse};

/// Hard ceiling on a backend response body.
pub const BACKEND_RESPONSE_CAP: usize = 10 << 20;

fn err(status: StatusCode, msg: impl Into<String>) -> Response {
    (
        status,
        Json(ApiError {
            error: msg.into(),
        }),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// Phase 1 — handshake
// ---------------------------------------------------------------------------

pub async fn init_session(State(state): State<Shared>) -> Response {
    tracing::info!("handshake request");

    let (session_id, public_key) = match state.sessions.generate_session() {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!(error = %e, "session generation failed");
            return err(StatusCode::INTERNAL_SERVER_ERROR, "Session Generation failed");
        }
    };

    tracing::info!(session = %id_prefix(&session_id), "session created");

    Json(HandshakeResponse {
        session_id,
        public_key: codec::base64_encode(&public_key.to_bytes()),
    })
    .into_response()
}

// ---------------------------------------------------------------------------
// Phases 2–4 — secure request
// ---------------------------------------------------------------------------

pub async fn gateway(
    State(state): State<Shared>,
    payload: Result<Json<SecureRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(req)) = payload else {
        return err(StatusCode::BAD_REQUEST, "Invalid request format");
    };

    let session_id = req.session_id.clone();
    tracing::info!(
        v = req.version,
        session = %id_prefix(&session_id),
        ct_len = req.secret_ciphertext.len(),
        payload_len = req.encrypted_data.len(),
        "secure request received"
    );

    let private_key = match state.sessions.private_key(&session_id) {
        Ok(sk) => sk,
        Err(e) => {
            tracing::warn!(session = %id_prefix(&session_id), error = %e, "session lookup failed");
            return err(StatusCode::UNAUTHORIZED, "Invalid or expired session");
        }
    };

    // Burns the session on every exit path below, including cancellation.
    let _guard = SessionGuard::new(state.sessions.clone(), session_id.clone());

    let secret_ciphertext = match codec::base64_decode(&req.secret_ciphertext) {
        Ok(ct) => ct,
        Err(_) => return err(StatusCode::BAD_REQUEST, "Invalid secret ciphertext"),
    };

    let shared_secret = match MlKem1024Provider::decapsulate(&private_key, &secret_ciphertext) {
        Ok(ss) => ss,
        Err(_) => {
            tracing::warn!(session = %id_prefix(&session_id), "decapsulation failed");
            return err(StatusCode::BAD_REQUEST, "Decapsulation failed");
        }
    };

    let encrypted_payload = match codec::base64_decode(&req.encrypted_data) {
        Ok(data) => data,
        Err(_) => return err(StatusCode::BAD_REQUEST, "Invalid data encoding"),
    };

    let inner_json = match envelope::open(&encrypted_payload, &shared_secret, &session_id) {
        Ok(pt) => pt,
        Err(_) => {
            tracing::warn!(session = %id_prefix(&session_id), "envelope decryption failed");
            return err(StatusCode::BAD_REQUEST, "Decryption failed");
        }
    };

    let inner: InnerRequest = match serde_json::from_slice(&inner_json) {
        Ok(inner) => inner,
        Err(_) => return err(StatusCode::BAD_REQUEST, "Invalid JSON"),
    };

    if state.replay.is_replay(&inner.nonce, inner.timestamp) {
        tracing::warn!(session = %id_prefix(&session_id), "replay detected");
        return err(StatusCode::UNAUTHORIZED, "Replay Detected");
    }

    if let Err(msg) = validate_final_api(&inner.final_api) {
        tracing::warn!(path = %inner.final_api, "rejected target path");
        return err(StatusCode::BAD_REQUEST, msg);
    }

    let target_url = format!("{}{}", state.config.backend_url, inner.final_api);
    tracing::info!(method = %inner.method, target = %target_url, "forwarding to backend");

    let body = match forward_to_backend(&state, &inner, &target_url).await {
        Ok(body) => body,
        Err(resp) => return resp,
    };

    tracing::info!(bytes = body.len(), "backend response received");

    // Phase 4: encrypt the response to the key the client chose.
    let client_pk_bytes = match codec::base64_decode(&req.client_public_key) {
        Ok(bytes) => bytes,
        Err(_) => return err(StatusCode::BAD_REQUEST, "Invalid public_2 key"),
    };

    let client_pk = match PublicKey::from_bytes(&client_pk_bytes) {
        Ok(pk) => pk,
        Err(_) => return err(StatusCode::BAD_REQUEST, "Unmarshal public_2 failed"),
    };

    let (response_secret, kem_ct) = match MlKem1024Provider::encapsulate(&client_pk) {
        Ok(pair) => pair,
        Err(_) => return err(StatusCode::INTERNAL_SERVER_ERROR, "Response Encap failure"),
    };

    let (enc_data, enc_salt_iv) = match envelope::seal_split(&body, &response_secret, &session_id)
    {
        Ok(parts) => parts,
        Err(_) => return err(StatusCode::INTERNAL_SERVER_ERROR, "Response Encryption failure"),
    };

    let mut combined = Vec::with_capacity(kem_ct.len() + enc_salt_iv.len());
    combined.extend_from_slice(&kem_ct);
    combined.extend_from_slice(&enc_salt_iv);

    tracing::info!(session = %id_prefix(&session_id), "sending encrypted response");

    Json(SecureResponse {
        version: wire::PROTOCOL_VERSION,
        secret_ciphertext: codec::base64_encode(&combined),
        encrypted_data: codec::base64_encode(&enc_data),
    })
    .into_response()
}

// ---------------------------------------------------------------------------
// SSRF guard
// ---------------------------------------------------------------------------

/// Only a rooted relative path may reach the backend.
pub fn validate_final_api(path: &str) -> Result<(), &'static str> {
    if path.starts_with("http://") || path.starts_with("https://") {
        return Err("Absolute URLs not allowed");
    }
    if !path.starts_with('/') {
        return Err("Invalid API path");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Phase 3 — backend call
// ---------------------------------------------------------------------------

async fn forward_to_backend(
    state: &Shared,
    inner: &InnerRequest,
    target_url: &str,
) -> Result<Vec<u8>, Response> {
    let method = match reqwest::Method::from_bytes(inner.method.as_bytes()) {
        Ok(m) => m,
        Err(_) => return Err(err(StatusCode::INTERNAL_SERVER_ERROR, "Internal Proxy Error")),
    };

    let mut request = state
        .http
        .request(method, target_url)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .header("X-Kyber-Proxy", "true");

    if let Some(payload) = &inner.payload {
        let body = serde_json::to_vec(payload)
            .map_err(|_| err(StatusCode::INTERNAL_SERVER_ERROR, "Internal Proxy Error"))?;
        request = request.body(body);
    }

    let mut response = match request.send().await {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(error = %e, "backend unreachable");
            return Err(err(StatusCode::BAD_GATEWAY, "Backend unreachable"));
        }
    };

    // The backend status code is not inspected; whatever body came back is
    // what gets encrypted.
    let mut body = Vec::new();
    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                if body.len() + chunk.len() > BACKEND_RESPONSE_CAP {
                    tracing::error!(cap_bytes = BACKEND_RESPONSE_CAP, "backend response too large");
                    return Err(err(StatusCode::INTERNAL_SERVER_ERROR, "Read Error"));
                }
                body.extend_from_slice(&chunk);
            }
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "backend body read failed");
                return Err(err(StatusCode::INTERNAL_SERVER_ERROR, "Read Error"));
            }
        }
    }

    Ok(body)
}
