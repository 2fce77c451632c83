//! Wire JSON types.
//!
//! Field names are part of the deployed protocol; keep them byte-exact.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound envelope for `POST /gateway`.
#[derive(Debug, Deserialize)]
pub struct SecureRequest {
    #[serde(rename = "v", default)]
    pub version: u32,
    #[serde(rename = "sessionID")]
    pub session_id: String,
    /// Key the client wants the response encapsulated against.
    #[serde(rename = "clientPublicKey")]
    pub client_public_key: String,
    /// ML-KEM ciphertext targeting the session's server keypair.
    #[serde(rename = "secretCiphertext")]
    pub secret_ciphertext: String,
    /// Length-prefixed envelope frame, base64.
    #[serde(rename = "encryptedData")]
    pub encrypted_data: String,
}

/// Outbound envelope: KEM response ciphertext || enc_salt_iv in one field,
/// the encrypted payload in the other.
#[derive(Debug, Serialize)]
pub struct SecureResponse {
    #[serde(rename = "v")]
    pub version: u32,
    #[serde(rename = "secretCiphertext")]
    pub secret_ciphertext: String,
    #[serde(rename = "encryptedData")]
    pub encrypted_data: String,
}

/// Decrypted inner request.
#[derive(Debug, Serialize, Deserialize)]
pub struct InnerRequest {
    /// Backend-relative path; must start with '/'.
    #[serde(rename = "finalApi")]
    pub final_api: String,
    pub method: String,
    #[serde(default)]
    pub payload: Option<Value>,
    /// Unix seconds; must lie inside the replay window.
    pub timestamp: i64,
    pub nonce: String,
}

/// `GET /kempublic` body.
#[derive(Debug, Serialize, Deserialize)]
pub struct HandshakeResponse {
    #[serde(rename = "sessionID")]
    pub session_id: String,
    #[serde(rename = "publicKey")]
    pub public_key: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub error: String,
}
