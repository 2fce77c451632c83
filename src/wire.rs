//! Wire layout for the session envelope.
//!
//! Inbound frame (request path), after base64 decode:
//!
//! ```text
//! len_be16[2] || enc_salt_iv[56] || enc_payload
//! enc_salt_iv = iv2[12] || GCM(ss2, iv2, salt[16] || iv[12], aad=empty)
//! ```
//!
//! The response path carries `enc_salt_iv` and `enc_payload` as two separate
//! base64 fields instead of framing them: the server prepends the KEM
//! response ciphertext to `enc_salt_iv` and the payload travels alone.

extern crate alloc;
use alloc::vec::Vec;

use crate::error::EnvelopeError;

/// Wire protocol version, the `v` field of both envelope JSON shapes.
pub const PROTOCOL_VERSION: u32 = 1;

/// HKDF info / AEAD associated-data prefix; the session id is appended.
pub const INFO_PREFIX: &[u8] = b"kyberlink:v1|session=";

// ---------------------------------------------------------------------------
// ML-KEM-1024 component sizes
// ---------------------------------------------------------------------------

pub const KEM_PUBLIC_KEY_BYTES: usize = 1568;
pub const KEM_SECRET_KEY_BYTES: usize = 3168;
pub const KEM_CIPHERTEXT_BYTES: usize = 1568;
pub const SHARED_SECRET_BYTES: usize = 32;

// ---------------------------------------------------------------------------
// Envelope component sizes
// ---------------------------------------------------------------------------

pub const SALT_BYTES: usize = 16;
pub const IV_BYTES: usize = 12;
pub const AES_KEY_BYTES: usize = 32;
pub const AEAD_TAG_BYTES: usize = 16;

/// Inner salt/IV pair: salt[16] || iv[12].
pub const SALT_IV_BYTES: usize = SALT_BYTES + IV_BYTES; // 28

/// Encrypted salt/IV layer: iv2[12] || ct[28] || tag[16].
pub const ENC_SALT_IV_BYTES: usize = IV_BYTES + SALT_IV_BYTES + AEAD_TAG_BYTES; // 56

/// Big-endian u16 length prefix on the framed (request) shape.
pub const LEN_PREFIX_BYTES: usize = 2;

/// Session ids are 32 random bytes rendered as lowercase hex.
pub const SESSION_ID_BYTES: usize = 32;

// ---------------------------------------------------------------------------
// Info string
// ---------------------------------------------------------------------------

/// Build the per-session binding string `kyberlink:v1|session=<id>`.
///
/// Used both as HKDF info and as GCM associated data, so a captured frame
/// cannot be replayed against a different session.
pub fn session_info(session_id: &str) -> Vec<u8> {
    let id = session_id.as_bytes();
    let mut info = Vec::with_capacity(INFO_PREFIX.len() + id.len());
    info.extend_from_slice(INFO_PREFIX);
    info.extend_from_slice(id);
    info
}

// ---------------------------------------------------------------------------
// Frame codec
// ---------------------------------------------------------------------------

/// Borrowed view of a parsed frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameParts<'a> {
    pub enc_salt_iv: &'a [u8],
    pub enc_payload: &'a [u8],
}

pub fn decode_frame(data: &[u8]) -> Result<FrameParts<'_>, EnvelopeError> {
    if data.len() < LEN_PREFIX_BYTES {
        return Err(EnvelopeError);
    }

    let len = ((data[0] as usize) << 8) | data[1] as usize;
    if data.len() < LEN_PREFIX_BYTES + len {
        return Err(EnvelopeError);
    }

    Ok(FrameParts {
        enc_salt_iv: &data[LEN_PREFIX_BYTES..LEN_PREFIX_BYTES + len],
        enc_payload: &data[LEN_PREFIX_BYTES + len..],
    })
}

pub fn encode_frame(enc_salt_iv: &[u8], enc_payload: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
    if enc_salt_iv.len() > u16::MAX as usize {
        return Err(EnvelopeError);
    }

    let mut out = Vec::with_capacity(LEN_PREFIX_BYTES + enc_salt_iv.len() + enc_payload.len());
    out.extend_from_slice(&(enc_salt_iv.len() as u16).to_be_bytes());
    out.extend_from_slice(enc_salt_iv);
    out.extend_from_slice(enc_payload);

    Ok(out)
}
