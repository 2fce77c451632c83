//! Session-bound double-wrapped envelope.
//!
//! One 32-byte KEM shared secret feeds two layers: `ss1 = ss` encrypts the
//! payload under an HKDF-derived AES key, `ss2 = reverse(ss)` encrypts the
//! salt/IV pair that the derivation needs. A party holding only one layer's
//! key cannot recover the payload.
//!
//! `ss2` is a byte reversal rather than an HKDF subkey with its own label;
//! deployed clients depend on this exact construction, so it is part of the
//! wire contract.
//!
//! Request and response legs share the cryptography but not the shape: the
//! request carries one length-prefixed frame (see [`crate::wire`]), the
//! response carries `enc_payload` and `enc_salt_iv` as separate fields.

extern crate alloc;
use alloc::vec::Vec;

use getrandom::getrandom;
use zeroize::Zeroizing;

use crate::aead;
use crate::error::{EnvelopeError, RngError};
use crate::kdf;
use crate::wire::{self, IV_BYTES, SALT_BYTES, SALT_IV_BYTES, SHARED_SECRET_BYTES};

/// ss1 (payload layer) and ss2 (salt/IV layer) from one shared secret.
fn split_secret(
    ss: &[u8; SHARED_SECRET_BYTES],
) -> (
    Zeroizing<[u8; SHARED_SECRET_BYTES]>,
    Zeroizing<[u8; SHARED_SECRET_BYTES]>,
) {
    let ss1 = Zeroizing::new(*ss);
    let mut ss2 = Zeroizing::new(*ss);
    ss2.reverse();
    (ss1, ss2)
}

/// Encrypt with the key directly, no AAD. Output: iv[12] || ciphertext || tag.
pub fn seal_direct(
    key: &[u8; SHARED_SECRET_BYTES],
    data: &[u8],
) -> Result<Vec<u8>, EnvelopeError> {
    let iv = aead::random_iv()?;
    let ct = aead::aead_seal(key, &iv, data, b"")?;

    let mut out = Vec::with_capacity(IV_BYTES + ct.len());
    out.extend_from_slice(&iv);
    out.extend_from_slice(&ct);
    Ok(out)
}

/// Reverse of [`seal_direct`]. Input: iv[12] || ciphertext || tag.
pub fn open_direct(
    key: &[u8; SHARED_SECRET_BYTES],
    data: &[u8],
) -> Result<Vec<u8>, EnvelopeError> {
    if data.len() < IV_BYTES {
        return Err(EnvelopeError);
    }

    let iv: [u8; IV_BYTES] = data[..IV_BYTES].try_into().map_err(|_| EnvelopeError)?;
    Ok(aead::aead_open(key, &iv, &data[IV_BYTES..], b"")?)
}

/// Response-path encryption: returns `(enc_payload, enc_salt_iv)` unframed.
///
/// The caller prepends the KEM response ciphertext to `enc_salt_iv` and
/// base64-encodes the two parts separately.
pub fn seal_split(
    plaintext: &[u8],
    ss: &[u8; SHARED_SECRET_BYTES],
    session_id: &str,
) -> Result<(Vec<u8>, Vec<u8>), EnvelopeError> {
    let (ss1, ss2) = split_secret(ss);

    let mut salt = [0u8; SALT_BYTES];
    getrandom(&mut salt).map_err(|_| RngError)?;
    let iv = aead::random_iv()?;

    let info = wire::session_info(session_id);
    let aes_key = Zeroizing::new(kdf::derive_aes_key(&ss1[..], &salt, &info)?);
    let enc_payload = aead::aead_seal(&aes_key, &iv, plaintext, &info)?;

    let mut salt_iv = [0u8; SALT_IV_BYTES];
    salt_iv[..SALT_BYTES].copy_from_slice(&salt);
    salt_iv[SALT_BYTES..].copy_from_slice(&iv);
    let enc_salt_iv = seal_direct(&ss2, &salt_iv)?;

    Ok((enc_payload, enc_salt_iv))
}

/// Request-path encryption: the length-prefixed frame the inbound leg carries.
pub fn seal(
    plaintext: &[u8],
    ss: &[u8; SHARED_SECRET_BYTES],
    session_id: &str,
) -> Result<Vec<u8>, EnvelopeError> {
    let (enc_payload, enc_salt_iv) = seal_split(plaintext, ss, session_id)?;
    wire::encode_frame(&enc_salt_iv, &enc_payload)
}

/// Decrypt a framed envelope. All failures collapse to [`EnvelopeError`].
pub fn open(
    frame: &[u8],
    ss: &[u8; SHARED_SECRET_BYTES],
    session_id: &str,
) -> Result<Vec<u8>, EnvelopeError> {
    let (ss1, ss2) = split_secret(ss);
    let parts = wire::decode_frame(frame)?;

    let salt_iv = open_direct(&ss2, parts.enc_salt_iv)?;
    if salt_iv.len() != SALT_IV_BYTES {
        return Err(EnvelopeError);
    }

    let salt = &salt_iv[..SALT_BYTES];
    let iv: [u8; IV_BYTES] = salt_iv[SALT_BYTES..].try_into().map_err(|_| EnvelopeError)?;

    let info = wire::session_info(session_id);
    let aes_key = Zeroizing::new(kdf::derive_aes_key(&ss1[..], salt, &info)?);
    Ok(aead::aead_open(&aes_key, &iv, parts.enc_payload, &info)?)
}
