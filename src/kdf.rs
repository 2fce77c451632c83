//! HKDF-SHA-256 key derivation.
//!
//! key = HKDF-SHA256(ikm=shared_secret, salt=salt, info=info, len=32)
//!
//! The salt is the per-message 16-byte value carried inside the encrypted
//! salt/IV layer; the info string binds the key to one session.

use hkdf::Hkdf;
use sha2::Sha256;

use crate::error::EnvelopeError;
use crate::wire::AES_KEY_BYTES;

pub fn derive_aes_key(
    ikm: &[u8],
    salt: &[u8],
    info: &[u8],
) -> Result<[u8; AES_KEY_BYTES], EnvelopeError> {
    let hk = Hkdf::<Sha256>::new(Some(salt), ikm);
    let mut out = [0u8; AES_KEY_BYTES];
    hk.expand(info, &mut out).map_err(|_| EnvelopeError)?;
    Ok(out)
}
