//! AEAD: AES-256-GCM (12-byte IV, 16-byte tag).

extern crate alloc;
use alloc::vec::Vec;

use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Nonce,
};
use getrandom::getrandom;

use crate::error::{AeadError, RngError};
use crate::wire::{AES_KEY_BYTES, IV_BYTES};

/// Generate a random 12-byte IV. Used during encryption only.
pub fn random_iv() -> Result<[u8; IV_BYTES], RngError> {
    let mut iv = [0u8; IV_BYTES];
    getrandom(&mut iv).map_err(|_| RngError)?;
    Ok(iv)
}

/// AEAD seal (encrypt path). Output is ciphertext || tag.
pub fn aead_seal(
    key: &[u8; AES_KEY_BYTES],
    iv: &[u8; IV_BYTES],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, AeadError> {
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| AeadError)?;
    let n = Nonce::from_slice(iv);
    let payload = Payload { msg: plaintext, aad };
    cipher.encrypt(n, payload).map_err(|_| AeadError)
}

/// AEAD open (decrypt path). Input is ciphertext || tag.
pub fn aead_open(
    key: &[u8; AES_KEY_BYTES],
    iv: &[u8; IV_BYTES],
    ciphertext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, AeadError> {
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| AeadError)?;
    let n = Nonce::from_slice(iv);
    let payload = Payload { msg: ciphertext, aad };
    cipher.decrypt(n, payload).map_err(|_| AeadError)
}
