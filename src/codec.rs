//! Base64/hex codecs and the crate's random byte source.

extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use getrandom::getrandom;

use crate::error::{CodecError, RngError};

/// Standard base64 with padding.
pub fn base64_encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

pub fn base64_decode(s: &str) -> Result<Vec<u8>, CodecError> {
    STANDARD.decode(s).map_err(|_| CodecError)
}

/// Lowercase hex.
pub fn hex_encode(data: &[u8]) -> String {
    hex::encode(data)
}

/// Rejects odd-length input and non-hex characters.
pub fn hex_decode(s: &str) -> Result<Vec<u8>, CodecError> {
    hex::decode(s).map_err(|_| CodecError)
}

/// Fill a fresh buffer from the OS random source.
pub fn random_bytes(n: usize) -> Result<Vec<u8>, RngError> {
    let mut buf = alloc::vec![0u8; n];
    getrandom(&mut buf).map_err(|_| RngError)?;
    Ok(buf)
}
