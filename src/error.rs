//! Unified error types for the KyberLink envelope.

use core::fmt;

/// KEM failure: malformed ciphertext or wrong-length key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KemError;

impl fmt::Display for KemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key encapsulation failed")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for KemError {}

/// AEAD seal/open failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AeadError;

impl fmt::Display for AeadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "aead failure")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AeadError {}

/// Base64/hex decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecError;

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid encoding")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CodecError {}

/// Random source failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RngError;

impl fmt::Display for RngError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "random generator failure")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RngError {}

/// Uniform envelope error. Every seal/open failure collapses into this one
/// value so callers cannot distinguish which layer rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeError;

impl fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "envelope operation failed")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EnvelopeError {}

/// Normalize sub-causes into the uniform error (oracle discipline).
impl From<AeadError> for EnvelopeError {
    fn from(_: AeadError) -> Self {
        EnvelopeError
    }
}

impl From<RngError> for EnvelopeError {
    fn from(_: RngError) -> Self {
        EnvelopeError
    }
}

impl From<KemError> for EnvelopeError {
    fn from(_: KemError) -> Self {
        EnvelopeError
    }
}

impl From<CodecError> for EnvelopeError {
    fn from(_: CodecError) -> Self {
        EnvelopeError
    }
}
