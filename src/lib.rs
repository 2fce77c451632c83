//! # KyberLink Envelope
//!
//! Post-quantum session envelope: ML-KEM-1024 + AES-256-GCM with
//! HKDF-SHA-256 key derivation.
//!
//! ## Quick Start
//!
//! ```rust
//! use kyberlink_envelope::{envelope, KemProvider, MlKem1024Provider};
//!
//! let (pk, sk) = MlKem1024Provider::keygen();
//! let (ss, ct) = MlKem1024Provider::encapsulate(&pk).unwrap();
//!
//! let session_id = "7f".repeat(32);
//! let frame = envelope::seal(b"secret", &ss, &session_id).unwrap();
//!
//! let ss_peer = MlKem1024Provider::decapsulate(&sk, &ct).unwrap();
//! let plaintext = envelope::open(&frame, &ss_peer, &session_id).unwrap();
//! assert_eq!(plaintext, b"secret");
//! ```
//!
//! ## Security Properties
//!
//! - **ML-KEM-1024**: FIPS 203 at security category 5
//! - **Double wrapping**: the payload key derivation inputs travel under a
//!   second AES-GCM layer keyed from the same shared secret
//! - **Session binding**: HKDF info and GCM associated data carry the
//!   session id, so frames cannot cross sessions
//! - **Uniform errors**: every decrypt failure is the same value
//!
//! ## What's NOT Provided
//!
//! - Key management or session lifetimes (the gateway owns those)
//! - Streaming encryption
//! - Constant-time guarantees beyond the underlying primitives

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

mod error;
mod kem;

pub mod aead;
pub mod codec;
pub mod envelope;
pub mod kdf;
pub mod wire;

pub use error::{AeadError, CodecError, EnvelopeError, KemError, RngError};
pub use kem::{KemProvider, MlKem1024Provider, PublicKey, SecretKey, SharedSecret};
