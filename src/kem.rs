//! ML-KEM-1024 (FIPS 203, security category 5).
//!
//! Key serialization:
//!   PublicKey  = mlkem_ek[1568]
//!   SecretKey  = mlkem_dk[3168]
//!
//! KEM ciphertext (on wire): mlkem_ct[1568]
//!
//! Shared secret (fed to the envelope): 32 bytes, zeroized on drop.

extern crate alloc;
use alloc::vec::Vec;

use core::convert::TryFrom;

use ml_kem::{
    kem::{Decapsulate, Encapsulate},
    Ciphertext, EncodedSizeUser, KemCore, MlKem1024, MlKem1024Params,
};
use rand_core::OsRng;
use zeroize::Zeroizing;

use crate::error::KemError;
use crate::wire::{
    KEM_CIPHERTEXT_BYTES, KEM_PUBLIC_KEY_BYTES, KEM_SECRET_KEY_BYTES, SHARED_SECRET_BYTES,
};

type Ek = ml_kem::kem::EncapsulationKey<MlKem1024Params>;
type Dk = ml_kem::kem::DecapsulationKey<MlKem1024Params>;

/// ML-KEM typed ciphertext (for TryFrom).
type MlKemCt = Ciphertext<MlKem1024>;

/// 32-byte KEM shared secret, zeroized on drop.
pub type SharedSecret = Zeroizing<[u8; SHARED_SECRET_BYTES]>;

// ---------------------------------------------------------------------------
// Public key
// ---------------------------------------------------------------------------

/// ML-KEM-1024 encapsulation key.
#[derive(Clone)]
pub struct PublicKey {
    inner: Ek,
}

impl PublicKey {
    /// Serialize: mlkem_ek[1568]
    pub fn to_bytes(&self) -> [u8; KEM_PUBLIC_KEY_BYTES] {
        let mut out = [0u8; KEM_PUBLIC_KEY_BYTES];
        out.copy_from_slice(self.inner.as_bytes().as_slice());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KemError> {
        if bytes.len() != KEM_PUBLIC_KEY_BYTES {
            return Err(KemError);
        }

        let ek_bytes: [u8; KEM_PUBLIC_KEY_BYTES] = bytes.try_into().map_err(|_| KemError)?;
        Ok(Self {
            inner: Ek::from_bytes(&ek_bytes.into()),
        })
    }
}

// ---------------------------------------------------------------------------
// Secret key
// ---------------------------------------------------------------------------

/// ML-KEM-1024 decapsulation key.
pub struct SecretKey {
    inner: Dk,
}

impl SecretKey {
    /// Serialize: mlkem_dk[3168]
    pub fn to_bytes(&self) -> [u8; KEM_SECRET_KEY_BYTES] {
        let mut out = [0u8; KEM_SECRET_KEY_BYTES];
        out.copy_from_slice(self.inner.as_bytes().as_slice());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KemError> {
        if bytes.len() != KEM_SECRET_KEY_BYTES {
            return Err(KemError);
        }

        let dk_bytes: [u8; KEM_SECRET_KEY_BYTES] = bytes.try_into().map_err(|_| KemError)?;
        Ok(Self {
            inner: Dk::from_bytes(&dk_bytes.into()),
        })
    }
}

// ---------------------------------------------------------------------------
// KEM provider trait + ML-KEM-1024 implementation
// ---------------------------------------------------------------------------

pub trait KemProvider {
    fn keygen() -> (PublicKey, SecretKey);
    /// Returns (shared_secret, kem_ciphertext_bytes).
    fn encapsulate(pk: &PublicKey) -> Result<(SharedSecret, Vec<u8>), KemError>;
    fn decapsulate(sk: &SecretKey, ct: &[u8]) -> Result<SharedSecret, KemError>;
}

/// ML-KEM-1024 provider backed by the OS random source.
pub struct MlKem1024Provider;

impl KemProvider for MlKem1024Provider {
    fn keygen() -> (PublicKey, SecretKey) {
        // generate returns (dk, ek)
        let (dk, ek) = MlKem1024::generate(&mut OsRng);
        (PublicKey { inner: ek }, SecretKey { inner: dk })
    }

    fn encapsulate(pk: &PublicKey) -> Result<(SharedSecret, Vec<u8>), KemError> {
        let (ct, ss) = pk.inner.encapsulate(&mut OsRng).map_err(|_| KemError)?;

        let mut secret: SharedSecret = Zeroizing::new([0u8; SHARED_SECRET_BYTES]);
        secret.copy_from_slice(ss.as_slice());

        Ok((secret, ct.as_slice().to_vec()))
    }

    fn decapsulate(sk: &SecretKey, ct: &[u8]) -> Result<SharedSecret, KemError> {
        if ct.len() != KEM_CIPHERTEXT_BYTES {
            return Err(KemError);
        }

        let ct = MlKemCt::try_from(ct).map_err(|_| KemError)?;
        let ss = sk.inner.decapsulate(&ct).map_err(|_| KemError)?;

        let mut secret: SharedSecret = Zeroizing::new([0u8; SHARED_SECRET_BYTES]);
        secret.copy_from_slice(ss.as_slice());

        Ok(secret)
    }
}
