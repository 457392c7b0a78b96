//! Symmetric key derivation.
//!
//! HKDF-SHA256 (RFC 5869 extract-then-expand) turns a raw ECDH shared
//! secret into a uniform 256-bit AEAD key. The salt travels with each
//! envelope; the info string is a fixed versioned protocol tag that binds
//! derived keys to this protocol and prevents cross-protocol key reuse.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::agreement::SharedSecret;

/// Size of a derived symmetric key in bytes (256 bits).
pub const SYMMETRIC_KEY_SIZE: usize = 32;

/// A derived 256-bit symmetric key.
///
/// Scoped to a single encryption or decryption operation. Zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey {
    bytes: [u8; SYMMETRIC_KEY_SIZE],
}

impl SymmetricKey {
    /// The key bytes.
    ///
    /// # Security
    ///
    /// Avoid logging or persisting the returned bytes.
    pub fn as_bytes(&self) -> &[u8; SYMMETRIC_KEY_SIZE] {
        &self.bytes
    }

    #[cfg(test)]
    pub(crate) fn from_bytes(bytes: [u8; SYMMETRIC_KEY_SIZE]) -> Self {
        Self { bytes }
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SymmetricKey([REDACTED])")
    }
}

/// Derive a symmetric key from an ECDH shared secret.
///
/// Pure function: the same (secret, salt, info) triple always yields the
/// same key, which is what lets `open` rebuild the key `seal` used.
pub fn derive_key(secret: &SharedSecret, salt: &[u8], info: &[u8]) -> SymmetricKey {
    let hk = Hkdf::<Sha256>::new(Some(salt), secret.as_bytes());

    let mut bytes = [0u8; SYMMETRIC_KEY_SIZE];
    hk.expand(info, &mut bytes)
        .expect("32 bytes is a valid HKDF-SHA256 output length");
    SymmetricKey { bytes }
}
