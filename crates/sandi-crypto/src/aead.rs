//! AES-256-GCM authenticated encryption.
//!
//! AEAD with a 96-bit nonce and no associated data; the 16-byte
//! authentication tag is appended to the ciphertext. This layer is the
//! sole integrity check in the protocol: decryption is all-or-nothing and
//! never returns partial plaintext.
//!
//! Nonce freshness is the caller's responsibility. The envelope protocol
//! satisfies it structurally: every seal derives a fresh key from a fresh
//! ephemeral share, so no (key, nonce) pair ever repeats.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce as GcmNonce};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::kdf::SymmetricKey;
use crate::{CryptoError, Result};

/// Size of a GCM nonce in bytes (96 bits).
pub const NONCE_SIZE: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// A 96-bit GCM nonce.
///
/// Generated fresh per encryption; travels with the envelope; not secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Nonce {
    bytes: [u8; NONCE_SIZE],
}

impl Nonce {
    /// Generate a random nonce from the system CSPRNG.
    pub fn generate() -> Self {
        Self::generate_with(&mut OsRng)
    }

    /// Generate a random nonce from the supplied RNG.
    pub fn generate_with<R>(rng: &mut R) -> Self
    where
        R: CryptoRng + RngCore,
    {
        let mut bytes = [0u8; NONCE_SIZE];
        rng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Create a nonce from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly 12 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != NONCE_SIZE {
            return Err(CryptoError::EnvelopeFormat(format!(
                "invalid nonce length: expected {NONCE_SIZE}, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; NONCE_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// The nonce bytes.
    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for Nonce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Nonce({:02x}{:02x}..)", self.bytes[0], self.bytes[1])
    }
}

/// Encrypt plaintext under the given key and nonce.
///
/// Returns ciphertext with the authentication tag appended
/// (`plaintext.len() + 16` bytes).
///
/// # Errors
///
/// Returns [`CryptoError::Encryption`] if the cipher rejects the input
/// (only possible for pathological plaintext sizes).
pub fn encrypt(key: &SymmetricKey, nonce: &Nonce, plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    cipher
        .encrypt(GcmNonce::from_slice(nonce.as_bytes()), plaintext)
        .map_err(|_| CryptoError::Encryption("AES-256-GCM encryption failed".into()))
}

/// Verify the tag and decrypt.
///
/// # Errors
///
/// Returns [`CryptoError::Authentication`] if the tag does not verify:
/// wrong key, tampered ciphertext, or truncation. No plaintext is ever
/// returned on failure.
pub fn decrypt(key: &SymmetricKey, nonce: &Nonce, ciphertext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    cipher
        .decrypt(GcmNonce::from_slice(nonce.as_bytes()), ciphertext)
        .map_err(|_| CryptoError::Authentication)
}
