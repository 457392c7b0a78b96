//! ECDH key agreement.
//!
//! Computes the Diffie-Hellman shared point between a private scalar and a
//! peer public point and exposes its big-endian x-coordinate as the raw
//! shared secret. The secret is low-entropy-structured field material, not
//! a key: feed it through [`crate::kdf::derive_key`] before use.
//!
//! Point validity (on-curve, non-identity) is enforced when a
//! [`PublicKey`] is decoded, so agreement itself cannot fail: a non-zero
//! scalar times a valid point of prime order never lands on the identity.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::curve::FIELD_ELEMENT_SIZE;
use crate::keys::{PrivateKey, PublicKey};

/// Size of the raw ECDH output in bytes (one field element).
pub const SHARED_SECRET_SIZE: usize = FIELD_ELEMENT_SIZE;

/// Raw ECDH output: the big-endian x-coordinate of the shared point.
///
/// Ephemeral by design: derive a symmetric key from it immediately and
/// let it drop. Zeroized on drop, never logged.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    bytes: [u8; SHARED_SECRET_SIZE],
}

impl SharedSecret {
    /// The secret bytes.
    ///
    /// # Security
    ///
    /// Use only as KDF input; never persist or log.
    pub fn as_bytes(&self) -> &[u8; SHARED_SECRET_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SharedSecret([REDACTED])")
    }
}

/// Perform ECDH between a private scalar and a peer public point.
///
/// Deterministic given the two inputs; both sides of an exchange derive
/// the same secret.
pub fn agree(private: &PrivateKey, peer: &PublicKey) -> SharedSecret {
    let shared = p256::ecdh::diffie_hellman(private.to_nonzero_scalar(), peer.as_affine());

    let mut bytes = [0u8; SHARED_SECRET_SIZE];
    bytes.copy_from_slice(shared.raw_secret_bytes().as_slice());
    SharedSecret { bytes }
}
