//! # sandi-crypto
//!
//! ECIES-style hybrid public-key encryption on NIST P-256.
//!
//! A sender encrypts an arbitrary byte payload to a recipient's public
//! key, producing a self-contained envelope that only the matching private
//! key can open:
//!
//! - **ECDH** key agreement against a per-message ephemeral key pair
//! - **HKDF-SHA256** key derivation with a per-message random salt
//! - **AES-256-GCM** authenticated encryption (96-bit nonce, no AAD)
//! - A JSON envelope carrying the ephemeral public key (SPKI PEM), salt,
//!   nonce, and ciphertext as base64 fields
//!
//! Keys interchange as standard PKCS#8 / SubjectPublicKeyInfo PEM, with
//! optional PBES2 passphrase protection for private keys.
//!
//! ## Security
//!
//! Secret material (`PrivateKey`, `SharedSecret`, `SymmetricKey`) is
//! zeroized on drop and redacted from `Debug` output. `open` reports a
//! single opaque error for every failure mode. This scheme provides
//! confidentiality and ciphertext integrity, not sender authentication.
//!
//! ## Example
//!
//! ```
//! use sandi_crypto::{open, seal, KeyPair};
//!
//! let recipient = KeyPair::generate();
//!
//! let envelope = seal(b"hello world", recipient.public_key()).unwrap();
//! let json = envelope.to_json();
//!
//! let restored = sandi_crypto::Envelope::from_json(&json).unwrap();
//! let payload = open(&restored, recipient.private_key()).unwrap();
//! assert_eq!(payload, b"hello world");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aead;
pub mod agreement;
pub mod curve;
pub mod ecies;
pub mod envelope;
pub mod error;
pub mod kdf;
pub mod keys;

#[cfg(test)]
mod proptests;

pub use aead::{decrypt, encrypt, Nonce, NONCE_SIZE, TAG_SIZE};
pub use agreement::{agree, SharedSecret, SHARED_SECRET_SIZE};
pub use ecies::{open, seal, seal_with, KDF_CONTEXT};
pub use envelope::{Envelope, Salt, SALT_SIZE};
pub use error::{CryptoError, Result};
pub use kdf::{derive_key, SymmetricKey, SYMMETRIC_KEY_SIZE};
pub use keys::{KeyPair, PrivateKey, PublicKey};
