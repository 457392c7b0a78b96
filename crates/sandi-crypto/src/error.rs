//! Error types for cryptographic operations.

use thiserror::Error;

/// Errors that can occur during cryptographic operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Serialized key material is malformed.
    #[error("malformed key material: {0}")]
    KeyFormat(String),

    /// Decrypting a passphrase-protected private key failed.
    ///
    /// Also returned when a passphrase is required but missing.
    #[error("private key passphrase is wrong or missing")]
    WrongPassphrase,

    /// A peer public key does not encode a valid point on P-256.
    #[error("peer public key is not a valid curve point")]
    InvalidPeerKey,

    /// An envelope is structurally malformed.
    #[error("malformed envelope: {0}")]
    EnvelopeFormat(String),

    /// AEAD tag verification failed (tampered, truncated, or wrong key).
    #[error("ciphertext authentication failed")]
    Authentication,

    /// Opening an envelope failed.
    ///
    /// Deliberately opaque: every internal failure of `open` collapses
    /// into this variant so callers cannot distinguish which step failed.
    #[error("decryption failed")]
    Decryption,

    /// Encryption failed.
    #[error("encryption failed: {0}")]
    Encryption(String),
}

/// Result type for cryptographic operations.
pub type Result<T> = std::result::Result<T, CryptoError>;
