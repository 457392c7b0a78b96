//! Envelope encoding and decoding.
//!
//! A sealed message travels as a self-describing four-field envelope:
//!
//! ```text
//! {
//!   "eph_pub_pem_b64": "...",  // ephemeral public key, SPKI PEM, base64
//!   "salt_b64":        "...",  // 16-byte HKDF salt, base64
//!   "nonce_b64":       "...",  // 12-byte GCM nonce, base64
//!   "ciphertext_b64":  "..."   // AEAD output incl. 16-byte tag, base64
//! }
//! ```
//!
//! All four fields are mandatory; field order is not significant and
//! unknown fields are ignored. Decoding validates structure only: base64
//! armor and salt/nonce lengths. The ephemeral key bytes are interpreted
//! later, inside `open`, so a structurally valid envelope with garbage key
//! material fails as a decryption error rather than a format error.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::aead::Nonce;
use crate::{CryptoError, Result};

/// Size of the per-message HKDF salt in bytes.
pub const SALT_SIZE: usize = 16;

/// A 16-byte HKDF salt.
///
/// Generated fresh per encryption; travels with the envelope; not secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Salt {
    bytes: [u8; SALT_SIZE],
}

impl Salt {
    /// Generate a random salt from the system CSPRNG.
    pub fn generate() -> Self {
        Self::generate_with(&mut OsRng)
    }

    /// Generate a random salt from the supplied RNG.
    pub fn generate_with<R>(rng: &mut R) -> Self
    where
        R: CryptoRng + RngCore,
    {
        let mut bytes = [0u8; SALT_SIZE];
        rng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Create a salt from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly 16 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SALT_SIZE {
            return Err(CryptoError::EnvelopeFormat(format!(
                "invalid salt length: expected {SALT_SIZE}, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; SALT_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// The salt bytes.
    pub fn as_bytes(&self) -> &[u8; SALT_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for Salt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Salt({:02x}{:02x}..)", self.bytes[0], self.bytes[1])
    }
}

/// Wire form of an envelope: four mandatory base64 string fields.
#[derive(Serialize, Deserialize)]
struct WireEnvelope {
    eph_pub_pem_b64: String,
    salt_b64: String,
    nonce_b64: String,
    ciphertext_b64: String,
}

/// A sealed message: everything the recipient needs besides their
/// private key.
///
/// Created by `seal`, consumed by `open`; has no lifecycle beyond
/// transport and storage.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireEnvelope", into = "WireEnvelope")]
pub struct Envelope {
    ephemeral_public_pem: Vec<u8>,
    salt: Salt,
    nonce: Nonce,
    ciphertext: Vec<u8>,
}

impl Envelope {
    /// Assemble an envelope from its four fields.
    pub fn new(ephemeral_public_pem: Vec<u8>, salt: Salt, nonce: Nonce, ciphertext: Vec<u8>) -> Self {
        Self {
            ephemeral_public_pem,
            salt,
            nonce,
            ciphertext,
        }
    }

    /// The ephemeral public key as SPKI PEM bytes, exactly as carried on
    /// the wire.
    pub fn ephemeral_public_pem(&self) -> &[u8] {
        &self.ephemeral_public_pem
    }

    /// The HKDF salt.
    pub fn salt(&self) -> &Salt {
        &self.salt
    }

    /// The GCM nonce.
    pub fn nonce(&self) -> &Nonce {
        &self.nonce
    }

    /// The AEAD ciphertext (payload plus 16-byte tag).
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Encode to the canonical pretty-printed JSON wire form.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).expect("envelope serialization does not fail")
    }

    /// Decode from the JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::EnvelopeFormat`] if a field is missing or
    /// not a string, base64 decoding fails, or salt/nonce lengths are
    /// wrong.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CryptoError::EnvelopeFormat(e.to_string()))
    }
}

impl std::fmt::Debug for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Envelope")
            .field("ephemeral_public_pem_len", &self.ephemeral_public_pem.len())
            .field("salt", &self.salt)
            .field("nonce", &self.nonce)
            .field("ciphertext_len", &self.ciphertext.len())
            .finish()
    }
}

impl From<Envelope> for WireEnvelope {
    fn from(envelope: Envelope) -> Self {
        Self {
            eph_pub_pem_b64: BASE64.encode(&envelope.ephemeral_public_pem),
            salt_b64: BASE64.encode(envelope.salt.as_bytes()),
            nonce_b64: BASE64.encode(envelope.nonce.as_bytes()),
            ciphertext_b64: BASE64.encode(&envelope.ciphertext),
        }
    }
}

impl TryFrom<WireEnvelope> for Envelope {
    type Error = CryptoError;

    fn try_from(wire: WireEnvelope) -> Result<Self> {
        let decode = |field: &str, value: &str| {
            BASE64
                .decode(value)
                .map_err(|e| CryptoError::EnvelopeFormat(format!("{field}: {e}")))
        };

        let ephemeral_public_pem = decode("eph_pub_pem_b64", &wire.eph_pub_pem_b64)?;
        let salt = Salt::from_bytes(&decode("salt_b64", &wire.salt_b64)?)?;
        let nonce = Nonce::from_bytes(&decode("nonce_b64", &wire.nonce_b64)?)?;
        let ciphertext = decode("ciphertext_b64", &wire.ciphertext_b64)?;

        Ok(Self {
            ephemeral_public_pem,
            salt,
            nonce,
            ciphertext,
        })
    }
}
