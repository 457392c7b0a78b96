//! Illustrative report over a sealed envelope.
//!
//! Renders the classic textbook view of an ECIES ciphertext: the recipient
//! key and the ephemeral key (C1) as affine coordinates, and the AEAD
//! ciphertext split down the middle into two large integers (C2). The
//! transform is lossy and purely informational: it reads an
//! already-finalized envelope and never feeds anything back into it.
//!
//! Private key material deliberately has no place in a report file.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use sandi_crypto::{Envelope, PublicKey};

/// Affine coordinates of a curve point, as hex integers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointCoordinates {
    /// x-coordinate.
    pub x: String,
    /// y-coordinate.
    pub y: String,
}

impl PointCoordinates {
    fn from_public_key(key: &PublicKey) -> Self {
        // Uncompressed SEC1: 0x04 || x || y
        let sec1 = key.to_sec1_bytes();
        let (x, y) = sec1[1..].split_at((sec1.len() - 1) / 2);
        Self {
            x: to_hex_int(x),
            y: to_hex_int(y),
        }
    }
}

/// The ciphertext bytes split into two big-endian integers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiphertextHalves {
    /// First half.
    pub a: String,
    /// Second half.
    pub b: String,
}

/// An informational rendering of one sealed envelope.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EncryptionReport {
    /// Recipient public key coordinates (Q).
    pub public_key: PointCoordinates,
    /// Ephemeral public key coordinates (C1).
    pub c1: PointCoordinates,
    /// Ciphertext halves (C2).
    pub c2: CiphertextHalves,
}

impl EncryptionReport {
    /// Build a report from a finalized envelope and the recipient key it
    /// was sealed to.
    ///
    /// # Errors
    ///
    /// Fails if the envelope's ephemeral key field does not parse, which
    /// cannot happen for an envelope produced by `seal`.
    pub fn build(envelope: &Envelope, recipient: &PublicKey) -> Result<Self> {
        let pem = std::str::from_utf8(envelope.ephemeral_public_pem())
            .map_err(|_| anyhow!("ephemeral key field is not text"))?;
        let ephemeral = PublicKey::from_spki_pem(pem)?;

        Ok(Self {
            public_key: PointCoordinates::from_public_key(recipient),
            c1: PointCoordinates::from_public_key(&ephemeral),
            c2: split_into_two_ints(envelope.ciphertext()),
        })
    }

    /// Pretty-printed JSON form, for writing next to the envelope.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).expect("report serialization does not fail")
    }
}

/// Split a byte string into two big-endian integers, first half rounded up.
fn split_into_two_ints(bytes: &[u8]) -> CiphertextHalves {
    if bytes.is_empty() {
        return CiphertextHalves {
            a: "0x0".into(),
            b: "0x0".into(),
        };
    }
    let half = bytes.len().div_ceil(2);
    CiphertextHalves {
        a: to_hex_int(&bytes[..half]),
        b: to_hex_int(&bytes[half..]),
    }
}

/// Render bytes as a `0x`-prefixed big-endian hex integer.
fn to_hex_int(bytes: &[u8]) -> String {
    let hex = hex::encode(bytes);
    let trimmed = hex.trim_start_matches('0');
    if trimmed.is_empty() {
        "0x0".into()
    } else {
        format!("0x{trimmed}")
    }
}
