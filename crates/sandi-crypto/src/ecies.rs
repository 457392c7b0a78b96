//! ECIES seal and open.
//!
//! Orchestrates the primitives into the two protocol operations:
//!
//! 1. `seal`: generate an ephemeral P-256 key pair, ECDH against the
//!    recipient's public key, HKDF-SHA256 the shared secret with a fresh
//!    16-byte salt, AES-256-GCM the payload under a fresh 12-byte nonce,
//!    package everything into an [`Envelope`].
//! 2. `open`: the reverse, using the recipient's private key and the
//!    envelope's ephemeral public key.
//!
//! Each call is a stateless transaction: no caching, no retries, no shared
//! state between calls beyond the process CSPRNG. The ephemeral private
//! key, shared secret, and derived key are dropped (and zeroized) before
//! the call returns.
//!
//! ## Error opacity
//!
//! Every failure inside `open`, from an unparseable ephemeral key to a tag
//! mismatch, surfaces as the single [`CryptoError::Decryption`] variant.
//! Distinguishing failure modes would hand an attacker a decryption
//! oracle.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::aead::{self, Nonce};
use crate::agreement::agree;
use crate::envelope::{Envelope, Salt};
use crate::kdf::derive_key;
use crate::keys::{KeyPair, PrivateKey, PublicKey};
use crate::{CryptoError, Result};

/// Versioned domain-separation tag bound into every derived key.
///
/// Must match on both sides of the exchange; changing it invalidates all
/// previously produced envelopes.
pub const KDF_CONTEXT: &[u8] = b"ecc-ecies-v1";

/// Encrypt a payload to a recipient public key.
///
/// Produces a self-contained [`Envelope`] that only the holder of the
/// matching private key can open. Two seals of the same payload to the
/// same key yield entirely different envelopes.
///
/// # Errors
///
/// Returns [`CryptoError::Encryption`] or [`CryptoError::KeyFormat`] if a
/// primitive rejects its input; neither occurs for ordinary payloads.
pub fn seal(plaintext: &[u8], recipient: &PublicKey) -> Result<Envelope> {
    seal_with(&mut OsRng, plaintext, recipient)
}

/// [`seal`] with an injected RNG, for deterministic testing.
pub fn seal_with<R>(rng: &mut R, plaintext: &[u8], recipient: &PublicKey) -> Result<Envelope>
where
    R: CryptoRng + RngCore,
{
    let ephemeral = KeyPair::generate_with(rng);
    let secret = agree(ephemeral.private_key(), recipient);

    let salt = Salt::generate_with(rng);
    let key = derive_key(&secret, salt.as_bytes(), KDF_CONTEXT);

    let nonce = Nonce::generate_with(rng);
    let ciphertext = aead::encrypt(&key, &nonce, plaintext)?;

    let ephemeral_public_pem = ephemeral.public_key().to_spki_pem()?.into_bytes();

    Ok(Envelope::new(ephemeral_public_pem, salt, nonce, ciphertext))
}

/// Decrypt an envelope with the recipient's private key.
///
/// # Errors
///
/// Returns [`CryptoError::Decryption`] on any failure, without revealing
/// which step failed.
pub fn open(envelope: &Envelope, recipient: &PrivateKey) -> Result<Vec<u8>> {
    open_inner(envelope, recipient).map_err(|_| CryptoError::Decryption)
}

fn open_inner(envelope: &Envelope, recipient: &PrivateKey) -> Result<Vec<u8>> {
    let pem = std::str::from_utf8(envelope.ephemeral_public_pem())
        .map_err(|e| CryptoError::KeyFormat(e.to_string()))?;
    let ephemeral_public = PublicKey::from_spki_pem(pem)?;

    let secret = agree(recipient, &ephemeral_public);
    let key = derive_key(&secret, envelope.salt().as_bytes(), KDF_CONTEXT);

    aead::decrypt(&key, envelope.nonce(), envelope.ciphertext())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aead::TAG_SIZE;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine as _;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_seal_open_roundtrip() {
        let recipient = KeyPair::generate();
        let payload = b"attack at dawn";

        let envelope = seal(payload, recipient.public_key()).unwrap();
        let recovered = open(&envelope, recipient.private_key()).unwrap();

        assert_eq!(payload.as_slice(), recovered.as_slice());
    }

    #[test]
    fn test_empty_payload_roundtrip() {
        let recipient = KeyPair::generate();

        let envelope = seal(b"", recipient.public_key()).unwrap();
        let recovered = open(&envelope, recipient.private_key()).unwrap();

        assert!(recovered.is_empty());
        assert_eq!(envelope.ciphertext().len(), TAG_SIZE);
    }

    #[test]
    fn test_hello_world_ciphertext_length() {
        let recipient = KeyPair::generate();
        let payload = b"hello world";

        let envelope = seal(payload, recipient.public_key()).unwrap();

        // Decode the wire form and measure the ciphertext field directly
        let json = envelope.to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let ciphertext = BASE64
            .decode(value["ciphertext_b64"].as_str().unwrap())
            .unwrap();

        assert_eq!(ciphertext.len(), payload.len() + TAG_SIZE);
        assert_eq!(
            open(&envelope, recipient.private_key()).unwrap(),
            payload.to_vec()
        );
    }

    #[test]
    fn test_seal_is_nondeterministic() {
        let recipient = KeyPair::generate();
        let payload = b"same payload";

        let a = seal(payload, recipient.public_key()).unwrap();
        let b = seal(payload, recipient.public_key()).unwrap();

        assert_ne!(a.ephemeral_public_pem(), b.ephemeral_public_pem());
        assert_ne!(a.salt(), b.salt());
        assert_ne!(a.nonce(), b.nonce());
        assert_ne!(a.ciphertext(), b.ciphertext());
    }

    #[test]
    fn test_seal_with_seeded_rng_is_reproducible() {
        let recipient = KeyPair::generate();
        let payload = b"payload";

        let a = seal_with(&mut ChaCha20Rng::seed_from_u64(3), payload, recipient.public_key())
            .unwrap();
        let b = seal_with(&mut ChaCha20Rng::seed_from_u64(3), payload, recipient.public_key())
            .unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_wrong_private_key_fails() {
        let recipient = KeyPair::generate();
        let other = KeyPair::generate();

        let envelope = seal(b"secret", recipient.public_key()).unwrap();
        let result = open(&envelope, other.private_key());

        assert!(matches!(result, Err(CryptoError::Decryption)));
    }

    #[test]
    fn test_tampered_ciphertext_fails_opaquely() {
        let recipient = KeyPair::generate();
        let envelope = seal(b"secret", recipient.public_key()).unwrap();

        let mut ciphertext = envelope.ciphertext().to_vec();
        ciphertext[0] ^= 0x01;
        let tampered = Envelope::new(
            envelope.ephemeral_public_pem().to_vec(),
            envelope.salt().clone(),
            envelope.nonce().clone(),
            ciphertext,
        );

        let result = open(&tampered, recipient.private_key());
        assert!(matches!(result, Err(CryptoError::Decryption)));
    }

    #[test]
    fn test_tampered_salt_fails_opaquely() {
        let recipient = KeyPair::generate();
        let envelope = seal(b"secret", recipient.public_key()).unwrap();

        let mut salt = *envelope.salt().as_bytes();
        salt[0] ^= 0x01;
        let tampered = Envelope::new(
            envelope.ephemeral_public_pem().to_vec(),
            Salt::from_bytes(&salt).unwrap(),
            envelope.nonce().clone(),
            envelope.ciphertext().to_vec(),
        );

        let result = open(&tampered, recipient.private_key());
        assert!(matches!(result, Err(CryptoError::Decryption)));
    }

    #[test]
    fn test_tampered_nonce_fails_opaquely() {
        let recipient = KeyPair::generate();
        let envelope = seal(b"secret", recipient.public_key()).unwrap();

        let mut nonce = *envelope.nonce().as_bytes();
        nonce[0] ^= 0x01;
        let tampered = Envelope::new(
            envelope.ephemeral_public_pem().to_vec(),
            envelope.salt().clone(),
            Nonce::from_bytes(&nonce).unwrap(),
            envelope.ciphertext().to_vec(),
        );

        let result = open(&tampered, recipient.private_key());
        assert!(matches!(result, Err(CryptoError::Decryption)));
    }

    #[test]
    fn test_tampered_ephemeral_key_fails_opaquely() {
        let recipient = KeyPair::generate();
        let envelope = seal(b"secret", recipient.public_key()).unwrap();

        // Flip one bit inside the base64 body of the PEM
        let mut pem = envelope.ephemeral_public_pem().to_vec();
        let idx = pem.len() / 2;
        pem[idx] ^= 0x01;
        let tampered = Envelope::new(
            pem,
            envelope.salt().clone(),
            envelope.nonce().clone(),
            envelope.ciphertext().to_vec(),
        );

        let result = open(&tampered, recipient.private_key());
        assert!(matches!(result, Err(CryptoError::Decryption)));
    }

    #[test]
    fn test_swapped_ephemeral_key_fails_opaquely() {
        let recipient = KeyPair::generate();
        let envelope = seal(b"secret", recipient.public_key()).unwrap();

        // A valid but unrelated ephemeral key
        let other = KeyPair::generate();
        let tampered = Envelope::new(
            other.public_key().to_spki_pem().unwrap().into_bytes(),
            envelope.salt().clone(),
            envelope.nonce().clone(),
            envelope.ciphertext().to_vec(),
        );

        let result = open(&tampered, recipient.private_key());
        assert!(matches!(result, Err(CryptoError::Decryption)));
    }

    #[test]
    fn test_garbage_fields_fail_as_decryption_not_format() {
        let recipient = KeyPair::generate();
        let reference = seal(b"secret", recipient.public_key()).unwrap();

        // Structurally valid envelope whose fields are random bytes of the
        // correct sizes: decodes fine, then fails opaquely inside open.
        let garbage = Envelope::new(
            vec![0xA5; reference.ephemeral_public_pem().len()],
            Salt::from_bytes(&[0x5A; 16]).unwrap(),
            Nonce::from_bytes(&[0xC3; 12]).unwrap(),
            vec![0x3C; reference.ciphertext().len()],
        );

        let json = garbage.to_json();
        let decoded = Envelope::from_json(&json).expect("structure is valid");

        let result = open(&decoded, recipient.private_key());
        assert!(matches!(result, Err(CryptoError::Decryption)));
    }

    #[test]
    fn test_roundtrip_through_wire_form() {
        let recipient = KeyPair::generate();
        let payload = "pesan rahasia untuk laporan".as_bytes();

        let envelope = seal(payload, recipient.public_key()).unwrap();
        let json = envelope.to_json();
        let restored = Envelope::from_json(&json).unwrap();

        assert_eq!(envelope, restored);
        assert_eq!(
            open(&restored, recipient.private_key()).unwrap(),
            payload.to_vec()
        );
    }
}
