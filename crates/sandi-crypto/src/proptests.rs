//! Property-based tests for the envelope protocol.
//!
//! These use proptest to verify protocol properties over arbitrary inputs:
//!
//! - Roundtrip properties (seal/open, envelope JSON codec)
//! - Tamper sensitivity (any flipped ciphertext byte is rejected)
//! - Uniqueness properties (fresh randomness per seal)
//! - Error handling (wrong keys and bad lengths are rejected)

use proptest::prelude::*;

use crate::{
    open, seal, CryptoError, Envelope, KeyPair, Nonce, Salt, NONCE_SIZE, SALT_SIZE, TAG_SIZE,
};

// ==================== Seal/Open Property Tests ====================

proptest! {
    // Key generation dominates the runtime of every case, so keep the
    // case counts modest.
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Sealing then opening returns the original payload, for any payload.
    #[test]
    fn seal_open_roundtrip(payload in prop::collection::vec(any::<u8>(), 0..2000)) {
        let recipient = KeyPair::generate();

        let envelope = seal(&payload, recipient.public_key()).unwrap();
        let recovered = open(&envelope, recipient.private_key()).unwrap();

        prop_assert_eq!(payload, recovered);
    }

    /// The ciphertext is always exactly payload length plus the tag.
    #[test]
    fn ciphertext_length_is_payload_plus_tag(payload in prop::collection::vec(any::<u8>(), 0..2000)) {
        let recipient = KeyPair::generate();
        let envelope = seal(&payload, recipient.public_key()).unwrap();

        prop_assert_eq!(envelope.ciphertext().len(), payload.len() + TAG_SIZE);
    }

    /// Opening with any other private key fails.
    #[test]
    fn wrong_key_fails(payload in prop::collection::vec(any::<u8>(), 1..500)) {
        let recipient = KeyPair::generate();
        let other = KeyPair::generate();

        let envelope = seal(&payload, recipient.public_key()).unwrap();
        let result = open(&envelope, other.private_key());

        prop_assert!(matches!(result, Err(CryptoError::Decryption)));
    }

    /// Two seals of the same payload never coincide in any field.
    #[test]
    fn seal_is_fresh_per_call(payload in prop::collection::vec(any::<u8>(), 0..500)) {
        let recipient = KeyPair::generate();

        let a = seal(&payload, recipient.public_key()).unwrap();
        let b = seal(&payload, recipient.public_key()).unwrap();

        prop_assert_ne!(a.ephemeral_public_pem(), b.ephemeral_public_pem());
        prop_assert_ne!(a.salt().as_bytes(), b.salt().as_bytes());
        prop_assert_ne!(a.nonce().as_bytes(), b.nonce().as_bytes());
        prop_assert_ne!(a.ciphertext(), b.ciphertext());
    }

    /// Flipping any single ciphertext bit makes open fail; altered
    /// plaintext is never returned.
    #[test]
    fn tampered_ciphertext_fails(
        payload in prop::collection::vec(any::<u8>(), 1..500),
        tamper_index in any::<usize>(),
        tamper_bit in 0u8..8
    ) {
        let recipient = KeyPair::generate();
        let envelope = seal(&payload, recipient.public_key()).unwrap();

        let mut ciphertext = envelope.ciphertext().to_vec();
        let idx = tamper_index % ciphertext.len();
        ciphertext[idx] ^= 1 << tamper_bit;

        let tampered = Envelope::new(
            envelope.ephemeral_public_pem().to_vec(),
            envelope.salt().clone(),
            envelope.nonce().clone(),
            ciphertext,
        );

        let result = open(&tampered, recipient.private_key());
        prop_assert!(matches!(result, Err(CryptoError::Decryption)));
    }
}

// ==================== Envelope Codec Property Tests ====================

proptest! {
    /// The JSON codec reproduces all four fields byte-exactly, for
    /// arbitrary field contents.
    #[test]
    fn envelope_json_roundtrip(
        eph in prop::collection::vec(any::<u8>(), 0..300),
        salt in prop::collection::vec(any::<u8>(), SALT_SIZE..=SALT_SIZE),
        nonce in prop::collection::vec(any::<u8>(), NONCE_SIZE..=NONCE_SIZE),
        ciphertext in prop::collection::vec(any::<u8>(), 0..1000)
    ) {
        let envelope = Envelope::new(
            eph,
            Salt::from_bytes(&salt).unwrap(),
            Nonce::from_bytes(&nonce).unwrap(),
            ciphertext,
        );

        let restored = Envelope::from_json(&envelope.to_json()).unwrap();
        prop_assert_eq!(envelope, restored);
    }

    /// Salt construction rejects every wrong length.
    #[test]
    fn salt_rejects_wrong_lengths(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        prop_assume!(bytes.len() != SALT_SIZE);
        prop_assert!(Salt::from_bytes(&bytes).is_err());
    }

    /// Nonce construction rejects every wrong length.
    #[test]
    fn nonce_rejects_wrong_lengths(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        prop_assume!(bytes.len() != NONCE_SIZE);
        prop_assert!(Nonce::from_bytes(&bytes).is_err());
    }
}
