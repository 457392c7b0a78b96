//! End-to-end protocol tests across the public API: key generation, PEM
//! interchange, sealing, the JSON wire form, and opening.

use sandi_crypto::{open, seal, CryptoError, Envelope, KeyPair, PrivateKey, PublicKey, TAG_SIZE};

#[test]
fn full_pipeline_with_pem_interchange() {
    // Recipient generates a key pair and publishes the public half as PEM
    let recipient = KeyPair::generate();
    let public_pem = recipient.public_key().to_spki_pem().unwrap();
    let private_pem = recipient.private_key().to_pkcs8_pem(None).unwrap();

    // Sender only ever sees the PEM
    let sender_view = PublicKey::from_spki_pem(&public_pem).unwrap();
    let envelope = seal("pesan rahasia".as_bytes(), &sender_view).unwrap();
    let json = envelope.to_json();

    // Recipient reloads their key from PEM and opens the wire-form envelope
    let reloaded = PrivateKey::from_pkcs8_pem(&private_pem, None).unwrap();
    let received = Envelope::from_json(&json).unwrap();
    let payload = open(&received, &reloaded).unwrap();

    assert_eq!(payload, "pesan rahasia".as_bytes());
}

#[test]
fn full_pipeline_with_passphrase_protected_key() {
    let recipient = KeyPair::generate();
    let private_pem = recipient
        .private_key()
        .to_pkcs8_pem(Some(b"kata sandi"))
        .unwrap();

    let envelope = seal(b"protected", recipient.public_key()).unwrap();

    let reloaded = PrivateKey::from_pkcs8_pem(&private_pem, Some(b"kata sandi")).unwrap();
    assert_eq!(open(&envelope, &reloaded).unwrap(), b"protected");

    // The wrong passphrase never gets as far as the envelope
    assert!(matches!(
        PrivateKey::from_pkcs8_pem(&private_pem, Some(b"salah")),
        Err(CryptoError::WrongPassphrase)
    ));
}

#[test]
fn hello_world_scenario() {
    let recipient = KeyPair::generate();
    let envelope = seal(b"hello world", recipient.public_key()).unwrap();

    assert_eq!(envelope.ciphertext().len(), "hello world".len() + TAG_SIZE);
    assert_eq!(
        open(&envelope, recipient.private_key()).unwrap(),
        b"hello world"
    );
}

#[test]
fn envelope_survives_reserialization() {
    let recipient = KeyPair::generate();
    let envelope = seal(b"stable wire form", recipient.public_key()).unwrap();

    // Encode, decode, encode again: the wire form is stable
    let first = envelope.to_json();
    let second = Envelope::from_json(&first).unwrap().to_json();
    assert_eq!(first, second);
}

#[test]
fn open_rejects_cross_recipient_envelopes() {
    let alice = KeyPair::generate();
    let bob = KeyPair::generate();

    let for_alice = seal(b"for alice only", alice.public_key()).unwrap();

    assert!(open(&for_alice, bob.private_key()).is_err());
    assert_eq!(
        open(&for_alice, alice.private_key()).unwrap(),
        b"for alice only"
    );
}

#[test]
fn concurrent_seals_are_independent() {
    use std::thread;

    let recipient = KeyPair::generate();
    let public_pem = recipient.public_key().to_spki_pem().unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let pem = public_pem.clone();
            thread::spawn(move || {
                let key = PublicKey::from_spki_pem(&pem).unwrap();
                let payload = format!("message {i}");
                (payload.clone(), seal(payload.as_bytes(), &key).unwrap())
            })
        })
        .collect();

    for handle in handles {
        let (payload, envelope) = handle.join().unwrap();
        assert_eq!(
            open(&envelope, recipient.private_key()).unwrap(),
            payload.into_bytes()
        );
    }
}
