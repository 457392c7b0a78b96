//! Fuzz target for public key PEM parsing.
//!
//! Tests that parsing arbitrary text as an SPKI PEM public key is handled
//! safely.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sandi_crypto::PublicKey;

fuzz_target!(|data: &[u8]| {
    let Ok(pem) = std::str::from_utf8(data) else {
        return;
    };

    // Should succeed only for valid P-256 SPKI documents - never panic
    if let Ok(key) = PublicKey::from_spki_pem(pem) {
        // A parsed key is always a valid point and re-encodes cleanly
        let sec1 = key.to_sec1_bytes();
        let roundtrip = PublicKey::from_sec1_bytes(&sec1).unwrap();
        assert_eq!(key, roundtrip);
    }
});
