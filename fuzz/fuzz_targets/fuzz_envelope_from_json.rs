//! Fuzz target for Envelope::from_json.
//!
//! Tests that decoding arbitrary bytes as an envelope is handled safely.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sandi_crypto::Envelope;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };

    // Should succeed for well-formed envelopes, fail otherwise - never panic
    if let Ok(envelope) = Envelope::from_json(json) {
        // Fixed-size fields hold by construction
        assert_eq!(envelope.salt().as_bytes().len(), sandi_crypto::SALT_SIZE);
        assert_eq!(envelope.nonce().as_bytes().len(), sandi_crypto::NONCE_SIZE);

        // Re-encoding a decoded envelope reproduces the fields byte-exactly
        let roundtrip = Envelope::from_json(&envelope.to_json()).unwrap();
        assert_eq!(envelope, roundtrip);
    }
});
