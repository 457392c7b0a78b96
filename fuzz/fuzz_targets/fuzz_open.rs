//! Fuzz target for opening envelopes.
//!
//! Feeds arbitrary decoded envelopes to `open` and checks it rejects them
//! gracefully - the only acceptable outcomes are plaintext or the single
//! opaque decryption error, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sandi_crypto::{open, Envelope, KeyPair};

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(envelope) = Envelope::from_json(json) else {
        return;
    };

    let recipient = KeyPair::generate();
    let _ = open(&envelope, recipient.private_key());
});
