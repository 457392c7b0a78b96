//! Fuzz target for private key PEM parsing.
//!
//! Tests that parsing arbitrary text as a PKCS#8 private key, with and
//! without a passphrase, is handled safely.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sandi_crypto::PrivateKey;

fuzz_target!(|data: &[u8]| {
    let Ok(pem) = std::str::from_utf8(data) else {
        return;
    };

    // Neither path may panic, whatever the input
    let _ = PrivateKey::from_pkcs8_pem(pem, None);
    let _ = PrivateKey::from_pkcs8_pem(pem, Some(b"fuzz"));
});
