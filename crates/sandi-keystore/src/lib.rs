//! # sandi-keystore
//!
//! File-backed persistence for the sandi envelope protocol.
//!
//! Provides:
//! - Key files: PKCS#8 PEM private keys (optionally passphrase-encrypted)
//!   and SubjectPublicKeyInfo PEM public keys
//! - Payload files: UTF-8 plaintext in, JSON envelopes out, and back
//!
//! The cryptographic core never touches the filesystem; everything
//! path-shaped lives here.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod files;
pub mod keyring;

pub use error::{Result, StoreError};
pub use files::{read_envelope, read_plaintext, write_envelope, write_plaintext};
pub use keyring::{load_private_key, load_public_key, save_private_key, save_public_key};
