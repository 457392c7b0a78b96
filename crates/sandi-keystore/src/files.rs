//! Payload and envelope files.
//!
//! The protocol core treats payloads as opaque bytes; this module is where
//! the text convention lives. Plaintext files are read and written as
//! UTF-8, envelopes as pretty-printed JSON in the canonical wire form.

use std::path::Path;

use tracing::debug;

use sandi_crypto::Envelope;

use crate::keyring::{read_utf8, write_file};
use crate::Result;

/// Read a plaintext payload file as UTF-8 text.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid UTF-8.
pub fn read_plaintext(path: &Path) -> Result<String> {
    let text = read_utf8(path)?;
    debug!(path = %path.display(), bytes = text.len(), "read plaintext");
    Ok(text)
}

/// Write a recovered plaintext payload as UTF-8 text.
///
/// Creates parent directories as needed.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_plaintext(path: &Path, text: &str) -> Result<()> {
    write_file(path, text.as_bytes())?;
    debug!(path = %path.display(), bytes = text.len(), "wrote plaintext");
    Ok(())
}

/// Write an envelope to a file in the JSON wire form.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_envelope(path: &Path, envelope: &Envelope) -> Result<()> {
    write_file(path, envelope.to_json().as_bytes())?;
    debug!(path = %path.display(), "wrote envelope");
    Ok(())
}

/// Read an envelope from a JSON wire-form file.
///
/// Ignores any extra fields alongside the four envelope fields.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the envelope is
/// structurally malformed.
pub fn read_envelope(path: &Path) -> Result<Envelope> {
    let json = read_utf8(path)?;
    let envelope = Envelope::from_json(&json)?;
    debug!(path = %path.display(), "read envelope");
    Ok(envelope)
}
