//! Key files on disk.
//!
//! Private keys are stored as PKCS#8 PEM (optionally passphrase-encrypted),
//! public keys as SubjectPublicKeyInfo PEM, the formats everything from
//! OpenSSL to the Python `cryptography` package reads and writes. Parent
//! directories are created as needed; on Unix, private key files are
//! written with mode 0600.
//!
//! File paths are logged at debug level; key material never is.

use std::fs;
use std::path::Path;

use tracing::debug;

use sandi_crypto::{PrivateKey, PublicKey};

use crate::{Result, StoreError};

/// Write a private key to `path` as PKCS#8 PEM.
///
/// With a passphrase the key is encrypted under PBES2; without one the
/// file contents are the bare key, protected only by file permissions.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn save_private_key(
    path: &Path,
    key: &PrivateKey,
    passphrase: Option<&[u8]>,
) -> Result<()> {
    let pem = key.to_pkcs8_pem(passphrase)?;
    write_file(path, pem.as_bytes())?;
    restrict_permissions(path)?;

    debug!(path = %path.display(), encrypted = passphrase.is_some(), "wrote private key");
    Ok(())
}

/// Load a private key from a PKCS#8 PEM file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the PEM is malformed, or
/// the passphrase is wrong or missing for an encrypted key.
pub fn load_private_key(path: &Path, passphrase: Option<&[u8]>) -> Result<PrivateKey> {
    let pem = read_utf8(path)?;
    let key = PrivateKey::from_pkcs8_pem(&pem, passphrase)?;

    debug!(path = %path.display(), "loaded private key");
    Ok(key)
}

/// Write a public key to `path` as SubjectPublicKeyInfo PEM.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn save_public_key(path: &Path, key: &PublicKey) -> Result<()> {
    let pem = key.to_spki_pem()?;
    write_file(path, pem.as_bytes())?;

    debug!(path = %path.display(), "wrote public key");
    Ok(())
}

/// Load a public key from a SubjectPublicKeyInfo PEM file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not contain a
/// valid P-256 public key.
pub fn load_public_key(path: &Path) -> Result<PublicKey> {
    let pem = read_utf8(path)?;
    let key = PublicKey::from_spki_pem(&pem)?;

    debug!(path = %path.display(), "loaded public key");
    Ok(key)
}

pub(crate) fn read_utf8(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| StoreError::NotUtf8 {
        path: path.to_path_buf(),
    })
}

pub(crate) fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }
    fs::write(path, contents).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|source| {
        StoreError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
