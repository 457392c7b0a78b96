//! Error types for key and envelope file storage.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Cryptographic operation failed.
    #[error("crypto error: {0}")]
    Crypto(#[from] sandi_crypto::CryptoError),

    /// Reading a file failed.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Writing a file failed.
    #[error("failed to write {path}: {source}")]
    Write {
        /// The file that could not be written.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// A payload file is not valid UTF-8.
    #[error("{path} is not valid UTF-8 text")]
    NotUtf8 {
        /// The offending file.
        path: PathBuf,
    },
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;
