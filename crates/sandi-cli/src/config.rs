//! Configuration for the sandi front end.
//!
//! All paths live under a single data directory. Defaults match the
//! classic layout (`data/input.txt`, `data/output.txt`, key PEMs next to
//! them); a `sandi.json` file in the working directory overrides them.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Default data directory.
const DEFAULT_DATA_DIR: &str = "data";

/// Name of the optional configuration file.
pub const CONFIG_FILE: &str = "sandi.json";

/// Front-end configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding keys, payloads, and envelopes.
    pub data_dir: PathBuf,

    /// Default plaintext input file (relative to `data_dir`).
    pub input_file: PathBuf,

    /// Default envelope output file (relative to `data_dir`).
    pub output_file: PathBuf,

    /// Recovered plaintext file (relative to `data_dir`).
    pub decrypted_file: PathBuf,

    /// Private key PEM file (relative to `data_dir`).
    pub private_key_file: PathBuf,

    /// Public key PEM file (relative to `data_dir`).
    pub public_key_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            input_file: PathBuf::from("input.txt"),
            output_file: PathBuf::from("output.txt"),
            decrypted_file: PathBuf::from("decrypted.txt"),
            private_key_file: PathBuf::from("privkey.pem"),
            public_key_file: PathBuf::from("pubkey.pem"),
        }
    }
}

impl Config {
    /// Load configuration, falling back to defaults when no config file
    /// exists.
    pub fn load() -> Result<Self> {
        let path = Path::new(CONFIG_FILE);
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {CONFIG_FILE}"))?;
            serde_json::from_str(&content)
                .with_context(|| format!("failed to parse {CONFIG_FILE}"))?
        } else {
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            bail!("data_dir cannot be empty");
        }
        for (name, path) in [
            ("input_file", &self.input_file),
            ("output_file", &self.output_file),
            ("decrypted_file", &self.decrypted_file),
            ("private_key_file", &self.private_key_file),
            ("public_key_file", &self.public_key_file),
        ] {
            if path.as_os_str().is_empty() {
                bail!("{name} cannot be empty");
            }
        }
        Ok(())
    }

    /// Default plaintext input path.
    pub fn input_path(&self) -> PathBuf {
        self.data_dir.join(&self.input_file)
    }

    /// Default envelope output path.
    pub fn output_path(&self) -> PathBuf {
        self.data_dir.join(&self.output_file)
    }

    /// Recovered plaintext path.
    pub fn decrypted_path(&self) -> PathBuf {
        self.data_dir.join(&self.decrypted_file)
    }

    /// Private key path.
    pub fn private_key_path(&self) -> PathBuf {
        self.data_dir.join(&self.private_key_file)
    }

    /// Public key path.
    pub fn public_key_path(&self) -> PathBuf {
        self.data_dir.join(&self.public_key_file)
    }
}
