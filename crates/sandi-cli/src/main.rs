//! sandi CLI
//!
//! A menu-driven front end for ECIES file encryption.
//!
//! ## Features
//!
//! - Generate a P-256 key pair (PEM files, optional passphrase)
//! - Encrypt a text file to the public key, producing a JSON envelope
//!   plus an illustrative report of the ciphertext structure
//! - Decrypt an envelope back to plaintext with the private key
//!
//! ## Usage
//!
//! Run with: `cargo run --release --bin sandi`
//!
//! Menu actions:
//! - `1` - Encrypt file (data/input.txt -> data/output.txt)
//! - `2` - Decrypt file (data/output.txt -> data/decrypted.txt)
//! - `3` - Generate key pair (if none exists yet)
//! - `0` - Quit

mod config;
mod report;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::style::{Color, ResetColor, SetForegroundColor};
use crossterm::ExecutableCommand;
use tracing::info;

use sandi_crypto::KeyPair;
use sandi_keystore as keystore;

use config::Config;
use report::EncryptionReport;

/// A menu selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Encrypt,
    Decrypt,
    GenerateKeys,
    Quit,
}

impl Action {
    /// Parse a menu choice.
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Encrypt),
            "2" => Some(Self::Decrypt),
            "3" => Some(Self::GenerateKeys),
            "0" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// The CLI application state.
struct App {
    config: Config,
}

impl App {
    fn new() -> Result<Self> {
        let config = Config::load()?;
        info!(data_dir = %config.data_dir.display(), "using data directory");
        Ok(Self { config })
    }

    /// Run the main menu loop.
    fn run(&self) -> Result<()> {
        let stdin = io::stdin();

        loop {
            print_header();
            print_menu(&self.config);

            let choice = prompt_line(&stdin, "Choose (0-3): ")?;
            match Action::parse(&choice) {
                Some(Action::Encrypt) => {
                    if let Err(e) = self.action_encrypt(&stdin) {
                        print_error(&format!("{e:#}"));
                    }
                }
                Some(Action::Decrypt) => {
                    if let Err(e) = self.action_decrypt(&stdin) {
                        print_error(&format!("{e:#}"));
                    }
                }
                Some(Action::GenerateKeys) => {
                    if let Err(e) = self.action_generate_keys(&stdin) {
                        print_error(&format!("{e:#}"));
                    }
                }
                Some(Action::Quit) => {
                    print_info("Goodbye!");
                    return Ok(());
                }
                None => print_warning("Unrecognized choice, try again."),
            }

            let _ = prompt_line(&stdin, "\nPress Enter to return to the menu...");
        }
    }

    /// Generate a key pair and write both PEM files.
    fn action_generate_keys(&self, stdin: &io::Stdin) -> Result<()> {
        let passphrase = prompt_line(stdin, "Passphrase for private key (Enter for none): ")?;
        let passphrase = if passphrase.is_empty() {
            None
        } else {
            Some(passphrase.into_bytes())
        };

        let pair = KeyPair::generate();
        let private_path = self.config.private_key_path();
        let public_path = self.config.public_key_path();

        keystore::save_private_key(&private_path, pair.private_key(), passphrase.as_deref())
            .context("failed to save private key")?;
        keystore::save_public_key(&public_path, pair.public_key())
            .context("failed to save public key")?;

        print_success("Key pair written:");
        println!("   - private key : {}", private_path.display());
        println!("   - public key  : {}", public_path.display());
        if passphrase.is_none() {
            print_warning("Private key is NOT passphrase-protected.");
        }
        Ok(())
    }

    /// Encrypt a plaintext file to the stored public key.
    fn action_encrypt(&self, stdin: &io::Stdin) -> Result<()> {
        print_section("Encrypt");

        let input = prompt_path(stdin, "Input file", &self.config.input_path())?;
        let output = prompt_path(stdin, "Output file", &self.config.output_path())?;

        if !input.exists() {
            print_error(&format!("input file not found: {}", input.display()));
            return Ok(());
        }

        if !self.config.public_key_path().exists() {
            print_warning("No public key found, generating a fresh key pair...");
            self.action_generate_keys(stdin)?;
        }

        let public_key = keystore::load_public_key(&self.config.public_key_path())
            .context("failed to load public key")?;
        let plaintext = keystore::read_plaintext(&input).context("failed to read input")?;
        if plaintext.is_empty() {
            print_warning(&format!("{} is empty, nothing to do", input.display()));
            return Ok(());
        }

        let started = Instant::now();
        let envelope =
            sandi_crypto::seal(plaintext.as_bytes(), &public_key).context("encryption failed")?;
        let elapsed = started.elapsed();

        keystore::write_envelope(&output, &envelope).context("failed to write envelope")?;

        let report = EncryptionReport::build(&envelope, &public_key)?;
        let report_path = sibling_report_path(&output);
        keystore::write_plaintext(&report_path, &report.to_json())
            .context("failed to write report")?;

        print_success(&format!(
            "Encryption finished in {:.4} s.",
            elapsed.as_secs_f64()
        ));
        println!("   - envelope : {}", output.display());
        println!("   - report   : {}", report_path.display());
        Ok(())
    }

    /// Decrypt an envelope file with the stored private key.
    fn action_decrypt(&self, stdin: &io::Stdin) -> Result<()> {
        print_section("Decrypt");

        let input = prompt_path(stdin, "Envelope file", &self.config.output_path())?;

        if !input.exists() {
            print_error(&format!("envelope file not found: {}", input.display()));
            return Ok(());
        }
        if !self.config.private_key_path().exists() {
            print_error("No private key found. Generate a key pair first (menu 3).");
            return Ok(());
        }

        let private_key = self.load_private_key(stdin)?;
        let envelope =
            keystore::read_envelope(&input).context("failed to read envelope")?;

        let started = Instant::now();
        let payload = sandi_crypto::open(&envelope, &private_key).context("decryption failed")?;
        let elapsed = started.elapsed();

        let text = String::from_utf8(payload).context("recovered payload is not UTF-8")?;

        print_success(&format!(
            "Decryption finished in {:.4} s.",
            elapsed.as_secs_f64()
        ));
        println!();
        print_section("Recovered plaintext");
        println!("{text}");

        let decrypted_path = self.config.decrypted_path();
        keystore::write_plaintext(&decrypted_path, &text)
            .context("failed to write recovered plaintext")?;
        print_info(&format!("Also saved to {}", decrypted_path.display()));
        Ok(())
    }

    /// Load the private key, prompting for a passphrase when needed.
    fn load_private_key(&self, stdin: &io::Stdin) -> Result<sandi_crypto::PrivateKey> {
        let path = self.config.private_key_path();

        match keystore::load_private_key(&path, None) {
            Ok(key) => Ok(key),
            Err(keystore::StoreError::Crypto(sandi_crypto::CryptoError::WrongPassphrase)) => {
                let passphrase = prompt_line(stdin, "Private key passphrase: ")?;
                keystore::load_private_key(&path, Some(passphrase.as_bytes()))
                    .context("failed to unlock private key")
            }
            Err(e) => Err(e).context("failed to load private key"),
        }
    }
}

/// Report path next to an envelope: `output.txt` -> `output.txt.report.json`.
fn sibling_report_path(envelope_path: &Path) -> PathBuf {
    PathBuf::from(format!("{}.report.json", envelope_path.display()))
}

// =============================================================================
// Terminal Output Helpers
// =============================================================================

fn print_header() {
    let mut stdout = io::stdout();
    println!();
    let _ = stdout.execute(SetForegroundColor(Color::Cyan));
    println!("=============================================");
    println!("===   SANDI - ECIES FILE ENCRYPTION TOOL  ===");
    println!("=============================================");
    let _ = stdout.execute(ResetColor);
}

fn print_menu(config: &Config) {
    println!(
        "1. Encrypt file ({} -> {})",
        config.input_path().display(),
        config.output_path().display()
    );
    println!(
        "2. Decrypt file ({} -> {})",
        config.output_path().display(),
        config.decrypted_path().display()
    );
    println!("3. Generate key pair");
    println!("0. Quit");
    println!("---------------------------------------------");
}

/// Print a section header.
fn print_section(title: &str) {
    let mut stdout = io::stdout();
    let _ = stdout.execute(SetForegroundColor(Color::White));
    println!("--- {title} ---");
    let _ = stdout.execute(ResetColor);
}

/// Print an info message.
fn print_info(message: &str) {
    let mut stdout = io::stdout();
    let _ = stdout.execute(SetForegroundColor(Color::Blue));
    print!("[INFO] ");
    let _ = stdout.execute(ResetColor);
    println!("{message}");
}

/// Print a success message.
fn print_success(message: &str) {
    let mut stdout = io::stdout();
    let _ = stdout.execute(SetForegroundColor(Color::Green));
    print!("[OK] ");
    let _ = stdout.execute(ResetColor);
    println!("{message}");
}

/// Print an error message.
fn print_error(message: &str) {
    let mut stdout = io::stdout();
    let _ = stdout.execute(SetForegroundColor(Color::Red));
    print!("[ERROR] ");
    let _ = stdout.execute(ResetColor);
    println!("{message}");
}

/// Print a warning message.
fn print_warning(message: &str) {
    let mut stdout = io::stdout();
    let _ = stdout.execute(SetForegroundColor(Color::Yellow));
    print!("[WARN] ");
    let _ = stdout.execute(ResetColor);
    println!("{message}");
}

/// Prompt for a line of input.
fn prompt_line(stdin: &io::Stdin, prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut input = String::new();
    stdin.lock().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Prompt for a path, falling back to a default on empty input.
fn prompt_path(stdin: &io::Stdin, what: &str, default: &Path) -> Result<PathBuf> {
    let input = prompt_line(stdin, &format!("{what} (Enter for {}): ", default.display()))?;
    if input.is_empty() {
        Ok(default.to_path_buf())
    } else {
        Ok(PathBuf::from(input))
    }
}

// =============================================================================
// Main Entry Point
// =============================================================================

fn main() -> Result<()> {
    // Set RUST_LOG=debug for verbose output
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let app = App::new()?;
    app.run()
}

// =============================================================================
// Tests
// =============================================================================
