//! Key pair generation and PEM interchange.
//!
//! Key pairs live on NIST P-256. Private keys serialize to PKCS#8 PEM,
//! optionally protected by a passphrase (PBES2: scrypt + AES-256-CBC);
//! public keys serialize to SubjectPublicKeyInfo PEM. These are the same
//! interchange formats OpenSSL and most other stacks produce, so keys
//! written here can be inspected or reused with standard tooling.
//!
//! ## Security Notes
//!
//! - Private key scalars are zeroized on drop (inherited from `p256`)
//! - `PrivateKey` intentionally does not implement `Clone`
//! - An unencrypted PKCS#8 file is only as safe as the filesystem it
//!   lands on; the caller decides whether that is acceptable

use pkcs8::der::Document;
use pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::curve::UNCOMPRESSED_POINT_SIZE;
use crate::{CryptoError, Result};

/// PEM type label of an unencrypted PKCS#8 private key.
const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";

/// PEM type label of a PBES2-encrypted PKCS#8 private key.
const ENCRYPTED_PRIVATE_KEY_LABEL: &str = "ENCRYPTED PRIVATE KEY";

/// PEM type label of a SubjectPublicKeyInfo public key.
const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

/// A P-256 private scalar.
///
/// Owned exclusively by its holder. The inner scalar is zeroized when
/// the value is dropped.
pub struct PrivateKey {
    inner: p256::SecretKey,
}

impl PrivateKey {
    /// Generate a fresh random private key from the system CSPRNG.
    pub fn generate() -> Self {
        Self::generate_with(&mut OsRng)
    }

    /// Generate a private key from the supplied RNG.
    ///
    /// Exists so tests can inject a seeded RNG; production callers use
    /// [`PrivateKey::generate`].
    pub fn generate_with<R>(rng: &mut R) -> Self
    where
        R: CryptoRng + RngCore,
    {
        Self {
            inner: p256::SecretKey::random(rng),
        }
    }

    /// Derive the matching public key (scalar multiple of the base point).
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: self.inner.public_key(),
        }
    }

    /// Serialize to PKCS#8 PEM.
    ///
    /// With a passphrase the document is encrypted under PBES2
    /// (scrypt + AES-256-CBC). Without one the PEM is plaintext and the
    /// caller is responsible for protecting it.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::KeyFormat`] if encoding fails.
    pub fn to_pkcs8_pem(&self, passphrase: Option<&[u8]>) -> Result<Zeroizing<String>> {
        match passphrase {
            Some(pass) => self
                .inner
                .to_pkcs8_encrypted_pem(&mut OsRng, pass, LineEnding::LF)
                .map_err(|e| CryptoError::KeyFormat(format!("private key encoding failed: {e}"))),
            None => self
                .inner
                .to_pkcs8_pem(LineEnding::LF)
                .map_err(|e| CryptoError::KeyFormat(format!("private key encoding failed: {e}"))),
        }
    }

    /// Parse a PKCS#8 PEM private key, decrypting it if a passphrase is given.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::KeyFormat`] if the PEM armor or DER structure is
    ///   malformed, or a passphrase is supplied for an unencrypted key
    /// - [`CryptoError::WrongPassphrase`] if the key is encrypted and the
    ///   passphrase is missing or does not decrypt it
    pub fn from_pkcs8_pem(pem: &str, passphrase: Option<&[u8]>) -> Result<Self> {
        let (label, _doc) = Document::from_pem(pem)
            .map_err(|e| CryptoError::KeyFormat(format!("invalid private key PEM: {e}")))?;

        match (label, passphrase) {
            (ENCRYPTED_PRIVATE_KEY_LABEL, Some(pass)) => {
                p256::SecretKey::from_pkcs8_encrypted_pem(pem, pass)
                    .map(|inner| Self { inner })
                    .map_err(|_| CryptoError::WrongPassphrase)
            }
            (ENCRYPTED_PRIVATE_KEY_LABEL, None) => Err(CryptoError::WrongPassphrase),
            (PRIVATE_KEY_LABEL, None) => p256::SecretKey::from_pkcs8_pem(pem)
                .map(|inner| Self { inner })
                .map_err(|e| CryptoError::KeyFormat(format!("invalid PKCS#8 private key: {e}"))),
            (PRIVATE_KEY_LABEL, Some(_)) => Err(CryptoError::KeyFormat(
                "passphrase supplied but private key is not encrypted".into(),
            )),
            (other, _) => Err(CryptoError::KeyFormat(format!(
                "unexpected PEM label `{other}`"
            ))),
        }
    }

    /// Non-zero scalar view, for ECDH.
    pub(crate) fn to_nonzero_scalar(&self) -> p256::NonZeroScalar {
        self.inner.to_nonzero_scalar()
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrivateKey([REDACTED])")
    }
}

// Clone intentionally NOT implemented for PrivateKey, to prevent accidental
// duplication of secret material in memory.

/// A P-256 public point.
///
/// By construction this is always a valid point on the curve and never
/// the identity element; decoding rejects anything else.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey {
    inner: p256::PublicKey,
}

impl PublicKey {
    /// Serialize to SubjectPublicKeyInfo PEM.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::KeyFormat`] if encoding fails.
    pub fn to_spki_pem(&self) -> Result<String> {
        self.inner
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| CryptoError::KeyFormat(format!("public key encoding failed: {e}")))
    }

    /// Parse a SubjectPublicKeyInfo PEM public key.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::KeyFormat`] if the PEM armor or label is wrong
    /// - [`CryptoError::InvalidPeerKey`] if the document does not carry a
    ///   valid non-identity P-256 point
    pub fn from_spki_pem(pem: &str) -> Result<Self> {
        let (label, doc) = Document::from_pem(pem)
            .map_err(|e| CryptoError::KeyFormat(format!("invalid public key PEM: {e}")))?;

        if label != PUBLIC_KEY_LABEL {
            return Err(CryptoError::KeyFormat(format!(
                "unexpected PEM label `{label}`"
            )));
        }

        p256::PublicKey::from_public_key_der(doc.as_bytes())
            .map(|inner| Self { inner })
            .map_err(|_| CryptoError::InvalidPeerKey)
    }

    /// Parse a raw SEC1 point encoding (compressed or uncompressed).
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidPeerKey`] if the bytes do not encode
    /// a valid non-identity point on the curve.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        p256::PublicKey::from_sec1_bytes(bytes)
            .map(|inner| Self { inner })
            .map_err(|_| CryptoError::InvalidPeerKey)
    }

    /// Uncompressed SEC1 encoding (`0x04 || x || y`, 65 bytes).
    pub fn to_sec1_bytes(&self) -> Vec<u8> {
        use p256::elliptic_curve::sec1::ToEncodedPoint;

        let point = self.inner.to_encoded_point(false);
        debug_assert_eq!(point.as_bytes().len(), UNCOMPRESSED_POINT_SIZE);
        point.as_bytes().to_vec()
    }

    /// Affine point view, for ECDH.
    pub(crate) fn as_affine(&self) -> &p256::AffinePoint {
        self.inner.as_affine()
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sec1 = self.to_sec1_bytes();
        write!(f, "PublicKey({:02x}{:02x}..)", sec1[1], sec1[2])
    }
}

/// A freshly generated (private, public) pairing.
///
/// Produced atomically by [`KeyPair::generate`]; the public half is always
/// the scalar multiple of the private half.
pub struct KeyPair {
    private: PrivateKey,
    public: PublicKey,
}

impl KeyPair {
    /// Generate a new key pair from the system CSPRNG.
    pub fn generate() -> Self {
        Self::generate_with(&mut OsRng)
    }

    /// Generate a new key pair from the supplied RNG.
    pub fn generate_with<R>(rng: &mut R) -> Self
    where
        R: CryptoRng + RngCore,
    {
        let private = PrivateKey::generate_with(rng);
        let public = private.public_key();
        Self { private, public }
    }

    /// The private half.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private
    }

    /// The public half.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Split into owned halves.
    pub fn into_parts(self) -> (PrivateKey, PublicKey) {
        (self.private, self.public)
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public)
            .field("private", &"[REDACTED]")
            .finish()
    }
}
