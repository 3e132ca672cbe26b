//! Key material for signing and verification
//!
//! Keys are typed by family so an algorithm can only ever be paired with the
//! kind of key it expects. Shared secrets are wiped from memory on drop and
//! never show up in `Debug` output.

use crate::algorithms::{Algorithm, AlgorithmFamily};
use crate::error::{JwtError, JwtResult};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Shared secret for the HMAC family
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret(Vec<u8>);

impl SharedSecret {
    /// Wrap secret bytes. Text secrets are taken as their UTF-8 bytes.
    ///
    /// # Errors
    /// Returns `InvalidKey` when the secret is empty.
    pub fn new(secret: impl AsRef<[u8]>) -> JwtResult<Self> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(JwtError::invalid_key("Key should be longer than zero"));
        }
        Ok(Self(secret.to_vec()))
    }

    pub(crate) fn expose(&self) -> &[u8] {
        &self.0
    }

    /// Secret length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false, empty secrets cannot be constructed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedSecret([REDACTED; {}])", self.0.len())
    }
}

/// Key used to produce signatures
#[derive(Clone)]
pub enum SigningKey {
    /// HMAC shared secret
    Secret(SharedSecret),
    /// RSA private key
    Rsa(Box<RsaPrivateKey>),
}

/// Key used to check signatures
#[derive(Clone)]
pub enum VerifyingKey {
    /// HMAC shared secret
    Secret(SharedSecret),
    /// RSA public key
    Rsa(Box<RsaPublicKey>),
}

impl SigningKey {
    /// Shared secret signing key
    ///
    /// # Errors
    /// Returns `InvalidKey` when the secret is empty.
    pub fn secret(secret: impl AsRef<[u8]>) -> JwtResult<Self> {
        SharedSecret::new(secret).map(SigningKey::Secret)
    }

    /// Family this key belongs to
    #[must_use]
    pub fn family(&self) -> AlgorithmFamily {
        match self {
            SigningKey::Secret(_) => AlgorithmFamily::Mac,
            SigningKey::Rsa(_) => AlgorithmFamily::Asymmetric,
        }
    }

    /// Verifying half of this key. A shared secret verifies itself.
    #[must_use]
    pub fn verifying_key(&self) -> VerifyingKey {
        match self {
            SigningKey::Secret(secret) => VerifyingKey::Secret(secret.clone()),
            SigningKey::Rsa(private_key) => {
                VerifyingKey::Rsa(Box::new(private_key.to_public_key()))
            }
        }
    }
}

impl VerifyingKey {
    /// Shared secret verifying key
    ///
    /// # Errors
    /// Returns `InvalidKey` when the secret is empty.
    pub fn secret(secret: impl AsRef<[u8]>) -> JwtResult<Self> {
        SharedSecret::new(secret).map(VerifyingKey::Secret)
    }

    /// Family this key belongs to
    #[must_use]
    pub fn family(&self) -> AlgorithmFamily {
        match self {
            VerifyingKey::Secret(_) => AlgorithmFamily::Mac,
            VerifyingKey::Rsa(_) => AlgorithmFamily::Asymmetric,
        }
    }
}

impl From<RsaPrivateKey> for SigningKey {
    fn from(key: RsaPrivateKey) -> Self {
        SigningKey::Rsa(Box::new(key))
    }
}

impl From<SharedSecret> for SigningKey {
    fn from(secret: SharedSecret) -> Self {
        SigningKey::Secret(secret)
    }
}

impl From<RsaPublicKey> for VerifyingKey {
    fn from(key: RsaPublicKey) -> Self {
        VerifyingKey::Rsa(Box::new(key))
    }
}

impl From<&RsaPrivateKey> for VerifyingKey {
    fn from(key: &RsaPrivateKey) -> Self {
        VerifyingKey::Rsa(Box::new(key.to_public_key()))
    }
}

impl From<SharedSecret> for VerifyingKey {
    fn from(secret: SharedSecret) -> Self {
        VerifyingKey::Secret(secret)
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SigningKey::Secret(secret) => f.debug_tuple("Secret").field(secret).finish(),
            SigningKey::Rsa(_) => f.write_str("Rsa([REDACTED])"),
        }
    }
}

impl fmt::Debug for VerifyingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyingKey::Secret(secret) => f.debug_tuple("Secret").field(secret).finish(),
            VerifyingKey::Rsa(_) => f.write_str("Rsa(..)"),
        }
    }
}

/// Reject an algorithm paired with a key of the other family.
pub(crate) fn ensure_family(algorithm: Algorithm, key_family: AlgorithmFamily) -> JwtResult<()> {
    if algorithm.family() == key_family {
        return Ok(());
    }
    let needed = match algorithm.family() {
        AlgorithmFamily::Mac => "a shared key",
        AlgorithmFamily::Asymmetric => "an RSA key",
    };
    Err(JwtError::UnsupportedAlgorithm(format!(
        "{algorithm} needs {needed}"
    )))
}
