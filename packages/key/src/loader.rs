//! PEM private key and certificate loading
//!
//! Private keys come from `PRIVATE KEY` (PKCS#8) or `RSA PRIVATE KEY` (PKCS#1)
//! blocks. Public keys come from the first `CERTIFICATE` block, taken from the
//! certificate's subject public key info. Any other PEM blocks in the input are
//! skipped.

use crate::error::{KeyError, KeyResult};
use der::{Decode, Encode};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use rustls_pemfile::Item;
use std::path::Path;
use tracing::debug;
use x509_cert::Certificate;

/// Opaque handle for a signing key
pub type PrivateKeyHandle = RsaPrivateKey;

/// Opaque handle for a verification key
pub type PublicKeyHandle = RsaPublicKey;

fn read_pem_file(path: &Path) -> KeyResult<String> {
    std::fs::read_to_string(path).map_err(|source| KeyError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load an RSA private key from a PEM file.
///
/// # Errors
/// `Io` when the file cannot be read, `KeyLoad` when it holds no usable RSA
/// private key.
pub fn load_private_key(path: impl AsRef<Path>) -> KeyResult<PrivateKeyHandle> {
    let path = path.as_ref();
    let pem = read_pem_file(path)?;
    let key = private_key_from_pem(&pem)?;
    debug!(path = %path.display(), "loaded RSA private key");
    Ok(key)
}

/// Load the RSA public key of the first certificate in a PEM file.
///
/// # Errors
/// `Io` when the file cannot be read, `Certificate` when there is no
/// certificate or it does not carry an RSA key.
pub fn load_public_key_from_certificate(path: impl AsRef<Path>) -> KeyResult<PublicKeyHandle> {
    let path = path.as_ref();
    let pem = read_pem_file(path)?;
    let key = public_key_from_certificate_pem(&pem)?;
    debug!(path = %path.display(), "loaded RSA public key from certificate");
    Ok(key)
}

/// Parse an RSA private key from PEM text.
///
/// # Errors
/// `KeyLoad` when no PKCS#8 or PKCS#1 block is present or the key is invalid.
pub fn private_key_from_pem(pem: &str) -> KeyResult<PrivateKeyHandle> {
    let mut reader = pem.as_bytes();
    for item in rustls_pemfile::read_all(&mut reader) {
        let item = item.map_err(|e| KeyError::KeyLoad(format!("Failed to parse PEM: {e}")))?;
        match item {
            Item::Pkcs8Key(der) => {
                debug!("found PKCS#8 private key block");
                return private_key_from_pkcs8_der(der.secret_pkcs8_der());
            }
            Item::Pkcs1Key(der) => {
                debug!("found PKCS#1 private key block");
                return RsaPrivateKey::from_pkcs1_der(der.secret_pkcs1_der())
                    .map_err(|e| KeyError::KeyLoad(format!("Invalid PKCS#1 RSA key: {e}")));
            }
            Item::Sec1Key(_) => {
                return Err(KeyError::key_load("EC private keys are not supported"));
            }
            _ => {}
        }
    }
    Err(KeyError::key_load("no private key found in PEM data"))
}

/// Parse an RSA private key from PKCS#8 DER bytes.
///
/// # Errors
/// `KeyLoad` when the bytes are not a PKCS#8 RSA key.
pub fn private_key_from_pkcs8_der(der: &[u8]) -> KeyResult<PrivateKeyHandle> {
    RsaPrivateKey::from_pkcs8_der(der)
        .map_err(|e| KeyError::KeyLoad(format!("Invalid PKCS#8 RSA key: {e}")))
}

/// Extract the RSA public key of the first certificate in PEM text.
///
/// # Errors
/// `Certificate` when there is no certificate or it cannot be used.
pub fn public_key_from_certificate_pem(pem: &str) -> KeyResult<PublicKeyHandle> {
    let mut reader = pem.as_bytes();
    let cert_der = rustls_pemfile::certs(&mut reader)
        .next()
        .ok_or_else(|| KeyError::certificate("no certificate found in file"))?
        .map_err(|e| KeyError::Certificate(format!("Failed to parse PEM: {e}")))?;
    public_key_from_certificate_der(&cert_der)
}

/// Extract the RSA public key from a DER encoded X.509 certificate.
///
/// # Errors
/// `Certificate` when the certificate cannot be parsed or its key is not RSA.
pub fn public_key_from_certificate_der(der: &[u8]) -> KeyResult<PublicKeyHandle> {
    let cert = Certificate::from_der(der)
        .map_err(|e| KeyError::Certificate(format!("X.509 parsing failed: {e}")))?;
    let spki = cert
        .tbs_certificate
        .subject_public_key_info
        .to_der()
        .map_err(|e| KeyError::Certificate(format!("Failed to encode public key: {e}")))?;
    RsaPublicKey::from_public_key_der(&spki).map_err(|e| {
        KeyError::Certificate(format!("Certificate does not carry an RSA public key: {e}"))
    })
}
