//! Signer and verifier over the signing input
//!
//! The signing input is `base64url(header) "." base64url(body)` exactly as it
//! appears in the token; nothing here re-encodes parsed structures.

mod hmac;
mod rsa;

use crate::algorithms::Algorithm;
use crate::error::JwtResult;
use crate::keys::{ensure_family, SigningKey, VerifyingKey};

/// Produce the raw signature bytes for `signing_input`.
///
/// # Errors
/// `UnsupportedAlgorithm` if the key family does not match, otherwise whatever
/// the primitive reports.
pub(crate) fn sign(
    algorithm: Algorithm,
    key: &SigningKey,
    signing_input: &[u8],
) -> JwtResult<Vec<u8>> {
    ensure_family(algorithm, key.family())?;
    match key {
        SigningKey::Secret(secret) => hmac::sign(algorithm.digest(), signing_input, secret.expose()),
        SigningKey::Rsa(private_key) => rsa::sign(algorithm.digest(), signing_input, private_key),
    }
}

/// Check `signature` over `signing_input`.
///
/// # Errors
/// `SignatureInvalid` on mismatch, `UnsupportedAlgorithm` if the key family
/// does not match the algorithm.
pub(crate) fn verify(
    algorithm: Algorithm,
    key: &VerifyingKey,
    signing_input: &[u8],
    signature: &[u8],
) -> JwtResult<()> {
    ensure_family(algorithm, key.family())?;
    match key {
        VerifyingKey::Secret(secret) => {
            hmac::verify(algorithm.digest(), signing_input, signature, secret.expose())
        }
        VerifyingKey::Rsa(public_key) => {
            rsa::verify(algorithm.digest(), signing_input, signature, public_key)
        }
    }
}
