//! HMAC-SHA signing and verification (HS256, HS384, HS512)

use crate::algorithms::DigestWidth;
use crate::error::{JwtError, JwtResult};
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

#[inline]
fn sign_hs256(message: &[u8], secret: &[u8]) -> JwtResult<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| JwtError::InvalidKey(format!("Invalid HMAC key: {e}")))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

#[inline]
fn sign_hs384(message: &[u8], secret: &[u8]) -> JwtResult<Vec<u8>> {
    let mut mac = HmacSha384::new_from_slice(secret)
        .map_err(|e| JwtError::InvalidKey(format!("Invalid HMAC key: {e}")))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

#[inline]
fn sign_hs512(message: &[u8], secret: &[u8]) -> JwtResult<Vec<u8>> {
    let mut mac = HmacSha512::new_from_slice(secret)
        .map_err(|e| JwtError::InvalidKey(format!("Invalid HMAC key: {e}")))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Keyed hash of `message`
pub(crate) fn sign(digest: DigestWidth, message: &[u8], secret: &[u8]) -> JwtResult<Vec<u8>> {
    match digest {
        DigestWidth::Sha256 => sign_hs256(message, secret),
        DigestWidth::Sha384 => sign_hs384(message, secret),
        DigestWidth::Sha512 => sign_hs512(message, secret),
    }
}

/// Recompute the MAC and compare in constant time.
///
/// A length mismatch returns early; the length of a MAC is public.
pub(crate) fn verify(
    digest: DigestWidth,
    message: &[u8],
    signature: &[u8],
    secret: &[u8],
) -> JwtResult<()> {
    let expected = sign(digest, message, secret)?;
    if bool::from(expected.as_slice().ct_eq(signature)) {
        Ok(())
    } else {
        Err(JwtError::SignatureInvalid)
    }
}
