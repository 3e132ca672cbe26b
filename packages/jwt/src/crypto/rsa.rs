//! RSASSA-PKCS1-v1_5 signing and verification (RS256, RS384, RS512)

use crate::algorithms::DigestWidth;
use crate::error::{JwtError, JwtResult};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::sha2::{Sha256, Sha384, Sha512};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};

#[inline]
fn sign_rs256(message: &[u8], private_key: &RsaPrivateKey) -> JwtResult<Vec<u8>> {
    let signing_key = SigningKey::<Sha256>::new(private_key.clone());
    let signature = signing_key
        .try_sign(message)
        .map_err(|e| JwtError::CryptoBackend(format!("RS256 signing failed: {e}")))?;
    Ok(signature.to_bytes().as_ref().to_vec())
}

#[inline]
fn sign_rs384(message: &[u8], private_key: &RsaPrivateKey) -> JwtResult<Vec<u8>> {
    let signing_key = SigningKey::<Sha384>::new(private_key.clone());
    let signature = signing_key
        .try_sign(message)
        .map_err(|e| JwtError::CryptoBackend(format!("RS384 signing failed: {e}")))?;
    Ok(signature.to_bytes().as_ref().to_vec())
}

#[inline]
fn sign_rs512(message: &[u8], private_key: &RsaPrivateKey) -> JwtResult<Vec<u8>> {
    let signing_key = SigningKey::<Sha512>::new(private_key.clone());
    let signature = signing_key
        .try_sign(message)
        .map_err(|e| JwtError::CryptoBackend(format!("RS512 signing failed: {e}")))?;
    Ok(signature.to_bytes().as_ref().to_vec())
}

#[inline]
fn verify_rs256(message: &[u8], signature: &[u8], public_key: &RsaPublicKey) -> JwtResult<()> {
    let verifying_key = VerifyingKey::<Sha256>::new(public_key.clone());
    let signature = Signature::try_from(signature).map_err(|_| JwtError::SignatureInvalid)?;
    verifying_key
        .verify(message, &signature)
        .map_err(|_| JwtError::SignatureInvalid)
}

#[inline]
fn verify_rs384(message: &[u8], signature: &[u8], public_key: &RsaPublicKey) -> JwtResult<()> {
    let verifying_key = VerifyingKey::<Sha384>::new(public_key.clone());
    let signature = Signature::try_from(signature).map_err(|_| JwtError::SignatureInvalid)?;
    verifying_key
        .verify(message, &signature)
        .map_err(|_| JwtError::SignatureInvalid)
}

#[inline]
fn verify_rs512(message: &[u8], signature: &[u8], public_key: &RsaPublicKey) -> JwtResult<()> {
    let verifying_key = VerifyingKey::<Sha512>::new(public_key.clone());
    let signature = Signature::try_from(signature).map_err(|_| JwtError::SignatureInvalid)?;
    verifying_key
        .verify(message, &signature)
        .map_err(|_| JwtError::SignatureInvalid)
}

pub(crate) fn sign(
    digest: DigestWidth,
    message: &[u8],
    private_key: &RsaPrivateKey,
) -> JwtResult<Vec<u8>> {
    match digest {
        DigestWidth::Sha256 => sign_rs256(message, private_key),
        DigestWidth::Sha384 => sign_rs384(message, private_key),
        DigestWidth::Sha512 => sign_rs512(message, private_key),
    }
}

/// Any verification failure, including a signature of the wrong length,
/// is reported as `SignatureInvalid`.
pub(crate) fn verify(
    digest: DigestWidth,
    message: &[u8],
    signature: &[u8],
    public_key: &RsaPublicKey,
) -> JwtResult<()> {
    match digest {
        DigestWidth::Sha256 => verify_rs256(message, signature, public_key),
        DigestWidth::Sha384 => verify_rs384(message, signature, public_key),
        DigestWidth::Sha512 => verify_rs512(message, signature, public_key),
    }
}
