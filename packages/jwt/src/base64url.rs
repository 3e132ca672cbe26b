//! Base64url codec - URL-safe alphabet, no padding (RFC 7515 §2)

use crate::error::JwtError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

/// Encode bytes as unpadded base64url.
#[inline]
#[must_use]
pub fn encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decode unpadded base64url.
///
/// Padding characters, characters outside the URL-safe alphabet, impossible
/// lengths and non-zero trailing bits are all rejected.
///
/// # Errors
/// Returns the decoder's error unchanged.
#[inline]
pub fn decode(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(input)
}

/// Decode one token segment, tagging failures with the segment name.
#[inline]
pub(crate) fn decode_segment(segment: &'static str, input: &str) -> Result<Vec<u8>, JwtError> {
    decode(input).map_err(|source| JwtError::Decode { segment, source })
}
