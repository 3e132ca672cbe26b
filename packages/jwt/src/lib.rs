//! Compact signed tokens (JWT) with HMAC and RSA signatures
//!
//! This crate provides:
//! - HS256/HS384/HS512 and RS256/RS384/RS512 signing
//! - A typed builder that can only be paired with the right kind of key
//! - Bare (signature only) and validating (audience, `nbf`, `exp`) decode
//! - Byte-exact wire output: the JSON field order and omission rules are fixed
//!
//! ```
//! use tessera_jwt::{Algorithm, UnsignedToken, ValidationOptions, VerifiedToken, VerifyingKey};
//!
//! let mut token = UnsignedToken::with_secret(Algorithm::HS256, "12345678")?;
//! token
//!     .set_issuer("http://localhost/oauth/")
//!     .set_audience("http://localhost/service")
//!     .set_not_before(1_426_295_995)
//!     .set_expires(1_426_296_645);
//! let wire = token.encode()?;
//!
//! let key = VerifyingKey::secret("12345678")?;
//! let options = ValidationOptions::strict().expect_audience("http://localhost/service");
//! let verified = VerifiedToken::decode_validated_at(&wire, &key, &options, 1_426_296_100)?;
//! assert_eq!(verified.issuer(), Some("http://localhost/oauth/"));
//! # Ok::<(), tessera_jwt::JwtError>(())
//! ```

pub mod algorithms;
pub mod base64url;
pub mod claims;
mod crypto;
mod error;
pub mod keys;
pub mod token;
pub mod validation;

pub use algorithms::{Algorithm, AlgorithmFamily};
pub use claims::{Body, Header};
pub use error::*;
pub use keys::{SharedSecret, SigningKey, VerifyingKey};
pub use token::{
    decode, decode_validated, Token, Unsigned, UnsignedToken, Verified, VerifiedToken,
};
pub use validation::ValidationOptions;

// Key types accepted by `SigningKey::Rsa` and `VerifyingKey::Rsa`
pub use rsa::{RsaPrivateKey, RsaPublicKey};
