//! Key material provider for tessera tokens
//!
//! Loads RSA private keys and X.509 certificate public keys from PEM files.
//! The returned keys plug straight into `tessera_jwt::SigningKey` and
//! `tessera_jwt::VerifyingKey`.

mod error;
mod loader;

pub use error::*;
pub use loader::{
    load_private_key, load_public_key_from_certificate, private_key_from_pem,
    private_key_from_pkcs8_der, public_key_from_certificate_der, public_key_from_certificate_pem,
    PrivateKeyHandle, PublicKeyHandle,
};
