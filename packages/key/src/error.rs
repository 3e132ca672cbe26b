//! Key loading errors

use std::path::PathBuf;
use thiserror::Error;

/// Key loading result type
pub type KeyResult<T> = Result<T, KeyError>;

/// Failures while turning PEM/DER material into usable keys
#[derive(Debug, Error)]
pub enum KeyError {
    /// The file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// No usable private key, or the key bytes were rejected
    #[error("Key load error: {0}")]
    KeyLoad(String),

    /// No certificate, or the certificate could not be parsed
    #[error("Certificate error: {0}")]
    Certificate(String),
}

impl KeyError {
    /// Create a key load error
    #[inline]
    #[must_use]
    pub fn key_load(msg: &str) -> Self {
        KeyError::KeyLoad(msg.to_string())
    }

    /// Create a certificate error
    #[inline]
    #[must_use]
    pub fn certificate(msg: &str) -> Self {
        KeyError::Certificate(msg.to_string())
    }
}
