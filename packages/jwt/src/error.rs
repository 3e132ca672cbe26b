//! Token error types

use thiserror::Error;

/// Token operation result type
pub type JwtResult<T> = Result<T, JwtError>;

/// Every way encoding, decoding or validating a token can fail.
///
/// None of these are transient: retrying with the same input yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// The token is not three dot-separated segments
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// A segment is not valid unpadded base64url
    #[error("Invalid base64url in {segment} segment: {source}")]
    Decode {
        /// Which segment failed (`header`, `body` or `signature`)
        segment: &'static str,
        /// Underlying decoder error
        #[source]
        source: base64::DecodeError,
    },

    /// Header or body JSON is not the expected object shape
    #[error("Malformed claims: {0}")]
    MalformedClaims(String),

    /// Algorithm identifier unknown, or paired with the wrong kind of key
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Key material rejected by the primitive
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Signature did not verify
    #[error("Signature validation failed")]
    SignatureInvalid,

    /// The token was not issued for the expected audience
    #[error("Audience mismatch: expected {expected}, found {found:?}")]
    AudienceMismatch {
        /// Audience the caller asked for
        expected: String,
        /// Audience carried by the token, if any
        found: Option<String>,
    },

    /// Validating decode needs both `nbf` and `exp`
    #[error("The token needs both nbf and exp to be accepted")]
    MissingTemporalClaims,

    /// Current time is not past `nbf`
    #[error("Token is not valid yet")]
    TokenNotYetValid,

    /// Current time has reached `exp`
    #[error("Token has expired")]
    TokenExpired,

    /// Lower-level failure inside the cryptographic backend
    #[error("Cryptographic backend error: {0}")]
    CryptoBackend(String),
}

impl JwtError {
    /// Create a malformed token error
    #[inline]
    #[must_use]
    pub fn malformed_token(msg: &str) -> Self {
        JwtError::MalformedToken(msg.to_string())
    }

    /// Create a malformed claims error
    #[inline]
    #[must_use]
    pub fn malformed_claims(msg: &str) -> Self {
        JwtError::MalformedClaims(msg.to_string())
    }

    /// Create an unsupported algorithm error
    #[inline]
    #[must_use]
    pub fn unsupported_algorithm(alg: &str) -> Self {
        JwtError::UnsupportedAlgorithm(alg.to_string())
    }

    /// Create an invalid key error
    #[inline]
    #[must_use]
    pub fn invalid_key(msg: &str) -> Self {
        JwtError::InvalidKey(msg.to_string())
    }

    /// Create a crypto backend error
    #[inline]
    #[must_use]
    pub fn crypto_backend(msg: &str) -> Self {
        JwtError::CryptoBackend(msg.to_string())
    }

    /// Whether the failure points at a forged or corrupted token rather than a
    /// well-formed token rejected by policy (audience, time window).
    #[must_use]
    pub fn is_forgery_suspect(&self) -> bool {
        matches!(
            self,
            JwtError::MalformedToken(_)
                | JwtError::Decode { .. }
                | JwtError::MalformedClaims(_)
                | JwtError::SignatureInvalid
        )
    }

    /// Short stable name of the error kind, safe to put in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            JwtError::MalformedToken(_) => "malformed_token",
            JwtError::Decode { .. } => "decode",
            JwtError::MalformedClaims(_) => "malformed_claims",
            JwtError::UnsupportedAlgorithm(_) => "unsupported_algorithm",
            JwtError::InvalidKey(_) => "invalid_key",
            JwtError::SignatureInvalid => "signature_invalid",
            JwtError::AudienceMismatch { .. } => "audience_mismatch",
            JwtError::MissingTemporalClaims => "missing_temporal_claims",
            JwtError::TokenNotYetValid => "token_not_yet_valid",
            JwtError::TokenExpired => "token_expired",
            JwtError::CryptoBackend(_) => "crypto_backend",
        }
    }
}
