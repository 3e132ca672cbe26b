//! Token codec
//!
//! A token is built as a [`Token<Unsigned>`] and turned into its wire string
//! by [`Token::encode`]. A wire string is turned back into a
//! [`Token<Verified>`] by one of the decode entry points; there is no way to
//! obtain a verified token without checking its signature, and a verified
//! token cannot be mutated.
//!
//! Decoding comes in two flavors:
//! - **bare** ([`Token::decode`]): structure, algorithm and signature only;
//! - **validating** ([`Token::decode_validated`]): additionally audience and
//!   the `nbf`/`exp` window, driven by [`ValidationOptions`].

use crate::algorithms::{Algorithm, AlgorithmFamily};
use crate::base64url;
use crate::claims::{Body, Header};
use crate::crypto;
use crate::error::{JwtError, JwtResult};
use crate::keys::{ensure_family, SigningKey, VerifyingKey};
use crate::validation::{now_timestamp, ValidationOptions};
use rsa::RsaPrivateKey;
use tracing::{debug, warn};

/// Typestate markers for [`Token`].
pub mod state {
    use crate::keys::SigningKey;

    /// Claims are settable; holds the key used by `encode`.
    #[derive(Debug, Clone)]
    pub struct Unsigned {
        pub(crate) key: SigningKey,
    }

    /// Parsed from a wire string whose signature has been checked.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Verified {
        pub(crate) signing_input: String,
        pub(crate) signature: Vec<u8>,
    }
}

pub use state::{Unsigned, Verified};

/// Header and claim set in a given lifecycle state.
#[derive(Debug, Clone)]
pub struct Token<S> {
    header: Header,
    body: Body,
    state: S,
}

/// A token being built
pub type UnsignedToken = Token<Unsigned>;

/// A token whose signature has been checked
pub type VerifiedToken = Token<Verified>;

impl<S> Token<S> {
    /// Token header
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Claim set
    #[must_use]
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Signing algorithm
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.header.algorithm()
    }

    /// `jti`
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.body.jti.as_deref()
    }

    /// `iat`
    #[must_use]
    pub fn issued_at(&self) -> Option<i64> {
        self.body.iat
    }

    /// `iss`
    #[must_use]
    pub fn issuer(&self) -> Option<&str> {
        self.body.iss.as_deref()
    }

    /// `aud`
    #[must_use]
    pub fn audience(&self) -> Option<&str> {
        self.body.aud.as_deref()
    }

    /// `exp`
    #[must_use]
    pub fn expires(&self) -> Option<i64> {
        self.body.exp
    }

    /// `nbf`
    #[must_use]
    pub fn not_before(&self) -> Option<i64> {
        self.body.nbf
    }

    /// `sub`
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.body.sub.as_deref()
    }

    /// Consume the token, keeping its claim set
    #[must_use]
    pub fn into_body(self) -> Body {
        self.body
    }
}

impl Token<Unsigned> {
    /// Start a token signed with `key`.
    ///
    /// # Errors
    /// `UnsupportedAlgorithm` when `key` is not of the algorithm's family.
    pub fn new(algorithm: Algorithm, key: SigningKey) -> JwtResult<Self> {
        ensure_family(algorithm, key.family())?;
        Ok(Self {
            header: Header::new(algorithm),
            body: Body::new(),
            state: Unsigned { key },
        })
    }

    /// Start a token signed with a shared secret.
    ///
    /// # Errors
    /// `UnsupportedAlgorithm` for an `RS*` algorithm, `InvalidKey` for an
    /// empty secret.
    pub fn with_secret(algorithm: Algorithm, secret: impl AsRef<[u8]>) -> JwtResult<Self> {
        ensure_family(algorithm, AlgorithmFamily::Mac)?;
        Self::new(algorithm, SigningKey::secret(secret)?)
    }

    /// Start a token signed with an RSA private key.
    ///
    /// # Errors
    /// `UnsupportedAlgorithm` for an `HS*` algorithm.
    pub fn with_private_key(algorithm: Algorithm, private_key: RsaPrivateKey) -> JwtResult<Self> {
        Self::new(algorithm, SigningKey::from(private_key))
    }

    /// Replace the whole claim set
    #[must_use]
    pub fn with_body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    /// Mutable access to the claim set
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Switch to another algorithm of the same family.
    ///
    /// # Errors
    /// `UnsupportedAlgorithm` when the held key is of the other family; the
    /// token keeps its previous algorithm.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) -> JwtResult<&mut Self> {
        ensure_family(algorithm, self.state.key.family())?;
        self.header.set_algorithm(algorithm);
        Ok(self)
    }

    /// Set `jti`
    pub fn set_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.body.jti = Some(id.into());
        self
    }

    /// Set `iat`
    pub fn set_issued_at(&mut self, issued_at: i64) -> &mut Self {
        self.body.iat = Some(issued_at);
        self
    }

    /// Set `iss`
    pub fn set_issuer(&mut self, issuer: impl Into<String>) -> &mut Self {
        self.body.iss = Some(issuer.into());
        self
    }

    /// Set `aud`
    pub fn set_audience(&mut self, audience: impl Into<String>) -> &mut Self {
        self.body.aud = Some(audience.into());
        self
    }

    /// Set `exp`
    pub fn set_expires(&mut self, expires: i64) -> &mut Self {
        self.body.exp = Some(expires);
        self
    }

    /// Set `nbf`
    pub fn set_not_before(&mut self, not_before: i64) -> &mut Self {
        self.body.nbf = Some(not_before);
        self
    }

    /// Set `sub`
    pub fn set_subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.body.sub = Some(subject.into());
        self
    }

    /// Key that verifies tokens produced by this builder
    #[must_use]
    pub fn verifying_key(&self) -> VerifyingKey {
        self.state.key.verifying_key()
    }

    /// Produce the wire string `header.body.signature`.
    ///
    /// No claim validation happens here; `exp`/`nbf` are the caller's
    /// responsibility.
    ///
    /// # Errors
    /// Serialization or signing failures.
    pub fn encode(&self) -> JwtResult<String> {
        let algorithm = self.header.algorithm();
        let header = base64url::encode(&self.header.to_json()?);
        let body = base64url::encode(&self.body.to_json()?);

        let mut token = String::with_capacity(header.len() + body.len() + 2 + 512);
        token.push_str(&header);
        token.push('.');
        token.push_str(&body);

        let signature = crypto::sign(algorithm, &self.state.key, token.as_bytes())?;
        token.push('.');
        token.push_str(&base64url::encode(&signature));

        debug!(alg = %algorithm, len = token.len(), "token encoded");
        Ok(token)
    }
}

impl Token<Verified> {
    /// Bare decode: structure, algorithm and signature.
    ///
    /// # Errors
    /// `MalformedToken`, `Decode`, `MalformedClaims`, `UnsupportedAlgorithm`
    /// or `SignatureInvalid`.
    pub fn decode(token: &str, key: &VerifyingKey) -> JwtResult<Self> {
        Self::parse_and_verify(token, key)
            .inspect(|verified| debug!(alg = %verified.algorithm(), "token signature verified"))
            .inspect_err(|e| warn!(kind = e.kind(), "token rejected"))
    }

    /// Validating decode against the current time.
    ///
    /// # Errors
    /// Everything [`Token::decode`] reports, then `AudienceMismatch`,
    /// `MissingTemporalClaims`, `TokenNotYetValid` or `TokenExpired`.
    pub fn decode_validated(
        token: &str,
        key: &VerifyingKey,
        options: &ValidationOptions,
    ) -> JwtResult<Self> {
        Self::decode_validated_at(token, key, options, now_timestamp())
    }

    /// Validating decode against an explicit `now` (seconds since epoch).
    ///
    /// # Errors
    /// See [`Token::decode_validated`].
    pub fn decode_validated_at(
        token: &str,
        key: &VerifyingKey,
        options: &ValidationOptions,
        now: i64,
    ) -> JwtResult<Self> {
        let verified = Self::decode(token, key)?;
        options
            .validate(&verified.body, now)
            .inspect_err(|e| warn!(alg = %verified.algorithm(), kind = e.kind(), "token claims rejected"))?;
        Ok(verified)
    }

    /// `header.body` exactly as it appeared in the wire string
    #[must_use]
    pub fn signing_input(&self) -> &str {
        &self.state.signing_input
    }

    /// Decoded signature bytes
    #[must_use]
    pub fn signature(&self) -> &[u8] {
        &self.state.signature
    }

    fn parse_and_verify(token: &str, key: &VerifyingKey) -> JwtResult<Self> {
        let dots = token.bytes().filter(|&b| b == b'.').count();
        if dots != 2 {
            return Err(JwtError::MalformedToken(format!(
                "expected two dots, found {dots}"
            )));
        }

        let (signing_input, signature_b64) = token
            .rsplit_once('.')
            .ok_or_else(|| JwtError::malformed_token("missing signature segment"))?;
        let (header_b64, body_b64) = signing_input
            .split_once('.')
            .ok_or_else(|| JwtError::malformed_token("missing body segment"))?;

        let header = Header::from_json(&base64url::decode_segment("header", header_b64)?)?;
        let body = Body::from_json(&base64url::decode_segment("body", body_b64)?)?;
        let algorithm = header.algorithm();
        ensure_family(algorithm, key.family())?;

        let signature = base64url::decode_segment("signature", signature_b64)?;
        crypto::verify(algorithm, key, signing_input.as_bytes(), &signature)?;

        Ok(Self {
            header,
            body,
            state: Verified {
                signing_input: signing_input.to_string(),
                signature,
            },
        })
    }
}

/// Bare decode, see [`Token::decode`].
///
/// # Errors
/// See [`Token::decode`].
pub fn decode(token: &str, key: &VerifyingKey) -> JwtResult<VerifiedToken> {
    VerifiedToken::decode(token, key)
}

/// Validating decode against the current time, see [`Token::decode_validated`].
///
/// # Errors
/// See [`Token::decode_validated`].
pub fn decode_validated(
    token: &str,
    key: &VerifyingKey,
    options: &ValidationOptions,
) -> JwtResult<VerifiedToken> {
    VerifiedToken::decode_validated(token, key, options)
}
