//! Header and claim set model
//!
//! Serialization order and field presence are part of the wire contract:
//! the signature covers the exact JSON bytes produced here. Fields are emitted
//! in declaration order and unset fields are left out.

use crate::algorithms::Algorithm;
use crate::error::{JwtError, JwtResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Token type carried in every header
pub const TOKEN_TYPE: &str = "JWT";

/// Legacy on-the-wire marker for an unset `exp`/`nbf`
pub const UNSET_TIMESTAMP: i64 = -1;

/// Token header: `{"alg":"..","typ":"JWT"}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Header {
    alg: Algorithm,
    typ: &'static str,
}

#[derive(Deserialize)]
struct WireHeader {
    alg: String,
}

impl Header {
    /// Header for the given algorithm
    #[must_use]
    pub fn new(alg: Algorithm) -> Self {
        Self {
            alg,
            typ: TOKEN_TYPE,
        }
    }

    /// Declared signing algorithm
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.alg
    }

    /// Token type, always `JWT`
    #[must_use]
    pub fn typ(&self) -> &'static str {
        self.typ
    }

    pub(crate) fn set_algorithm(&mut self, alg: Algorithm) {
        self.alg = alg;
    }

    pub(crate) fn to_json(self) -> JwtResult<Vec<u8>> {
        serde_json::to_vec(&self).map_err(|e| JwtError::MalformedClaims(e.to_string()))
    }

    /// Parse a decoded header segment. The `typ` member and any unknown
    /// members are ignored; `alg` must name a registered algorithm.
    pub(crate) fn from_json(bytes: &[u8]) -> JwtResult<Self> {
        let wire: WireHeader = from_json_object("header", bytes)?;
        Ok(Self::new(Algorithm::resolve(&wire.alg)?))
    }
}

/// Claim set carried in the token body.
///
/// Timestamps are seconds since the Unix epoch (UTC).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Body {
    /// Unique token id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    /// Issued at
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Audience
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    /// Expiry
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "timestamp_or_unset"
    )]
    pub exp: Option<i64>,
    /// Not before
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "timestamp_or_unset"
    )]
    pub nbf: Option<i64>,
    /// Subject
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
}

impl Body {
    /// Empty claim set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the token id (`jti`)
    #[must_use]
    pub fn with_id(mut self, jti: impl Into<String>) -> Self {
        self.jti = Some(jti.into());
        self
    }

    /// Set issued-at (`iat`)
    #[must_use]
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set the issuer (`iss`)
    #[must_use]
    pub fn with_issuer(mut self, iss: impl Into<String>) -> Self {
        self.iss = Some(iss.into());
        self
    }

    /// Set the audience (`aud`)
    #[must_use]
    pub fn with_audience(mut self, aud: impl Into<String>) -> Self {
        self.aud = Some(aud.into());
        self
    }

    /// Set expiry (`exp`)
    #[must_use]
    pub fn with_expires(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set not-before (`nbf`)
    #[must_use]
    pub fn with_not_before(mut self, nbf: i64) -> Self {
        self.nbf = Some(nbf);
        self
    }

    /// Set the subject (`sub`)
    #[must_use]
    pub fn with_subject(mut self, sub: impl Into<String>) -> Self {
        self.sub = Some(sub.into());
        self
    }

    pub(crate) fn to_json(&self) -> JwtResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| JwtError::MalformedClaims(e.to_string()))
    }

    pub(crate) fn from_json(bytes: &[u8]) -> JwtResult<Self> {
        from_json_object("body", bytes)
    }
}

/// `-1` and `null` both mean the timestamp was never set.
fn timestamp_or_unset<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.filter(|&ts| ts != UNSET_TIMESTAMP))
}

/// Only JSON objects are accepted; serde would otherwise also take arrays
/// as positional structs.
fn from_json_object<T: DeserializeOwned>(segment: &str, bytes: &[u8]) -> JwtResult<T> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| JwtError::MalformedClaims(format!("{segment} is not valid JSON: {e}")))?;
    if !value.is_object() {
        return Err(JwtError::MalformedClaims(format!(
            "{segment} is not a JSON object"
        )));
    }
    serde_json::from_value(value)
        .map_err(|e| JwtError::MalformedClaims(format!("{segment} has an invalid shape: {e}")))
}
