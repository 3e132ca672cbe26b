//! Algorithm registry
//!
//! The `alg` header value maps to exactly one entry of a compile-time table.
//! Each entry names its family, which decides the kind of key it pairs with,
//! and the concrete primitive that computes the signature.

use crate::error::{JwtError, JwtResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Signing family of an algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmFamily {
    /// Keyed hash over a shared secret
    Mac,
    /// RSA signature, private key signs and public key verifies
    Asymmetric,
}

/// Digest width shared by both families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum DigestWidth {
    Sha256,
    Sha384,
    Sha512,
}

/// Supported signing algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// HMAC with SHA-256
    HS256,
    /// HMAC with SHA-384
    HS384,
    /// HMAC with SHA-512
    HS512,
    /// RSASSA-PKCS1-v1_5 with SHA-256
    RS256,
    /// RSASSA-PKCS1-v1_5 with SHA-384
    RS384,
    /// RSASSA-PKCS1-v1_5 with SHA-512
    RS512,
}

struct Entry {
    algorithm: Algorithm,
    id: &'static str,
    family: AlgorithmFamily,
    primitive: &'static str,
    digest: DigestWidth,
}

static REGISTRY: [Entry; 6] = [
    Entry {
        algorithm: Algorithm::HS256,
        id: "HS256",
        family: AlgorithmFamily::Mac,
        primitive: "HMAC-SHA256",
        digest: DigestWidth::Sha256,
    },
    Entry {
        algorithm: Algorithm::HS384,
        id: "HS384",
        family: AlgorithmFamily::Mac,
        primitive: "HMAC-SHA384",
        digest: DigestWidth::Sha384,
    },
    Entry {
        algorithm: Algorithm::HS512,
        id: "HS512",
        family: AlgorithmFamily::Mac,
        primitive: "HMAC-SHA512",
        digest: DigestWidth::Sha512,
    },
    Entry {
        algorithm: Algorithm::RS256,
        id: "RS256",
        family: AlgorithmFamily::Asymmetric,
        primitive: "RSASSA-PKCS1-v1_5-SHA256",
        digest: DigestWidth::Sha256,
    },
    Entry {
        algorithm: Algorithm::RS384,
        id: "RS384",
        family: AlgorithmFamily::Asymmetric,
        primitive: "RSASSA-PKCS1-v1_5-SHA384",
        digest: DigestWidth::Sha384,
    },
    Entry {
        algorithm: Algorithm::RS512,
        id: "RS512",
        family: AlgorithmFamily::Asymmetric,
        primitive: "RSASSA-PKCS1-v1_5-SHA512",
        digest: DigestWidth::Sha512,
    },
];

impl Algorithm {
    /// Every supported algorithm, in registry order
    pub const ALL: [Algorithm; 6] = [
        Algorithm::HS256,
        Algorithm::HS384,
        Algorithm::HS512,
        Algorithm::RS256,
        Algorithm::RS384,
        Algorithm::RS512,
    ];

    fn entry(self) -> &'static Entry {
        match self {
            Algorithm::HS256 => &REGISTRY[0],
            Algorithm::HS384 => &REGISTRY[1],
            Algorithm::HS512 => &REGISTRY[2],
            Algorithm::RS256 => &REGISTRY[3],
            Algorithm::RS384 => &REGISTRY[4],
            Algorithm::RS512 => &REGISTRY[5],
        }
    }

    /// Map a textual `alg` value to an algorithm.
    ///
    /// Matching is exact and case-sensitive.
    ///
    /// # Errors
    /// Returns `UnsupportedAlgorithm` for anything outside the registry,
    /// including `none`.
    pub fn resolve(identifier: &str) -> JwtResult<Self> {
        REGISTRY
            .iter()
            .find(|entry| entry.id == identifier)
            .map(|entry| entry.algorithm)
            .ok_or_else(|| JwtError::unsupported_algorithm(identifier))
    }

    /// Identifier as carried in the `alg` header
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.entry().id
    }

    /// Signing family
    #[must_use]
    pub fn family(self) -> AlgorithmFamily {
        self.entry().family
    }

    /// Name of the concrete primitive behind this identifier
    #[must_use]
    pub fn primitive(self) -> &'static str {
        self.entry().primitive
    }

    #[must_use]
    pub(crate) fn digest(self) -> DigestWidth {
        self.entry().digest
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::resolve(s)
    }
}

impl Serialize for Algorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Algorithm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        Algorithm::resolve(&id).map_err(serde::de::Error::custom)
    }
}
