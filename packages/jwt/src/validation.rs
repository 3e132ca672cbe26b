//! Claim validation applied by the validating decode
//!
//! All checks are pure functions of the body, the options and `now`.

use crate::claims::Body;
use crate::error::{JwtError, JwtResult};
use chrono::{Duration, Utc};

/// Token validation options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Audience the token must carry, compared exactly.
    pub expected_audience: Option<String>,
    /// Clock skew tolerance applied to `nbf` and `exp`.
    pub leeway: Duration,
    /// Reject tokens without both `nbf` and `exp`.
    pub require_temporal_claims: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            expected_audience: None,
            leeway: Duration::zero(),
            require_temporal_claims: true,
        }
    }
}

impl ValidationOptions {
    /// No leeway, temporal claims required, no audience check.
    #[must_use]
    pub fn strict() -> Self {
        Self::default()
    }

    /// Set the expected audience.
    #[must_use]
    pub fn expect_audience(mut self, audience: impl Into<String>) -> Self {
        self.expected_audience = Some(audience.into());
        self
    }

    /// Set the time leeway for validation.
    #[must_use]
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }

    /// Set whether `nbf` and `exp` must be present.
    #[must_use]
    pub fn require_temporal_claims(mut self, required: bool) -> Self {
        self.require_temporal_claims = required;
        self
    }

    /// Audience then time window, in that order.
    ///
    /// # Errors
    /// The first failed check: `AudienceMismatch`, `MissingTemporalClaims`,
    /// `TokenNotYetValid` or `TokenExpired`.
    pub fn validate(&self, body: &Body, now: i64) -> JwtResult<()> {
        if let Some(expected) = &self.expected_audience {
            validate_audience(body, expected)?;
        }
        let leeway = self.leeway.num_seconds();
        match (body.nbf, body.exp) {
            (Some(nbf), Some(exp)) => validate_time_window(now, nbf, exp, leeway),
            _ if self.require_temporal_claims => Err(JwtError::MissingTemporalClaims),
            (nbf, exp) => {
                if let Some(nbf) = nbf {
                    check_not_before(now, nbf, leeway)?;
                }
                if let Some(exp) = exp {
                    check_expiry(now, exp, leeway)?;
                }
                Ok(())
            }
        }
    }
}

/// Current time in whole seconds since the Unix epoch
#[must_use]
pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// `aud` must be present and equal `expected` byte for byte.
///
/// # Errors
/// `AudienceMismatch` carrying both values.
pub fn validate_audience(body: &Body, expected: &str) -> JwtResult<()> {
    match body.aud.as_deref() {
        Some(aud) if aud == expected => Ok(()),
        found => Err(JwtError::AudienceMismatch {
            expected: expected.to_string(),
            found: found.map(str::to_string),
        }),
    }
}

/// The token is valid strictly after `nbf` and strictly before `exp`.
///
/// # Errors
/// `TokenNotYetValid` when `now <= nbf`, `TokenExpired` when `now >= exp`.
pub fn validate_time_window(now: i64, nbf: i64, exp: i64, leeway: i64) -> JwtResult<()> {
    check_not_before(now, nbf, leeway)?;
    check_expiry(now, exp, leeway)
}

fn check_not_before(now: i64, nbf: i64, leeway: i64) -> JwtResult<()> {
    if now.saturating_add(leeway) <= nbf {
        return Err(JwtError::TokenNotYetValid);
    }
    Ok(())
}

fn check_expiry(now: i64, exp: i64, leeway: i64) -> JwtResult<()> {
    if now.saturating_sub(leeway) >= exp {
        return Err(JwtError::TokenExpired);
    }
    Ok(())
}
