//! Validating decode: audience, `nbf`/`exp` boundaries and leeway

use chrono::Duration;
use tessera_jwt::{
    decode, Algorithm, Body, JwtError, UnsignedToken, ValidationOptions, VerifiedToken,
    VerifyingKey,
};

const NBF: i64 = 1_426_295_995;
const EXP: i64 = 1_426_296_645;
const AUDIENCE: &str = "http://localhost/service";

fn key() -> VerifyingKey {
    VerifyingKey::secret("12345678").expect("key")
}

fn encode(body: Body) -> String {
    UnsignedToken::with_secret(Algorithm::HS256, "12345678")
        .expect("builder")
        .with_body(body)
        .encode()
        .expect("encode")
}

fn windowed() -> String {
    encode(
        Body::new()
            .with_audience(AUDIENCE)
            .with_not_before(NBF)
            .with_expires(EXP),
    )
}

fn at(token: &str, options: &ValidationOptions, now: i64) -> Result<VerifiedToken, JwtError> {
    VerifiedToken::decode_validated_at(token, &key(), options, now)
}

#[test]
fn window_is_exclusive_at_both_ends() {
    let token = windowed();
    let options = ValidationOptions::strict();
    assert_eq!(at(&token, &options, NBF - 1).err(), Some(JwtError::TokenNotYetValid));
    assert_eq!(at(&token, &options, NBF).err(), Some(JwtError::TokenNotYetValid));
    assert!(at(&token, &options, NBF + 1).is_ok());
    assert!(at(&token, &options, EXP - 1).is_ok());
    assert_eq!(at(&token, &options, EXP).err(), Some(JwtError::TokenExpired));
    assert_eq!(at(&token, &options, EXP + 1).err(), Some(JwtError::TokenExpired));
}

#[test]
fn leeway_widens_the_window() {
    let token = windowed();
    let options = ValidationOptions::strict().with_leeway(Duration::seconds(30));
    assert!(at(&token, &options, NBF - 29).is_ok());
    assert_eq!(at(&token, &options, NBF - 30).err(), Some(JwtError::TokenNotYetValid));
    assert!(at(&token, &options, EXP + 29).is_ok());
    assert_eq!(at(&token, &options, EXP + 30).err(), Some(JwtError::TokenExpired));
}

#[test]
fn audience_must_match_exactly() {
    let token = windowed();
    let now = NBF + 10;
    assert!(at(&token, &ValidationOptions::strict().expect_audience(AUDIENCE), now).is_ok());

    let err = at(&token, &ValidationOptions::strict().expect_audience("http://localhost/other"), now)
        .expect_err("audience mismatch");
    assert_eq!(
        err,
        JwtError::AudienceMismatch {
            expected: "http://localhost/other".to_string(),
            found: Some(AUDIENCE.to_string()),
        }
    );

    let trailing = format!("{AUDIENCE}/");
    assert!(matches!(
        at(&token, &ValidationOptions::strict().expect_audience(trailing), now),
        Err(JwtError::AudienceMismatch { .. })
    ));
}

#[test]
fn missing_audience_fails_when_one_is_expected() {
    let token = encode(Body::new().with_not_before(NBF).with_expires(EXP));
    let err = at(&token, &ValidationOptions::strict().expect_audience(AUDIENCE), NBF + 1)
        .expect_err("no audience");
    assert_eq!(
        err,
        JwtError::AudienceMismatch {
            expected: AUDIENCE.to_string(),
            found: None,
        }
    );
}

#[test]
fn audience_is_checked_before_time() {
    let token = windowed();
    let options = ValidationOptions::strict().expect_audience("elsewhere");
    assert!(matches!(
        at(&token, &options, EXP + 100),
        Err(JwtError::AudienceMismatch { .. })
    ));
}

#[test]
fn temporal_claims_are_required_by_default() {
    let options = ValidationOptions::strict();
    for body in [
        Body::new().with_subject("alice"),
        Body::new().with_not_before(NBF),
        Body::new().with_expires(EXP),
    ] {
        let token = encode(body);
        assert_eq!(at(&token, &options, NBF + 1).err(), Some(JwtError::MissingTemporalClaims));
    }
}

#[test]
fn optional_temporal_claims_check_what_is_present() {
    let options = ValidationOptions::strict().require_temporal_claims(false);
    assert!(at(&encode(Body::new().with_subject("alice")), &options, 0).is_ok());

    let only_exp = encode(Body::new().with_expires(EXP));
    assert!(at(&only_exp, &options, EXP - 1).is_ok());
    assert_eq!(at(&only_exp, &options, EXP).err(), Some(JwtError::TokenExpired));

    let only_nbf = encode(Body::new().with_not_before(NBF));
    assert!(at(&only_nbf, &options, NBF + 1).is_ok());
    assert_eq!(at(&only_nbf, &options, NBF).err(), Some(JwtError::TokenNotYetValid));
}

#[test]
fn bare_decode_ignores_claims() {
    let expired = encode(Body::new().with_audience("someone").with_not_before(0).with_expires(1));
    assert!(decode(&expired, &key()).is_ok());
}

#[test]
fn signature_is_checked_before_claims() {
    let token = windowed();
    let other = VerifyingKey::secret("other").expect("key");
    let options = ValidationOptions::strict().expect_audience("elsewhere");
    assert_eq!(
        VerifiedToken::decode_validated_at(&token, &other, &options, EXP + 1).err(),
        Some(JwtError::SignatureInvalid)
    );
}

#[test]
fn expired_token_fails_against_the_clock() {
    let token = windowed();
    assert_eq!(
        tessera_jwt::decode_validated(&token, &key(), &ValidationOptions::strict()).err(),
        Some(JwtError::TokenExpired)
    );
}

#[test]
fn policy_failures_are_not_forgery_suspects() {
    for err in [
        JwtError::TokenExpired,
        JwtError::TokenNotYetValid,
        JwtError::MissingTemporalClaims,
    ] {
        assert!(!err.is_forgery_suspect());
    }
}
