//! Encode/decode across every algorithm, tampering and key mix-ups

use tessera_jwt::{
    base64url, decode, Algorithm, AlgorithmFamily, Body, JwtError, RsaPrivateKey, SigningKey,
    UnsignedToken, VerifyingKey,
};
use tessera_key::{load_private_key, load_public_key_from_certificate};

macro_rules! fixture {
    ($name:literal) => {
        concat!(env!("CARGO_MANIFEST_DIR"), "/../key/tests/fixtures/", $name)
    };
}

fn private_key() -> RsaPrivateKey {
    load_private_key(fixture!("rsa_private.pem")).expect("private key")
}

fn signing_key(algorithm: Algorithm) -> SigningKey {
    match algorithm.family() {
        AlgorithmFamily::Mac => SigningKey::secret("correct horse battery staple").expect("secret"),
        AlgorithmFamily::Asymmetric => SigningKey::from(private_key()),
    }
}

fn claims() -> Body {
    Body::new()
        .with_issuer("issuer")
        .with_audience("service")
        .with_subject("alice")
        .with_not_before(1_000)
        .with_expires(2_000)
}

fn sign(algorithm: Algorithm) -> (String, VerifyingKey) {
    let token = UnsignedToken::new(algorithm, signing_key(algorithm))
        .expect("builder")
        .with_body(claims());
    (token.encode().expect("encode"), token.verifying_key())
}

fn replace_segment(token: &str, index: usize, replacement: &str) -> String {
    let mut segments: Vec<&str> = token.split('.').collect();
    segments[index] = replacement;
    segments.join(".")
}

#[test]
fn every_algorithm_round_trips() {
    for algorithm in Algorithm::ALL {
        let (token, key) = sign(algorithm);
        let verified = decode(&token, &key).unwrap_or_else(|e| panic!("{algorithm}: {e}"));
        assert_eq!(verified.algorithm(), algorithm);
        assert_eq!(verified.body(), &claims());
        assert!(token.starts_with(verified.signing_input()));
    }
}

#[test]
fn builder_can_encode_more_than_once() {
    let token = UnsignedToken::with_secret(Algorithm::HS384, "k")
        .expect("builder")
        .with_body(claims());
    assert_eq!(token.encode().expect("first"), token.encode().expect("second"));
}

#[test]
fn rsa_token_verifies_with_certificate_key() {
    let (token, _) = sign(Algorithm::RS256);
    let public_key =
        load_public_key_from_certificate(fixture!("rsa_cert.pem")).expect("certificate");
    assert!(decode(&token, &VerifyingKey::from(public_key)).is_ok());
    assert!(decode(&token, &VerifyingKey::from(&private_key())).is_ok());
}

#[test]
fn altered_body_is_rejected() {
    for algorithm in Algorithm::ALL {
        let (token, key) = sign(algorithm);
        let forged_body = base64url::encode(br#"{"iss":"issuer","sub":"mallory"}"#);
        let forged = replace_segment(&token, 1, &forged_body);
        assert_eq!(decode(&forged, &key).err(), Some(JwtError::SignatureInvalid), "{algorithm}");
    }
}

#[test]
fn altered_signature_is_rejected() {
    for algorithm in Algorithm::ALL {
        let (token, key) = sign(algorithm);
        let signature = token.rsplit('.').next().expect("signature segment");
        let first = if signature.starts_with('A') { "B" } else { "A" };
        let altered = format!("{first}{}", &signature[1..]);
        let forged = replace_segment(&token, 2, &altered);
        assert_eq!(decode(&forged, &key).err(), Some(JwtError::SignatureInvalid), "{algorithm}");
    }
}

#[test]
fn swapped_header_is_rejected() {
    let (token, key) = sign(Algorithm::HS256);
    let header = base64url::encode(br#"{"alg":"HS512","typ":"JWT"}"#);
    let forged = replace_segment(&token, 0, &header);
    assert_eq!(decode(&forged, &key).err(), Some(JwtError::SignatureInvalid));
}

#[test]
fn wrong_secret_is_rejected() {
    let (token, _) = sign(Algorithm::HS256);
    let other = VerifyingKey::secret("not the secret").expect("key");
    assert_eq!(decode(&token, &other).err(), Some(JwtError::SignatureInvalid));
}

#[test]
fn wrong_rsa_key_is_rejected() {
    let (token, _) = sign(Algorithm::RS512);
    let other = load_public_key_from_certificate(fixture!("other_cert.pem")).expect("cert");
    assert_eq!(
        decode(&token, &VerifyingKey::from(other)).err(),
        Some(JwtError::SignatureInvalid)
    );
}

#[test]
fn key_family_must_match_on_decode() {
    let (hs_token, secret) = sign(Algorithm::HS256);
    let (rs_token, public_key) = sign(Algorithm::RS256);
    assert!(matches!(
        decode(&hs_token, &public_key),
        Err(JwtError::UnsupportedAlgorithm(_))
    ));
    assert!(matches!(
        decode(&rs_token, &secret),
        Err(JwtError::UnsupportedAlgorithm(_))
    ));
}

#[test]
fn hmac_header_on_rsa_key_is_refused() {
    // HS256 keyed with the public key bytes, presented to an RSA verifier
    let (rs_token, public_key) = sign(Algorithm::RS256);
    let forged = {
        let body = rs_token.split('.').nth(1).expect("body segment");
        let header = base64url::encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        format!("{header}.{body}.AAAA")
    };
    assert!(matches!(
        decode(&forged, &public_key),
        Err(JwtError::UnsupportedAlgorithm(_))
    ));
}

#[test]
fn cross_family_builders_are_refused() {
    assert!(matches!(
        UnsignedToken::with_secret(Algorithm::RS256, "secret"),
        Err(JwtError::UnsupportedAlgorithm(_))
    ));
    assert!(matches!(
        UnsignedToken::with_private_key(Algorithm::HS256, private_key()),
        Err(JwtError::UnsupportedAlgorithm(_))
    ));
    assert!(matches!(
        UnsignedToken::new(Algorithm::RS384, SigningKey::secret("secret").expect("key")),
        Err(JwtError::UnsupportedAlgorithm(_))
    ));
}

#[test]
fn empty_secret_is_refused() {
    assert!(matches!(
        UnsignedToken::with_secret(Algorithm::HS256, ""),
        Err(JwtError::InvalidKey(_))
    ));
    // family is checked before the secret
    assert!(matches!(
        UnsignedToken::with_secret(Algorithm::RS256, ""),
        Err(JwtError::UnsupportedAlgorithm(_))
    ));
}

#[test]
fn unknown_algorithm_in_header_is_refused() {
    let (token, key) = sign(Algorithm::HS256);
    for alg in ["none", "ES256", "hs256", ""] {
        let header = base64url::encode(format!(r#"{{"alg":"{alg}","typ":"JWT"}}"#).as_bytes());
        let forged = replace_segment(&token, 0, &header);
        assert!(
            matches!(decode(&forged, &key), Err(JwtError::UnsupportedAlgorithm(_))),
            "{alg:?}"
        );
    }
}

#[test]
fn structural_failures_are_forgery_suspects() {
    let (token, key) = sign(Algorithm::HS256);
    let cases = [
        "no-dots-at-all".to_string(),
        replace_segment(&token, 1, "e30="),
        replace_segment(&token, 1, &base64url::encode(b"[1,2,3]")),
        replace_segment(&token, 2, "!!!"),
    ];
    for forged in cases {
        let err = decode(&forged, &key).expect_err("must be rejected");
        assert!(err.is_forgery_suspect(), "{forged}: {err:?}");
    }
}
