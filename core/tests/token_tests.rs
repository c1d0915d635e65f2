// tests/token_tests.rs
mod common;
use catalog_core::auth::PUBLIC_TOKEN_TYPE;
use catalog_core::{CatalogError, ErrorKind, TokenIssuer, TokenSettings};
use chrono::{DateTime, Duration, Utc};
use common::setup_tracing;

fn settings() -> TokenSettings {
  TokenSettings {
    signing_key: "a-test-signing-key-of-enough-length".to_string(),
    issuer: "catalog-tests".to_string(),
    audience: "catalog-clients".to_string(),
    lifetime_minutes: 60,
  }
}

fn issuer() -> TokenIssuer {
  setup_tracing();
  TokenIssuer::new(settings()).expect("valid token settings")
}

#[test]
fn test_fresh_token_is_accepted_with_expected_claims() {
  let issuer = issuer();
  let before = Utc::now();
  let issued = issuer.generate().unwrap();

  let claims = issuer.validate(&issued.token).expect("fresh token accepted");
  assert_eq!(claims.token_type, PUBLIC_TOKEN_TYPE);
  assert_eq!(claims.iss, "catalog-tests");
  assert_eq!(claims.aud, "catalog-clients");
  assert!(uuid::Uuid::parse_str(&claims.sub).is_ok());
  assert_eq!(claims.exp - claims.iat, 60 * 60);
  assert_eq!(claims.exp, issued.expires_at.timestamp());
  assert!(issued.expires_at >= before + Duration::minutes(60) - Duration::seconds(1));

  let names: Vec<&str> = claims.entries().iter().map(|(name, _)| *name).collect();
  assert_eq!(names, vec!["sub", "token_type", "generated_at", "iat", "exp", "iss", "aud"]);
}

#[test]
fn test_each_token_has_its_own_subject() {
  let issuer = issuer();
  let a = issuer.validate(&issuer.generate().unwrap().token).unwrap();
  let b = issuer.validate(&issuer.generate().unwrap().token).unwrap();
  assert_ne!(a.sub, b.sub);
}

#[test]
fn test_expired_token_is_rejected() {
  let issuer = issuer();
  let long_ago = Utc::now() - Duration::minutes(61);
  let issued = issuer.generate_at(long_ago).unwrap();
  assert!(issued.expires_at < Utc::now());
  assert!(issuer.validate(&issued.token).is_none());

  // Still inside its lifetime.
  let recent = issuer.generate_at(Utc::now() - Duration::minutes(59)).unwrap();
  assert!(issuer.validate(&recent.token).is_some());
}

#[test]
fn test_tampered_or_foreign_tokens_are_rejected() {
  let issuer = issuer();
  let token = issuer.generate().unwrap().token;

  // Swap the first character of the signature.
  let signature_at = token.rfind('.').unwrap() + 1;
  let first = &token[signature_at..signature_at + 1];
  let replacement = if first == "A" { "B" } else { "A" };
  let tampered = format!("{}{}{}", &token[..signature_at], replacement, &token[signature_at + 1..]);
  assert!(issuer.validate(&tampered).is_none());

  assert!(issuer.validate("").is_none());
  assert!(issuer.validate("not.a.token").is_none());

  let other_key = TokenIssuer::new(TokenSettings {
    signing_key: "a-completely-different-signing-key".to_string(),
    ..settings()
  })
  .unwrap();
  assert!(other_key.validate(&token).is_none());

  let other_audience = TokenIssuer::new(TokenSettings {
    audience: "someone-else".to_string(),
    ..settings()
  })
  .unwrap();
  assert!(other_audience.validate(&token).is_none());

  let other_issuer = TokenIssuer::new(TokenSettings {
    issuer: "impostor".to_string(),
    ..settings()
  })
  .unwrap();
  assert!(other_issuer.validate(&token).is_none());
}

#[test]
fn test_settings_are_checked() {
  setup_tracing();
  let cases = [
    TokenSettings { signing_key: "short".to_string(), ..settings() },
    TokenSettings { issuer: " ".to_string(), ..settings() },
    TokenSettings { audience: String::new(), ..settings() },
    TokenSettings { lifetime_minutes: 0, ..settings() },
    // Representable as a duration but no expiry instant can hold it.
    TokenSettings { lifetime_minutes: 1_000_000_000_000, ..settings() },
    TokenSettings { lifetime_minutes: i64::MAX, ..settings() },
  ];
  for case in cases {
    let err = TokenIssuer::new(case).unwrap_err();
    assert!(matches!(err, CatalogError::Configuration(_)), "got {:?}", err);
  }
}

#[test]
fn test_expiry_past_the_calendar_is_an_error() {
  let issuer = issuer();
  let err = issuer.generate_at(DateTime::<Utc>::MAX_UTC).unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Invalid);
}
