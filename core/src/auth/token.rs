// catalog_core/src/auth/token.rs

use crate::error::{CatalogError, CatalogResult};

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use uuid::Uuid;

pub const PUBLIC_TOKEN_TYPE: &str = "public";

const MIN_KEY_BYTES: usize = 16;

#[derive(Clone)]
pub struct TokenSettings {
  pub signing_key: String,
  pub issuer: String,
  pub audience: String,
  pub lifetime_minutes: i64,
}

impl fmt::Debug for TokenSettings {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TokenSettings")
      .field("signing_key", &"<redacted>")
      .field("issuer", &self.issuer)
      .field("audience", &self.audience)
      .field("lifetime_minutes", &self.lifetime_minutes)
      .finish()
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
  pub sub: String,
  pub token_type: String,
  pub generated_at: String,
  pub iat: i64,
  pub exp: i64,
  pub iss: String,
  pub aud: String,
}

impl TokenClaims {
  /// Claim name/value pairs in a stable order, for display.
  pub fn entries(&self) -> Vec<(&'static str, String)> {
    vec![
      ("sub", self.sub.clone()),
      ("token_type", self.token_type.clone()),
      ("generated_at", self.generated_at.clone()),
      ("iat", self.iat.to_string()),
      ("exp", self.exp.to_string()),
      ("iss", self.iss.clone()),
      ("aud", self.aud.clone()),
    ]
  }
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
  pub token: String,
  pub expires_at: DateTime<Utc>,
}

/// Signs and verifies HS256 tokens with one shared key.
#[derive(Clone)]
pub struct TokenIssuer {
  encoding_key: EncodingKey,
  decoding_key: DecodingKey,
  validation: Validation,
  issuer: String,
  audience: String,
  lifetime: Duration,
}

impl fmt::Debug for TokenIssuer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TokenIssuer")
      .field("issuer", &self.issuer)
      .field("audience", &self.audience)
      .field("lifetime", &self.lifetime)
      .finish_non_exhaustive()
  }
}

impl TokenIssuer {
  pub fn new(settings: TokenSettings) -> CatalogResult<Self> {
    if settings.signing_key.len() < MIN_KEY_BYTES {
      return Err(CatalogError::Configuration(format!(
        "Token signing key must be at least {} bytes",
        MIN_KEY_BYTES
      )));
    }
    if settings.issuer.trim().is_empty() || settings.audience.trim().is_empty() {
      return Err(CatalogError::Configuration("Token issuer and audience are required".to_string()));
    }
    if settings.lifetime_minutes <= 0 {
      return Err(CatalogError::Configuration("Token lifetime must be positive".to_string()));
    }
    let lifetime = Duration::try_minutes(settings.lifetime_minutes)
      .filter(|lifetime| Utc::now().checked_add_signed(*lifetime).is_some())
      .ok_or_else(|| CatalogError::Configuration("Token lifetime is out of range".to_string()))?;

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[settings.issuer.as_str()]);
    validation.set_audience(&[settings.audience.as_str()]);
    validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
    validation.leeway = 0;

    let key = settings.signing_key.as_bytes();
    Ok(Self {
      encoding_key: EncodingKey::from_secret(key),
      decoding_key: DecodingKey::from_secret(key),
      validation,
      issuer: settings.issuer,
      audience: settings.audience,
      lifetime,
    })
  }

  pub fn lifetime(&self) -> Duration {
    self.lifetime
  }

  pub fn generate(&self) -> CatalogResult<IssuedToken> {
    self.generate_at(Utc::now())
  }

  /// Issues a token as if signed at `issued_at`.
  pub fn generate_at(&self, issued_at: DateTime<Utc>) -> CatalogResult<IssuedToken> {
    let expires_at = issued_at
      .checked_add_signed(self.lifetime)
      .ok_or_else(|| CatalogError::Invalid(format!("Token issued at {} would expire out of range", issued_at)))?;
    let claims = TokenClaims {
      sub: Uuid::new_v4().to_string(),
      token_type: PUBLIC_TOKEN_TYPE.to_string(),
      generated_at: issued_at.to_rfc3339_opts(SecondsFormat::Secs, true),
      iat: issued_at.timestamp(),
      exp: expires_at.timestamp(),
      iss: self.issuer.clone(),
      aud: self.audience.clone(),
    };

    let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
    debug!(sub = %claims.sub, %expires_at, "Token issued.");
    Ok(IssuedToken { token, expires_at })
  }

  /// Claims of a token that verifies against the key, issuer, audience and
  /// expiry. Any failure yields `None`.
  pub fn validate(&self, token: &str) -> Option<TokenClaims> {
    match decode::<TokenClaims>(token, &self.decoding_key, &self.validation) {
      Ok(data) => Some(data.claims),
      Err(err) => {
        debug!(error = %err, "Token rejected.");
        None
      }
    }
  }
}
