// catalog_api/src/web/auth.rs

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use catalog_core::TokenClaims;
use futures_util::future::{ready, Ready};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::state::AppState;

/// A caller that presented a valid `Authorization: Bearer <token>` header.
///
/// Adding this as a handler argument gates the route.
#[derive(Debug)]
pub struct BearerAuth {
  pub claims: TokenClaims,
}

impl FromRequest for BearerAuth {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    ready(authenticate(req))
  }
}

fn authenticate(req: &HttpRequest) -> Result<BearerAuth, AppError> {
  let state = req
    .app_data::<web::Data<AppState>>()
    .ok_or_else(|| AppError::Config("Application state is not registered".to_string()))?;

  let token = req
    .headers()
    .get(header::AUTHORIZATION)
    .and_then(|value| value.to_str().ok())
    .and_then(|value| value.strip_prefix("Bearer "))
    .map(str::trim)
    .filter(|token| !token.is_empty())
    .ok_or_else(|| {
      debug!("Request without a bearer token.");
      AppError::Auth("A bearer token is required.".to_string())
    })?;

  match state.tokens.validate(token) {
    Some(claims) => Ok(BearerAuth { claims }),
    None => {
      warn!(path = %req.path(), "Rejected an invalid or expired bearer token.");
      Err(AppError::Auth("The bearer token is invalid or expired.".to_string()))
    }
  }
}
