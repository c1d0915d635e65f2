// catalog_api/src/web/handlers/token_handlers.rs

use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::response::ApiResponse;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
  pub success: bool,
  pub message: String,
  pub token: String,
  pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ClaimEntry {
  #[serde(rename = "type")]
  pub claim_type: String,
  pub value: String,
}

/// Issues a public token. No credentials are required.
#[instrument(name = "handler::generate_token", skip(app_state))]
pub async fn generate_token_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let issued = app_state.tokens.generate()?;
  info!(expires_at = %issued.expires_at, "Token generated.");
  Ok(HttpResponse::Ok().json(TokenResponse {
    success: true,
    message: "Token generated successfully.".to_string(),
    token: issued.token,
    expires_at: issued.expires_at,
  }))
}

/// Decodes a token sent as a JSON string body and lists its claims.
#[instrument(name = "handler::token_info", skip(app_state, body))]
pub async fn token_info_handler(
  app_state: web::Data<AppState>,
  body: web::Json<String>,
) -> Result<HttpResponse, AppError> {
  let token = body.into_inner();
  if token.trim().is_empty() {
    return Err(AppError::Validation("A token is required.".to_string()));
  }

  let claims = app_state
    .tokens
    .validate(token.trim())
    .ok_or_else(|| AppError::Validation("The token is invalid or expired.".to_string()))?;

  let entries: Vec<ClaimEntry> = claims
    .entries()
    .into_iter()
    .map(|(name, value)| ClaimEntry {
      claim_type: name.to_string(),
      value,
    })
    .collect();
  Ok(HttpResponse::Ok().json(ApiResponse::ok(entries, "Token is valid.")))
}
