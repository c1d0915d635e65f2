// catalog_api/src/errors.rs

use crate::web::response::ApiResponse;
use actix_web::http::header::{self, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use catalog_core::{CatalogError, ErrorKind};
use thiserror::Error;

const INTERNAL_MESSAGE: &str = "An internal error occurred. Please try again later.";

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error(transparent)]
  Catalog(#[from] CatalogError),
}

impl AppError {
  fn kind(&self) -> ErrorKind {
    match self {
      AppError::Validation(_) => ErrorKind::Invalid,
      AppError::Auth(_) => ErrorKind::Unauthorized,
      AppError::Config(_) => ErrorKind::Internal,
      AppError::Catalog(err) => err.kind(),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self.kind() {
      ErrorKind::NotFound => StatusCode::NOT_FOUND,
      ErrorKind::Conflict | ErrorKind::Invalid => StatusCode::BAD_REQUEST,
      ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
      ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let body = match (self, self.kind()) {
      // Details stay in the log.
      (_, ErrorKind::Internal) => {
        tracing::error!(application_error = %self, "Responding with internal error");
        ApiResponse::<()>::failure(INTERNAL_MESSAGE)
      }
      (AppError::Validation(detail), _) => {
        tracing::warn!(application_error = %self, "Rejecting malformed request");
        ApiResponse::<()>::failure_with("Invalid request data", vec![detail.clone()])
      }
      _ => {
        tracing::warn!(application_error = %self, status = status.as_u16(), "Responding with error");
        ApiResponse::<()>::failure(self.message())
      }
    };

    let mut response = HttpResponse::build(status);
    if status == StatusCode::UNAUTHORIZED {
      response.insert_header((header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer")));
    }
    response.json(body)
  }
}

impl AppError {
  /// Caller-facing message, without the variant prefix.
  fn message(&self) -> String {
    match self {
      AppError::Validation(m) | AppError::Auth(m) | AppError::Config(m) => m.clone(),
      AppError::Catalog(err) => err.to_string(),
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
