// catalog_core/src/error.rs
use thiserror::Error;

/// Coarse failure taxonomy exposed to callers of the catalog.
///
/// The HTTP boundary maps each kind to exactly one status code; everything the
/// core raises folds into one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  NotFound,
  Conflict,
  Invalid,
  Unauthorized,
  Internal,
}

#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  Conflict(String),

  #[error("{0}")]
  Invalid(String),

  #[error("{0}")]
  Unauthorized(String),

  /// The unit of work was driven out of order (e.g. `begin` while active).
  #[error("Transaction state error: {0}")]
  TransactionState(String),

  #[error("Configuration error: {0}")]
  Configuration(String),

  #[error("Token error: {source}")]
  Token {
    #[source]
    source: jsonwebtoken::errors::Error,
  },

  #[error("Store error: {source}")]
  Store {
    #[source]
    source: sqlx::Error,
  },

  #[error("Internal catalog error: {0}")]
  Internal(String),
}

impl CatalogError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      CatalogError::NotFound(_) => ErrorKind::NotFound,
      CatalogError::Conflict(_) => ErrorKind::Conflict,
      CatalogError::Invalid(_) => ErrorKind::Invalid,
      CatalogError::Unauthorized(_) => ErrorKind::Unauthorized,
      CatalogError::TransactionState(_)
      | CatalogError::Configuration(_)
      | CatalogError::Token { .. }
      | CatalogError::Store { .. }
      | CatalogError::Internal(_) => ErrorKind::Internal,
    }
  }
}

// Constraint violations raised by the store are the backstop for the
// service-level checks, so they surface with the same kind a check would give.
impl From<sqlx::Error> for CatalogError {
  fn from(err: sqlx::Error) -> Self {
    if let sqlx::Error::Database(db_err) = &err {
      if db_err.is_unique_violation() {
        return CatalogError::Conflict(format!("A record with the same unique value already exists ({})", db_err.message()));
      }
      if db_err.is_foreign_key_violation() {
        return CatalogError::NotFound(format!("A referenced record does not exist ({})", db_err.message()));
      }
      if db_err.is_check_violation() {
        return CatalogError::Invalid(format!("A value violates a store constraint ({})", db_err.message()));
      }
    }
    CatalogError::Store { source: err }
  }
}

impl From<jsonwebtoken::errors::Error> for CatalogError {
  fn from(err: jsonwebtoken::errors::Error) -> Self {
    CatalogError::Token { source: err }
  }
}

pub type CatalogResult<T, E = CatalogError> = std::result::Result<T, E>;
