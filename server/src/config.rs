// catalog_api/src/config.rs

use crate::errors::{AppError, Result};
use catalog_core::TokenSettings;
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub database_max_connections: u32,

  // Signing key is redacted by TokenSettings' Debug impl.
  pub token: TokenSettings,

  // Optional: for seeding DB on startup
  pub seed_db: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = parse_var("SERVER_PORT", get_env("SERVER_PORT").unwrap_or_else(|_| "8080".to_string()))?;
    let database_url = get_env("DATABASE_URL")?;
    let database_max_connections = parse_var(
      "DATABASE_MAX_CONNECTIONS",
      get_env("DATABASE_MAX_CONNECTIONS").unwrap_or_else(|_| "1".to_string()),
    )?;
    if database_max_connections == 0 {
      return Err(AppError::Config("DATABASE_MAX_CONNECTIONS must be at least 1".to_string()));
    }

    let token = TokenSettings {
      signing_key: get_env("JWT_KEY")?,
      issuer: get_env("JWT_ISSUER")?,
      audience: get_env("JWT_AUDIENCE")?,
      lifetime_minutes: parse_var("JWT_EXPIRATION_MINUTES", get_env("JWT_EXPIRATION_MINUTES")?)?,
    };

    let seed_db = parse_var("SEED_DB", get_env("SEED_DB").unwrap_or_else(|_| "false".to_string()))?;

    tracing::info!(
      server_host = %server_host,
      server_port,
      database_max_connections,
      seed_db,
      "Application configuration loaded successfully."
    );

    Ok(Self {
      server_host,
      server_port,
      database_url,
      database_max_connections,
      token,
      seed_db,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

fn parse_var<T>(var_name: &str, raw: String) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  raw
    .trim()
    .parse::<T>()
    .map_err(|e| AppError::Config(format!("Invalid {} value '{}': {}", var_name, raw, e)))
}
