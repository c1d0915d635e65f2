// catalog_api/src/main.rs

// Declare modules for the application
mod config;
mod errors;
mod seed;
mod state;
mod web;

use crate::config::AppConfig;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer}; // Renamed web to actix_data
use anyhow::Context;
use catalog_core::{Store, TokenIssuer};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting catalog API server...");

  // Every startup failure below exits before the server binds.
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => cfg,
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(e).context("Configuration error");
    }
  };

  let store = Store::connect(&app_config.database_url, app_config.database_max_connections)
    .await
    .context("Failed to open the catalog database")?;
  tracing::info!("Successfully connected to the database.");

  let tokens = TokenIssuer::new(app_config.token.clone()).context("Invalid token settings")?;

  let app_state = AppState::new(store, tokens);

  if app_config.seed_db {
    let created = seed::seed_catalog(&app_state).await?;
    tracing::info!(created, "Database seeding finished.");
  }

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("Failed to bind {}", server_address))?
  .run()
  .await
  .context("Server terminated with an error")
}
