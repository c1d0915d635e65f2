// catalog_core/src/data/store.rs

//! SQLite-backed entity store: pool setup and idempotent schema bootstrap.

use crate::data::unit_of_work::UnitOfWork;
use crate::error::{CatalogError, CatalogResult};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{info, instrument};

/// Statements creating the catalog tables. Unique indexes and the cascading
/// foreign key back the service-level checks.
const SCHEMA: &[&str] = &[
  r#"
  CREATE TABLE IF NOT EXISTS categories (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT    NOT NULL CHECK (length(trim(name)) > 0 AND length(name) <= 100),
    description TEXT    NOT NULL DEFAULT '' CHECK (length(description) <= 500),
    active      BOOLEAN NOT NULL DEFAULT 1,
    created_at  TEXT    NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at  TEXT
  )
  "#,
  "CREATE UNIQUE INDEX IF NOT EXISTS ux_categories_name ON categories (name)",
  r#"
  CREATE TABLE IF NOT EXISTS products (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT    NOT NULL CHECK (length(trim(name)) > 0 AND length(name) <= 100),
    description TEXT    NOT NULL DEFAULT '' CHECK (length(description) <= 500),
    price_cents INTEGER NOT NULL CHECK (price_cents >= 0),
    stock       INTEGER NOT NULL CHECK (stock >= 0),
    active      BOOLEAN NOT NULL DEFAULT 1,
    created_at  TEXT    NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at  TEXT,
    category_id INTEGER NOT NULL REFERENCES categories (id) ON DELETE CASCADE
  )
  "#,
  "CREATE UNIQUE INDEX IF NOT EXISTS ux_products_name ON products (name)",
  "CREATE INDEX IF NOT EXISTS ix_products_category_id ON products (category_id)",
];

/// Handle to the catalog database. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Store {
  pool: SqlitePool,
}

impl Store {
  /// Connects to `url` (e.g. `sqlite://catalog.db`), creating the file if
  /// needed, and bootstraps the schema.
  #[instrument(name = "store::connect", skip(url), err(Display))]
  pub async fn connect(url: &str, max_connections: u32) -> CatalogResult<Self> {
    if max_connections == 0 {
      return Err(CatalogError::Configuration("max_connections must be at least 1".to_string()));
    }
    let options = SqliteConnectOptions::from_str(url)?
      .create_if_missing(true)
      .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
      .max_connections(max_connections)
      .connect_with(options)
      .await?;

    let store = Self { pool };
    store.ensure_schema().await?;
    info!(max_connections, "Catalog store ready.");
    Ok(store)
  }

  /// A private in-memory database. The single connection is pinned so the
  /// data lives as long as the store.
  pub async fn in_memory() -> CatalogResult<Self> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
      .max_connections(1)
      .min_connections(1)
      .idle_timeout(None)
      .max_lifetime(None)
      .connect_with(options)
      .await?;

    let store = Self { pool };
    store.ensure_schema().await?;
    Ok(store)
  }

  /// Creates missing tables and indexes. Existing data is untouched.
  pub async fn ensure_schema(&self) -> CatalogResult<()> {
    for statement in SCHEMA {
      sqlx::query(statement).execute(&self.pool).await?;
    }
    Ok(())
  }

  pub fn unit_of_work(&self) -> UnitOfWork {
    UnitOfWork::new(self.pool.clone())
  }

  pub fn pool(&self) -> &SqlitePool {
    &self.pool
  }
}
