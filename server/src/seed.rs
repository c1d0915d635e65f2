// catalog_api/src/seed.rs

//! Sample catalog written on startup when `SEED_DB=true` and the store is empty.

use anyhow::Context;
use catalog_core::{CatalogError, CreateCategory, CreateProduct};
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use crate::state::AppState;

const SAMPLE: &[(&str, &str, &[(&str, i64, i32)])] = &[
  (
    "Electronics",
    "Devices and accessories",
    &[("USB-C Cable", 999, 120), ("Wireless Mouse", 2450, 40)],
  ),
  (
    "Books",
    "Printed and digital books",
    &[("Rust in Action", 3999, 15), ("The Pragmatic Programmer", 4299, 8)],
  ),
  ("Groceries", "Everyday food and drink", &[("Green Tea", 450, 300)]),
];

/// Returns how many rows were created. Names that already exist are skipped.
#[instrument(name = "seed::seed_catalog", skip(state))]
pub async fn seed_catalog(state: &AppState) -> anyhow::Result<usize> {
  let existing = state.categories.get_all().await.context("Failed to inspect the catalog before seeding")?;
  if !existing.is_empty() {
    info!(categories = existing.len(), "Catalog already has data; skipping seed.");
    return Ok(0);
  }

  let mut created = 0;
  for (name, description, products) in SAMPLE {
    let category = match state
      .categories
      .create(CreateCategory {
        name: name.to_string(),
        description: description.to_string(),
      })
      .await
    {
      Ok(category) => {
        created += 1;
        category
      }
      Err(CatalogError::Conflict(msg)) => {
        warn!(category = name, %msg, "Seed category already exists; skipping its products.");
        continue;
      }
      Err(err) => return Err(err).with_context(|| format!("Failed to seed category '{}'", name)),
    };

    for (product_name, cents, stock) in products.iter() {
      let result = state
        .products
        .create(CreateProduct {
          name: product_name.to_string(),
          description: String::new(),
          price: Decimal::new(*cents, 2),
          stock: *stock,
          category_id: category.id,
        })
        .await;
      match result {
        Ok(_) => created += 1,
        Err(CatalogError::Conflict(msg)) => warn!(product = product_name, %msg, "Seed product already exists."),
        Err(err) => return Err(err).with_context(|| format!("Failed to seed product '{}'", product_name)),
      }
    }
  }

  info!(created, "Catalog seeded.");
  Ok(created)
}
