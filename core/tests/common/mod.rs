// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use catalog_core::models::{Category, Product};
use catalog_core::{
  CategoryService, CategoryView, CreateCategory, CreateProduct, Predicate, ProductService, ProductView, Store,
};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use tracing::Level;

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

/// A fresh in-memory store plus both services sharing it.
pub struct Fixture {
  pub store: Store,
  pub categories: CategoryService,
  pub products: ProductService,
}

pub async fn fixture() -> Fixture {
  setup_tracing();
  let store = Store::in_memory().await.expect("in-memory store");
  Fixture {
    categories: CategoryService::new(store.clone()),
    products: ProductService::new(store.clone()),
    store,
  }
}

/// A store backed by a database file in a fresh temp directory, with a pool of
/// `max_connections`. Keep the `TempDir` alive for the life of the store.
pub async fn file_fixture(max_connections: u32) -> (tempfile::TempDir, Fixture) {
  setup_tracing();
  let dir = tempfile::tempdir().expect("temp dir");
  let url = format!("sqlite://{}", dir.path().join("catalog.db").display());
  let store = Store::connect(&url, max_connections).await.expect("file store");
  let fx = Fixture {
    categories: CategoryService::new(store.clone()),
    products: ProductService::new(store.clone()),
    store,
  };
  (dir, fx)
}

pub fn new_category(name: &str) -> CreateCategory {
  CreateCategory {
    name: name.to_string(),
    description: format!("{} description", name),
  }
}

pub fn new_product(name: &str, category_id: i64) -> CreateProduct {
  CreateProduct {
    name: name.to_string(),
    description: String::new(),
    price: Decimal::new(1999, 2),
    stock: 10,
    category_id,
  }
}

pub async fn seed_category(fx: &Fixture, name: &str) -> CategoryView {
  fx.categories.create(new_category(name)).await.expect("seed category")
}

pub async fn seed_product(fx: &Fixture, name: &str, category_id: i64) -> ProductView {
  fx.products
    .create(new_product(name, category_id))
    .await
    .expect("seed product")
}

pub async fn category_count(store: &Store) -> i64 {
  let mut uow = store.unit_of_work();
  let total = uow
    .categories
    .count(&mut uow.session, &Predicate::<Category>::all())
    .await
    .expect("count categories");
  uow.dispose().await;
  total
}

pub async fn product_count(store: &Store) -> i64 {
  let mut uow = store.unit_of_work();
  let total = uow
    .products
    .count(&mut uow.session, &Predicate::<Product>::all())
    .await
    .expect("count products");
  uow.dispose().await;
  total
}
