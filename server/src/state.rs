// catalog_api/src/state.rs
use catalog_core::{CategoryService, ProductService, Store, TokenIssuer};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub categories: CategoryService,
  pub products: ProductService,
  pub tokens: Arc<TokenIssuer>,
}

impl AppState {
  pub fn new(store: Store, tokens: TokenIssuer) -> Self {
    Self {
      categories: CategoryService::new(store.clone()),
      products: ProductService::new(store),
      tokens: Arc::new(tokens),
    }
  }
}

#[cfg(test)]
impl AppState {
  /// State over `store` with fixed token settings, for handler tests.
  pub fn for_tests(store: Store) -> Self {
    let tokens = TokenIssuer::new(catalog_core::TokenSettings {
      signing_key: "api-test-signing-key-0123456789".to_string(),
      issuer: "catalog-api-tests".to_string(),
      audience: "catalog-api-clients".to_string(),
      lifetime_minutes: 15,
    })
    .expect("test token settings are valid");
    Self::new(store, tokens)
  }
}
