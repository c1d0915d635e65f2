// catalog_core/src/dto/product.rs

use crate::dto::category::CategoryView;
use crate::dto::{validate_description, validate_name};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{Price, Product};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
  pub name: String,
  #[serde(default)]
  pub description: String,
  pub price: Decimal,
  pub stock: i32,
  pub category_id: i64,
}

impl CreateProduct {
  /// Checks field rules and returns the parsed price.
  pub fn validate(&self) -> CatalogResult<Price> {
    validate_name(&self.name)?;
    validate_description(&self.description)?;
    validate_stock(self.stock)?;
    Price::try_from(self.price)
  }
}

/// Full replacement of a product's mutable fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
  pub id: i64,
  pub name: String,
  #[serde(default)]
  pub description: String,
  pub price: Decimal,
  pub stock: i32,
  pub active: bool,
  pub category_id: i64,
}

impl UpdateProduct {
  /// Checks field rules and returns the parsed price.
  pub fn validate(&self) -> CatalogResult<Price> {
    validate_name(&self.name)?;
    validate_description(&self.description)?;
    validate_stock(self.stock)?;
    Price::try_from(self.price)
  }
}

fn validate_stock(stock: i32) -> CatalogResult<()> {
  if stock < 0 {
    return Err(CatalogError::Invalid("Stock cannot be negative".to_string()));
  }
  Ok(())
}

/// A product as listed inside its category. Carries the category id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
  pub id: i64,
  pub name: String,
  pub description: String,
  pub price: Decimal,
  pub stock: i32,
  pub active: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: Option<DateTime<Utc>>,
  pub category_id: i64,
}

impl From<&Product> for ProductSummary {
  fn from(product: &Product) -> Self {
    Self {
      id: product.id,
      name: product.name.clone(),
      description: product.description.clone(),
      price: product.price.to_decimal(),
      stock: product.stock,
      active: product.active,
      created_at: product.created_at,
      updated_at: product.updated_at,
      category_id: product.category_id,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
  #[serde(flatten)]
  pub product: ProductSummary,
  pub category: Option<CategoryView>,
}

impl From<&Product> for ProductView {
  fn from(product: &Product) -> Self {
    Self {
      product: ProductSummary::from(product),
      category: product.category.as_deref().map(CategoryView::shallow),
    }
  }
}
