// catalog_core/src/dto/category.rs

use crate::dto::product::ProductSummary;
use crate::dto::{validate_description, validate_name};
use crate::error::CatalogResult;
use crate::models::Category;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategory {
  pub name: String,
  #[serde(default)]
  pub description: String,
}

impl CreateCategory {
  pub fn validate(&self) -> CatalogResult<()> {
    validate_name(&self.name)?;
    validate_description(&self.description)
  }
}

/// Full replacement of a category's mutable fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
  pub id: i64,
  pub name: String,
  #[serde(default)]
  pub description: String,
  pub active: bool,
}

impl UpdateCategory {
  pub fn validate(&self) -> CatalogResult<()> {
    validate_name(&self.name)?;
    validate_description(&self.description)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
  pub id: i64,
  pub name: String,
  pub description: String,
  pub active: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: Option<DateTime<Utc>>,
  pub products: Vec<ProductSummary>,
}

impl CategoryView {
  /// The category without its products, as embedded in a product view.
  pub fn shallow(category: &Category) -> Self {
    Self {
      id: category.id,
      name: category.name.clone(),
      description: category.description.clone(),
      active: category.active,
      created_at: category.created_at,
      updated_at: category.updated_at,
      products: Vec::new(),
    }
  }
}

impl From<&Category> for CategoryView {
  fn from(category: &Category) -> Self {
    Self {
      products: category.products.iter().map(ProductSummary::from).collect(),
      ..Self::shallow(category)
    }
  }
}
