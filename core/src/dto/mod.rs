// catalog_core/src/dto/mod.rs

//! Plain data shapes consumed and returned by the domain services.
//!
//! Views are acyclic: a [`CategoryView`] lists [`ProductSummary`] values with
//! no back-reference, and a [`ProductView`] embeds a [`CategoryView`] whose
//! product list is always empty.

pub mod category;
pub mod product;

pub use category::{CategoryView, CreateCategory, UpdateCategory};
pub use product::{CreateProduct, ProductSummary, ProductView, UpdateProduct};

use crate::error::{CatalogError, CatalogResult};

pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

pub(crate) fn validate_name(name: &str) -> CatalogResult<()> {
  if name.trim().is_empty() {
    return Err(CatalogError::Invalid("Name is required".to_string()));
  }
  if name.chars().count() > NAME_MAX_CHARS {
    return Err(CatalogError::Invalid(format!("Name cannot exceed {} characters", NAME_MAX_CHARS)));
  }
  Ok(())
}

pub(crate) fn validate_description(description: &str) -> CatalogResult<()> {
  if description.chars().count() > DESCRIPTION_MAX_CHARS {
    return Err(CatalogError::Invalid(format!(
      "Description cannot exceed {} characters",
      DESCRIPTION_MAX_CHARS
    )));
  }
  Ok(())
}
