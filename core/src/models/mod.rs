// catalog_core/src/models/mod.rs

//! Row types stored in the catalog and their [`Entity`](crate::data::Entity) bindings.

pub mod category;
pub mod product;

pub use category::{Category, CategoryColumn, CategoryRelation};
pub use product::{Price, Product, ProductColumn, ProductRelation};
