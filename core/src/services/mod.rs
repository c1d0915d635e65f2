// catalog_core/src/services/mod.rs

//! Domain services. Each owns the transaction lifecycle of its operations.

pub mod category_service;
pub mod product_service;

pub use category_service::CategoryService;
pub use product_service::ProductService;
