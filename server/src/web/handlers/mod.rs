// catalog_api/src/web/handlers/mod.rs

pub mod category_handlers;
pub mod product_handlers;
pub mod token_handlers;
