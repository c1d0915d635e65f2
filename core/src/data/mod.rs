// catalog_core/src/data/mod.rs

//! Data access: the store, the generic repository and the unit of work that
//! binds them into one transaction.

pub mod entity;
pub mod repository;
pub mod store;
pub mod unit_of_work;

pub use entity::{Column, Entity, Predicate, Value};
pub use repository::Repository;
pub use store::Store;
pub use unit_of_work::{Session, TransactionState, UnitOfWork, UowFuture};
