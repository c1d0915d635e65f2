// catalog_core/src/lib.rs

//! Catalog core: the transactional data-access layer and domain services of a
//! category/product catalog.
//!
//!  - A generic [`Repository`] over any [`Entity`](data::Entity), with typed
//!    predicates and eager relation loading.
//!  - A [`UnitOfWork`] that owns the transaction handle and makes multi-step
//!    writes atomic.
//!  - [`CategoryService`] and [`ProductService`], which own the transaction
//!    lifecycle of each use case.
//!  - A [`TokenIssuer`] for the bearer tokens that gate the HTTP surface.

pub mod auth;
pub mod data;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;

// --- Re-exports for the Public API ---

pub use crate::error::{CatalogError, CatalogResult, ErrorKind};

pub use crate::data::{Predicate, Repository, Session, Store, TransactionState, UnitOfWork, UowFuture};

pub use crate::dto::{
  CategoryView, CreateCategory, CreateProduct, ProductSummary, ProductView, UpdateCategory, UpdateProduct,
};

pub use crate::services::{CategoryService, ProductService};

pub use crate::auth::{IssuedToken, TokenClaims, TokenIssuer, TokenSettings};

/*
    Request flow:
    1. The HTTP layer validates nothing beyond shape and hands a DTO to a service.
    2. The service opens a `UnitOfWork` from the `Store` and runs its steps in
       `UnitOfWork::transaction`, passing `&mut uow.session` to each repository call.
    3. `Ok` commits; any `Err` rolls back and is returned unchanged, so the
       caller sees the same `CatalogError` the failing step produced.
*/
