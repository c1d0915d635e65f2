// catalog_core/src/auth/mod.rs

//! Bearer token issuance and validation.

pub mod token;

pub use token::{IssuedToken, TokenClaims, TokenIssuer, TokenSettings, PUBLIC_TOKEN_TYPE};
