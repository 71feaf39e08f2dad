//! Foundation types for the Alms donation ledger.
//!
//! This crate provides the identity and amount types used throughout the
//! Alms system. Every other Alms crate depends on `alms-types`.
//!
//! # Key Types
//!
//! - [`AccountId`] — Opaque contributor identity derived from key material
//! - [`TokenId`] — Identifier for an externally defined fungible token
//! - [`Amount`] — Unsigned accumulator type for native and token value

pub mod account;
pub mod amount;
pub mod error;
pub mod token;

pub use account::AccountId;
pub use amount::{format_units, units, Amount, UNIT};
pub use error::TypeError;
pub use token::TokenId;
