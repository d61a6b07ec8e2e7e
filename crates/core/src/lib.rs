//! Foltz Core - Shared types library.
//!
//! This crate provides the domain types used across all Foltz components:
//! - `promotions` - Tiered discount pricing engine and cart state
//! - future storefront/admin surfaces
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and cart line items

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
