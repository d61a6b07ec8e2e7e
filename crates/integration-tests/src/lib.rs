//! Integration tests for the Foltz promotions engine.
//!
//! # Test Categories
//!
//! - `promotion_scenarios` - End-to-end pricing scenarios and the engine's
//!   invariants (monotonic discount, idempotence, partition completeness,
//!   threshold boundaries)
//! - `cart_flow` - Cart persistence, daily pack availability, popup flags,
//!   and the pay-on-delivery split working together against the in-memory
//!   storage port
//!
//! The crate body is intentionally empty; everything lives in `tests/`.

#![cfg_attr(not(test), forbid(unsafe_code))]
