//! Foltz Promotions - tiered discount pricing engine.
//!
//! One parameterized calculator replaces the storefront's near-duplicate
//! Combo 3x / Pack Black / Mystery Box implementations. A [`Promotion`]
//! describes how cart items are split into category buckets and which
//! [`DiscountSchedule`] prices each bucket; [`Promotion::quote`] turns a cart
//! snapshot into [`PromotionTotals`] for the cart summary and checkout UI.
//!
//! The whole engine is synchronous and pure: no I/O, no shared state. The
//! only stateful pieces are [`cart::Cart`] persistence and the daily pack
//! counter, both of which talk to a key-value [`storage::StoragePort`]
//! instead of touching `localStorage` directly.
//!
//! # Modules
//!
//! - [`tier`] - Validated tier tables (quantity → discounted total price)
//! - [`partition`] - Slug-prefix cart partitioner
//! - [`calculator`] - Per-bucket discount calculator
//! - [`totals`] - Aggregated totals consumed by the UI
//! - [`promotion`] - Promotion configuration and quoting
//! - [`presets`] - The store's live promotions (Combo 3x, Pack Black, Mystery Box)
//! - [`cart`] - Cart state container with storage-backed persistence
//! - [`storage`] - Key-value storage port and in-memory implementation
//! - [`availability`] - Daily pack availability counter
//! - [`checkout`] - Pay-on-delivery payment split

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod availability;
pub mod calculator;
pub mod cart;
pub mod checkout;
pub mod partition;
pub mod presets;
pub mod promotion;
pub mod storage;
pub mod tier;
pub mod totals;

pub use availability::PackAvailability;
pub use calculator::{BucketTotals, DiscountSchedule};
pub use cart::{Cart, CartError};
pub use checkout::{PayOnDeliveryTerms, PayOnDeliveryTotals};
pub use partition::{Bucket, Category};
pub use promotion::{CategoryRule, Promotion};
pub use storage::{MemoryStorage, StorageError, StoragePort, StoredFlag};
pub use tier::{TierRule, TierTable, TierTableError};
pub use totals::PromotionTotals;
