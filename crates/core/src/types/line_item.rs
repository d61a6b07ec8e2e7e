//! Validated cart line items.
//!
//! Cart items arriving from the UI layer are duck-typed JSON; this type is the
//! explicit record validated at the cart-mutation boundary. Downstream pricing
//! code can rely on `quantity >= 1` and `unit_price >= 0` holding.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::ProductId;
use super::price::Price;

/// Errors rejected at the cart-mutation boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineItemError {
    /// Quantity must be at least 1.
    #[error("Invalid quantity {0}: must be at least 1")]
    InvalidQuantity(u32),

    /// Unit price must not be negative.
    #[error("Invalid unit price {0}: must not be negative")]
    NegativePrice(Decimal),
}

/// One product+size combination in the cart.
///
/// Deserialization funnels through [`LineItem::new`] so persisted carts
/// cannot smuggle in invariant-breaking lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLineItem")]
pub struct LineItem {
    /// Product identifier.
    pub id: ProductId,
    /// URL slug, used for promotion category classification.
    pub slug: String,
    /// Selected size (e.g. "M", "XL").
    pub size: String,
    /// Unit price in the store currency.
    pub unit_price: Price,
    /// Number of units, always >= 1.
    quantity: u32,
}

impl LineItem {
    /// Create a validated line item.
    ///
    /// # Errors
    ///
    /// Returns [`LineItemError`] when `quantity` is zero or `unit_price` is
    /// negative.
    pub fn new(
        id: ProductId,
        slug: impl Into<String>,
        size: impl Into<String>,
        unit_price: Price,
        quantity: u32,
    ) -> Result<Self, LineItemError> {
        if quantity == 0 {
            return Err(LineItemError::InvalidQuantity(quantity));
        }
        if unit_price.amount.is_sign_negative() {
            return Err(LineItemError::NegativePrice(unit_price.amount));
        }

        Ok(Self {
            id,
            slug: slug.into(),
            size: size.into(),
            unit_price,
            quantity,
        })
    }

    /// Number of units in this line.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Replace the quantity, keeping the `>= 1` invariant.
    ///
    /// # Errors
    ///
    /// Returns [`LineItemError::InvalidQuantity`] for a zero quantity;
    /// removing a line is a cart operation, not a quantity update.
    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), LineItemError> {
        if quantity == 0 {
            return Err(LineItemError::InvalidQuantity(quantity));
        }
        self.quantity = quantity;
        Ok(())
    }

    /// Increase the quantity (merging an `add` of the same product+size).
    pub fn add_quantity(&mut self, quantity: u32) {
        self.quantity = self.quantity.saturating_add(quantity);
    }

    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price * self.quantity
    }

    /// Whether this line matches the given product+size key.
    #[must_use]
    pub fn matches(&self, id: &ProductId, size: &str) -> bool {
        &self.id == id && self.size == size
    }
}

/// Wire shape for [`LineItem`]; validation happens in the conversion.
#[derive(Deserialize)]
struct RawLineItem {
    id: ProductId,
    slug: String,
    size: String,
    unit_price: Price,
    quantity: u32,
}

impl TryFrom<RawLineItem> for LineItem {
    type Error = LineItemError;

    fn try_from(raw: RawLineItem) -> Result<Self, Self::Error> {
        Self::new(raw.id, raw.slug, raw.size, raw.unit_price, raw.quantity)
    }
}
