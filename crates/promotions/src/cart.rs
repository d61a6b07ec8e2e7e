//! Cart state container with storage-backed persistence.
//!
//! The cart exclusively owns its line items; promotions only ever see a
//! snapshot. All invariants (`quantity >= 1`, non-negative prices, one
//! currency per cart) are enforced here, at the mutation boundary, so the
//! pricing engine downstream never has to re-validate.

use foltz_core::{CurrencyCode, LineItem, LineItemError, Price, ProductId};
use thiserror::Error;

use crate::promotion::Promotion;
use crate::storage::{StorageError, StoragePort, keys};
use crate::totals::PromotionTotals;

/// Cart mutation failures.
#[derive(Debug, Error)]
pub enum CartError {
    /// The item itself is malformed.
    #[error(transparent)]
    Item(#[from] LineItemError),

    /// The item's currency does not match the cart's.
    #[error("Currency mismatch: cart is {expected:?}, item is {actual:?}")]
    CurrencyMismatch {
        expected: CurrencyCode,
        actual: CurrencyCode,
    },

    /// Persistence failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The client-side cart: an ordered list of validated line items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
    currency: CurrencyCode,
}

impl Cart {
    /// An empty cart in the given currency.
    #[must_use]
    pub const fn new(currency: CurrencyCode) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Load the cart persisted under [`keys::CART`].
    ///
    /// A corrupt payload is logged and treated as an empty cart: shoppers
    /// should never be locked out of the store by a bad cache entry.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] only when the backend itself fails.
    pub fn load(storage: &dyn StoragePort, currency: CurrencyCode) -> Result<Self, StorageError> {
        let Some(raw) = storage.get(keys::CART)? else {
            return Ok(Self::new(currency));
        };

        match serde_json::from_str::<Vec<LineItem>>(&raw) {
            Ok(items) => {
                let mut cart = Self::new(currency);
                for item in items {
                    if let Err(e) = cart.add(item) {
                        tracing::warn!("Dropping invalid persisted cart item: {e}");
                    }
                }
                Ok(cart)
            }
            Err(e) => {
                tracing::warn!("Failed to parse persisted cart, starting empty: {e}");
                Ok(Self::new(currency))
            }
        }
    }

    /// Persist the cart under [`keys::CART`].
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when serialization or the backend fails.
    pub fn save(&self, storage: &dyn StoragePort) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&self.items)
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        storage.set(keys::CART, &raw)?;
        tracing::debug!(item_count = self.item_count(), "Saved cart");
        Ok(())
    }

    /// Add an item, merging quantities when the same product+size is
    /// already in the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] when the item is priced in a
    /// different currency than the cart.
    pub fn add(&mut self, item: LineItem) -> Result<(), CartError> {
        if item.unit_price.currency_code != self.currency {
            return Err(CartError::CurrencyMismatch {
                expected: self.currency,
                actual: item.unit_price.currency_code,
            });
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|existing| existing.matches(&item.id, &item.size))
        {
            existing.add_quantity(item.quantity());
        } else {
            self.items.push(item);
        }
        Ok(())
    }

    /// Set the quantity for a product+size line. Quantity zero removes the
    /// line, matching the cart UI's behavior.
    ///
    /// # Errors
    ///
    /// Currently infallible for valid carts; kept fallible for parity with
    /// the other mutation methods.
    pub fn update_quantity(
        &mut self,
        id: &ProductId,
        size: &str,
        quantity: u32,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            self.remove(id, size);
            return Ok(());
        }
        if let Some(item) = self.items.iter_mut().find(|item| item.matches(id, size)) {
            item.set_quantity(quantity)?;
        }
        Ok(())
    }

    /// Remove a product+size line. Removing an absent line is a no-op.
    pub fn remove(&mut self, id: &ProductId, size: &str) {
        self.items.retain(|item| !item.matches(id, size));
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Snapshot of the line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(LineItem::quantity).sum()
    }

    /// Undiscounted subtotal.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items
            .iter()
            .map(LineItem::line_total)
            .fold(Price::zero(self.currency), |acc, line| acc + line)
    }

    /// The cart's currency.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Quote this cart under a promotion.
    #[must_use]
    pub fn quote(&self, promotion: &Promotion) -> PromotionTotals {
        promotion.quote(&self.items)
    }
}
