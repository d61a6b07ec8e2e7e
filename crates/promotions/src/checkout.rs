//! Pay-on-delivery payment split.
//!
//! Qualifying carts pay the shipping fee upfront and the subtotal when the
//! jerseys arrive. Carts over the item limit (or empty carts) pay everything
//! upfront. Either way `pay_now + pay_on_delivery == total`.

use serde::Serialize;

use foltz_core::{LineItem, Price};

/// Pay-on-delivery offer configuration.
#[derive(Debug, Clone, Copy)]
pub struct PayOnDeliveryTerms {
    /// Flat shipping fee, always paid upfront.
    pub shipping_fee: Price,
    /// Largest cart eligible for the split.
    pub max_items: u32,
}

/// ARS 8.000 shipping, up to 6 jerseys.
pub const STANDARD_SHIPPING_FEE: i64 = 8_000;
/// Maximum jerseys eligible for pay-on-delivery.
pub const MAX_ITEMS: u32 = 6;

/// The payment split surfaced at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayOnDeliveryTotals {
    pub item_count: u32,
    /// Whether the cart qualifies for the split.
    pub is_valid: bool,
    /// Charged at checkout.
    pub pay_now: Price,
    /// Charged on delivery.
    pub pay_on_delivery: Price,
    /// `pay_now + pay_on_delivery`.
    pub total: Price,
    pub shipping: Price,
    /// True when the cart is over the item limit.
    pub max_items_reached: bool,
}

impl PayOnDeliveryTerms {
    /// Split a cart's payment between checkout and delivery.
    ///
    /// `subtotal` is whatever the active promotion quoted; this split never
    /// re-prices the cart.
    #[must_use]
    pub fn quote(&self, items: &[LineItem], subtotal: Price) -> PayOnDeliveryTotals {
        let item_count: u32 = items.iter().map(LineItem::quantity).sum();
        let is_valid = item_count > 0 && item_count <= self.max_items;
        let total = subtotal + self.shipping_fee;

        let (pay_now, pay_on_delivery) = if is_valid {
            (self.shipping_fee, subtotal)
        } else {
            (total, Price::zero(total.currency_code))
        };

        PayOnDeliveryTotals {
            item_count,
            is_valid,
            pay_now,
            pay_on_delivery,
            total,
            shipping: self.shipping_fee,
            max_items_reached: item_count > self.max_items,
        }
    }
}

impl Default for PayOnDeliveryTerms {
    fn default() -> Self {
        Self {
            shipping_fee: Price::from_major(STANDARD_SHIPPING_FEE, foltz_core::CurrencyCode::ARS),
            max_items: MAX_ITEMS,
        }
    }
}

#[cfg(test)]
mod tests {
    use foltz_core::{CurrencyCode, ProductId};

    use super::*;

    fn ars(amount: i64) -> Price {
        Price::from_major(amount, CurrencyCode::ARS)
    }

    fn items(quantity: u32) -> Vec<LineItem> {
        vec![
            LineItem::new(ProductId::new("p1"), "camiseta-boca", "M", ars(36900), quantity)
                .expect("valid item"),
        ]
    }

    #[test]
    fn test_qualifying_cart_pays_shipping_now() {
        let terms = PayOnDeliveryTerms::default();
        let split = terms.quote(&items(3), ars(110_700));

        assert!(split.is_valid);
        assert_eq!(split.pay_now, ars(8_000));
        assert_eq!(split.pay_on_delivery, ars(110_700));
        assert_eq!(split.total, ars(118_700));
        assert!(!split.max_items_reached);
    }

    #[test]
    fn test_oversize_cart_pays_everything_upfront() {
        let terms = PayOnDeliveryTerms::default();
        let split = terms.quote(&items(7), ars(258_300));

        assert!(!split.is_valid);
        assert!(split.max_items_reached);
        assert_eq!(split.pay_now, split.total);
        assert!(split.pay_on_delivery.is_zero());
    }

    #[test]
    fn test_empty_cart_does_not_qualify() {
        let terms = PayOnDeliveryTerms::default();
        let split = terms.quote(&[], ars(0));

        assert!(!split.is_valid);
        assert!(!split.max_items_reached);
        assert_eq!(split.pay_now, ars(8_000));
    }

    #[test]
    fn test_split_always_sums_to_total() {
        let terms = PayOnDeliveryTerms::default();
        for quantity in [1, 6, 7] {
            let split = terms.quote(&items(quantity), ars(36900 * i64::from(quantity)));
            assert_eq!(split.pay_now + split.pay_on_delivery, split.total);
        }
    }
}
