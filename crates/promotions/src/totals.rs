//! Aggregated promotion totals consumed by the cart summary and checkout UI.

use serde::Serialize;

use foltz_core::{CurrencyCode, Price};

use crate::calculator::BucketTotals;
use crate::partition::Category;

/// The totals object recomputed on every cart mutation. Purely derived,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromotionTotals {
    /// Total units across all buckets.
    pub item_count: u32,
    /// True if any bucket reached a tier threshold.
    pub has_discount: bool,
    /// Sum of normal subtotals.
    pub subtotal_normal: Price,
    /// Sum of discounted subtotals.
    pub subtotal_discounted: Price,
    /// `subtotal_normal - subtotal_discounted`.
    pub savings: Price,
    /// Flat shipping fee (zero means shipping is included in the promo price).
    pub shipping: Price,
    /// `subtotal_discounted + shipping`.
    pub total: Price,
    /// Per-category detail for badges and "add N more" messaging.
    pub buckets: Vec<BucketTotals>,
}

impl PromotionTotals {
    /// Zero totals for an empty cart. Shipping is still surfaced so the UI
    /// can render the fee line.
    #[must_use]
    pub fn empty(currency: CurrencyCode, shipping: Price) -> Self {
        Self {
            item_count: 0,
            has_discount: false,
            subtotal_normal: Price::zero(currency),
            subtotal_discounted: Price::zero(currency),
            savings: Price::zero(currency),
            shipping,
            total: shipping,
            buckets: Vec::new(),
        }
    }

    /// Per-category totals, if that bucket exists.
    #[must_use]
    pub fn bucket(&self, category: &Category) -> Option<&BucketTotals> {
        self.buckets.iter().find(|bucket| &bucket.category == category)
    }

    /// Items still needed in `category` to unlock its next tier.
    #[must_use]
    pub fn products_needed(&self, category: &Category) -> u32 {
        self.bucket(category).map_or(0, |bucket| bucket.products_needed)
    }
}

/// Combine bucket results into final totals, adding the flat shipping fee.
#[must_use]
pub fn aggregate(
    buckets: Vec<BucketTotals>,
    shipping: Price,
    currency: CurrencyCode,
) -> PromotionTotals {
    let item_count = buckets.iter().map(|bucket| bucket.item_count).sum();
    let has_discount = buckets.iter().any(|bucket| bucket.has_discount);
    let subtotal_normal = buckets
        .iter()
        .map(|bucket| bucket.subtotal_normal)
        .fold(Price::zero(currency), |acc, price| acc + price);
    let subtotal_discounted = buckets
        .iter()
        .map(|bucket| bucket.subtotal_discounted)
        .fold(Price::zero(currency), |acc, price| acc + price);

    PromotionTotals {
        item_count,
        has_discount,
        subtotal_normal,
        subtotal_discounted,
        savings: subtotal_normal - subtotal_discounted,
        shipping,
        total: subtotal_discounted + shipping,
        buckets,
    }
}
