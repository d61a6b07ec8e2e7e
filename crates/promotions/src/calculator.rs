//! Per-bucket discount calculator.
//!
//! Two schedule shapes cover every live promotion:
//!
//! - [`DiscountSchedule::Bundle`]: a fixed-size pack at a flat price (Combo
//!   3x, Pack Black). Full multiples get the bundle price; leftovers are
//!   priced individually.
//! - [`DiscountSchedule::Progressive`]: a tier table keyed by quantity
//!   (Mystery Box). The best unlocked tier applies; units beyond the tier's
//!   quantity are priced at that tier's discounted per-unit rate.
//!
//! Leftover units are assigned highest-unit-price-first. That ordering does
//! not change what the customer pays; it maximizes the savings figure shown
//! next to the "your cheapest jerseys are free" messaging.

use serde::{Deserialize, Serialize};

use foltz_core::{CurrencyCode, LineItem, Price};

use crate::partition::Category;
use crate::tier::TierTable;

/// The discount shape applied to one category bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscountSchedule {
    /// Fixed-size bundle: every `size` units cost `price`.
    Bundle { size: u32, price: Price },
    /// Progressive per-quantity tier table.
    Progressive { tiers: TierTable },
}

impl DiscountSchedule {
    /// The smallest item count that unlocks any discount.
    #[must_use]
    pub fn smallest_threshold(&self) -> u32 {
        match self {
            Self::Bundle { size, .. } => *size,
            Self::Progressive { tiers } => tiers.smallest_quantity(),
        }
    }
}

/// Pricing result for one category bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketTotals {
    pub category: Category,
    /// Sum of quantities in the bucket.
    pub item_count: u32,
    /// Sum of `unit_price * quantity`, no discounts.
    pub subtotal_normal: Price,
    /// Subtotal after the schedule is applied.
    pub subtotal_discounted: Price,
    /// `subtotal_normal - subtotal_discounted`.
    pub savings: Price,
    /// Whether any tier threshold was reached.
    pub has_discount: bool,
    /// Full bundles priced at the flat rate (bundle schedules only).
    pub full_multiples: u32,
    /// Units left over after full bundles, priced individually.
    pub remainder: u32,
    /// Items still needed to unlock the next tier, for "add N more" messaging.
    pub products_needed: u32,
}

impl BucketTotals {
    fn passthrough(
        category: Category,
        item_count: u32,
        subtotal_normal: Price,
        products_needed: u32,
        currency: CurrencyCode,
    ) -> Self {
        Self {
            category,
            item_count,
            subtotal_normal,
            subtotal_discounted: subtotal_normal,
            savings: Price::zero(currency),
            has_discount: false,
            full_multiples: 0,
            remainder: item_count,
            products_needed,
        }
    }
}

/// Price one bucket under an optional schedule.
///
/// `None` means the category has no promotion: normal pricing passes
/// through untouched. The discounted subtotal never exceeds the normal
/// subtotal, even for degenerate tier configurations.
#[must_use]
pub fn price_bucket(
    category: Category,
    items: &[LineItem],
    schedule: Option<&DiscountSchedule>,
    currency: CurrencyCode,
) -> BucketTotals {
    let item_count: u32 = items.iter().map(LineItem::quantity).sum();
    let subtotal_normal = items
        .iter()
        .map(LineItem::line_total)
        .fold(Price::zero(currency), |acc, line| acc + line);

    let Some(schedule) = schedule else {
        return BucketTotals::passthrough(category, item_count, subtotal_normal, 0, currency);
    };

    match schedule {
        DiscountSchedule::Bundle { size, price } => price_bundle_bucket(
            category,
            items,
            item_count,
            subtotal_normal,
            *size,
            *price,
            currency,
        ),
        DiscountSchedule::Progressive { tiers } => price_progressive_bucket(
            category,
            item_count,
            subtotal_normal,
            tiers,
            currency,
        ),
    }
}

fn price_bundle_bucket(
    category: Category,
    items: &[LineItem],
    item_count: u32,
    subtotal_normal: Price,
    size: u32,
    price: Price,
    currency: CurrencyCode,
) -> BucketTotals {
    if size == 0 || item_count < size {
        let needed = size.saturating_sub(item_count);
        return BucketTotals::passthrough(category, item_count, subtotal_normal, needed, currency);
    }

    let full_multiples = item_count / size;
    let remainder = item_count % size;

    let mut subtotal_discounted = price * full_multiples;
    if remainder > 0 {
        subtotal_discounted += leftover_total(items, remainder, currency);
    }
    // The pack never costs more than paying full price.
    if subtotal_discounted.amount > subtotal_normal.amount {
        subtotal_discounted = subtotal_normal;
    }

    BucketTotals {
        category,
        item_count,
        subtotal_normal,
        savings: subtotal_normal - subtotal_discounted,
        subtotal_discounted,
        has_discount: true,
        full_multiples,
        remainder,
        products_needed: 0,
    }
}

fn price_progressive_bucket(
    category: Category,
    item_count: u32,
    subtotal_normal: Price,
    table: &TierTable,
    currency: CurrencyCode,
) -> BucketTotals {
    let Some(rule) = table.rule_for(item_count) else {
        let needed = table
            .next_threshold(item_count)
            .map_or(0, |threshold| threshold - item_count);
        return BucketTotals::passthrough(category, item_count, subtotal_normal, needed, currency);
    };

    // Units beyond the selected tier pay that tier's discounted per-unit
    // rate, so a cart bigger than the top tier never rides for free.
    let excess = item_count - rule.quantity;
    let mut subtotal_discounted = rule.total_price + rule.price_per_unit() * excess;
    if subtotal_discounted.amount > subtotal_normal.amount {
        subtotal_discounted = subtotal_normal;
    }

    let products_needed = table
        .next_threshold(item_count)
        .map_or(0, |threshold| threshold - item_count);

    BucketTotals {
        category,
        item_count,
        subtotal_normal,
        savings: subtotal_normal - subtotal_discounted,
        subtotal_discounted,
        has_discount: true,
        full_multiples: 1,
        remainder: excess,
        products_needed,
    }
}

/// Price `remaining` leftover units individually, most expensive first.
fn leftover_total(items: &[LineItem], mut remaining: u32, currency: CurrencyCode) -> Price {
    let mut by_price_desc: Vec<&LineItem> = items.iter().collect();
    by_price_desc.sort_by(|a, b| b.unit_price.amount.cmp(&a.unit_price.amount));

    let mut total = Price::zero(currency);
    for item in by_price_desc {
        if remaining == 0 {
            break;
        }
        let take = item.quantity().min(remaining);
        total += item.unit_price * take;
        remaining -= take;
    }
    total
}

#[cfg(test)]
mod tests {
    use foltz_core::ProductId;

    use crate::tier::TierRule;

    use super::*;

    const ARS: CurrencyCode = CurrencyCode::ARS;

    fn ars(amount: i64) -> Price {
        Price::from_major(amount, ARS)
    }

    fn item(id: &str, price: i64, quantity: u32) -> LineItem {
        LineItem::new(
            ProductId::new(id),
            format!("camiseta-{id}"),
            "M",
            ars(price),
            quantity,
        )
        .expect("valid item")
    }

    fn pack_of_4() -> DiscountSchedule {
        DiscountSchedule::Bundle {
            size: 4,
            price: ars(59900),
        }
    }

    fn mystery_table() -> TierTable {
        TierTable::new(vec![
            TierRule::new(1, ars(23900), "Black Friday"),
            TierRule::new(2, ars(39900), "Mejor que 1"),
            TierRule::new(3, ars(47700), "Gran Ahorro"),
            TierRule::new(4, ars(55600), "Súper Ahorro"),
            TierRule::new(5, ars(59500), "MÁXIMO DESCUENTO"),
        ])
        .expect("valid table")
    }

    #[test]
    fn test_below_threshold_passthrough() {
        let items = vec![item("a", 36900, 2)];
        let totals = price_bucket(Category::new("regular"), &items, Some(&pack_of_4()), ARS);

        assert!(!totals.has_discount);
        assert_eq!(totals.subtotal_discounted, totals.subtotal_normal);
        assert!(totals.savings.is_zero());
        assert_eq!(totals.products_needed, 2);
    }

    #[test]
    fn test_exact_bundle() {
        let items = vec![item("a", 36900, 4)];
        let totals = price_bucket(Category::new("regular"), &items, Some(&pack_of_4()), ARS);

        assert!(totals.has_discount);
        assert_eq!(totals.full_multiples, 1);
        assert_eq!(totals.remainder, 0);
        assert_eq!(totals.subtotal_discounted, ars(59900));
        assert_eq!(totals.savings, ars(4 * 36900 - 59900));
    }

    #[test]
    fn test_bundle_with_leftover_prices_most_expensive_first() {
        // 4 cheap in the pack, 1 expensive leftover: the leftover charge uses
        // the most expensive unit so the displayed savings stay maximal.
        let items = vec![item("cheap", 29900, 4), item("dear", 42900, 1)];
        let totals = price_bucket(Category::new("regular"), &items, Some(&pack_of_4()), ARS);

        assert_eq!(totals.full_multiples, 1);
        assert_eq!(totals.remainder, 1);
        assert_eq!(totals.subtotal_discounted, ars(59900 + 42900));
    }

    #[test]
    fn test_two_full_bundles() {
        let items = vec![item("a", 36900, 8)];
        let totals = price_bucket(Category::new("regular"), &items, Some(&pack_of_4()), ARS);

        assert_eq!(totals.full_multiples, 2);
        assert_eq!(totals.subtotal_discounted, ars(2 * 59900));
    }

    #[test]
    fn test_bundle_never_exceeds_normal_price() {
        // Items cheaper than the bundle rate: discount clamps to normal.
        let items = vec![item("outlet", 9900, 4)];
        let totals = price_bucket(Category::new("regular"), &items, Some(&pack_of_4()), ARS);

        assert_eq!(totals.subtotal_discounted, totals.subtotal_normal);
        assert!(totals.savings.is_zero());
    }

    #[test]
    fn test_progressive_tier_selection() {
        let schedule = DiscountSchedule::Progressive { tiers: mystery_table() };
        let items = vec![item("mb", 34900, 2)];
        let totals = price_bucket(Category::new("mystery-box"), &items, Some(&schedule), ARS);

        assert!(totals.has_discount);
        assert_eq!(totals.subtotal_discounted, ars(39900));
        assert_eq!(totals.savings, ars(2 * 34900 - 39900));
        assert_eq!(totals.products_needed, 1);
    }

    #[test]
    fn test_progressive_excess_beyond_max_tier() {
        let schedule = DiscountSchedule::Progressive { tiers: mystery_table() };
        let items = vec![item("mb", 34900, 7)];
        let totals = price_bucket(Category::new("mystery-box"), &items, Some(&schedule), ARS);

        // 5 at the top tier plus 2 more at the top tier's per-unit rate.
        assert_eq!(totals.subtotal_discounted, ars(59500 + 2 * 11900));
        assert_eq!(totals.remainder, 2);
        assert_eq!(totals.products_needed, 0);
    }

    #[test]
    fn test_no_schedule_passthrough() {
        let items = vec![item("a", 36900, 5)];
        let totals = price_bucket(Category::new("regular"), &items, None, ARS);

        assert!(!totals.has_discount);
        assert_eq!(totals.subtotal_discounted, ars(5 * 36900));
        assert_eq!(totals.products_needed, 0);
    }

    #[test]
    fn test_empty_bucket() {
        let totals = price_bucket(Category::new("regular"), &[], Some(&pack_of_4()), ARS);

        assert_eq!(totals.item_count, 0);
        assert!(totals.subtotal_normal.is_zero());
        assert!(totals.subtotal_discounted.is_zero());
        assert!(!totals.has_discount);
        assert_eq!(totals.products_needed, 4);
    }
}
