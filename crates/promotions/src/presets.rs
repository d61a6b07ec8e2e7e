//! The store's live promotions, lifted out of the UI layer into config.
//!
//! Prices are whole Argentine pesos. These used to be constants scattered
//! across three near-duplicate cart contexts; they are now plain
//! [`Promotion`] values fed to the one calculator.

use foltz_core::{CurrencyCode, Price};

use crate::calculator::DiscountSchedule;
use crate::partition::Category;
use crate::promotion::{CategoryRule, Promotion};
use crate::tier::{TierRule, TierTable};

/// Combo 3x: 3 jerseys at a flat price.
pub const COMBO_SIZE: u32 = 3;
/// ARS 49.900 per combo of 3.
pub const COMBO_PRICE: i64 = 49_900;

/// Pack Black: 4 jerseys at a flat price.
pub const PACK_BLACK_SIZE: u32 = 4;
/// ARS 59.900 per pack of 4.
pub const PACK_BLACK_PRICE: i64 = 59_900;
/// Packs released per day.
pub const DAILY_PACK_LIMIT: u32 = 15;

/// Slug prefix classifying Mystery Box products.
pub const MYSTERY_BOX_SLUG_PREFIX: &str = "mystery-box-";
/// ARS 34.900 per box without the promo.
pub const MYSTERY_BOX_NORMAL_PRICE: i64 = 34_900;

/// Category name for Mystery Box buckets.
#[must_use]
pub fn mystery_box_category() -> Category {
    Category::new("mystery-box")
}

/// Category name for regular jerseys.
#[must_use]
pub fn regular_category() -> Category {
    Category::new("regular")
}

fn ars(amount: i64) -> Price {
    Price::from_major(amount, CurrencyCode::ARS)
}

/// The Mystery Box progressive discount table (1 through 5 boxes).
///
/// # Panics
///
/// Never panics: the table below is ascending by construction.
#[must_use]
#[allow(clippy::missing_panics_doc)]
pub fn mystery_box_tiers() -> TierTable {
    TierTable::new(vec![
        TierRule::new(1, ars(23_900), "Black Friday"),
        TierRule::new(2, ars(39_900), "Mejor que 1"),
        TierRule::new(3, ars(47_700), "Gran Ahorro"),
        TierRule::new(4, ars(55_600), "Súper Ahorro"),
        TierRule::new(5, ars(59_500), "MÁXIMO DESCUENTO"),
    ])
    .expect("mystery box tier table is valid")
}

/// Combo 3x: every 3 jerseys cost ARS 49.900, shipping included.
#[must_use]
pub fn combo_3x() -> Promotion {
    Promotion::new(
        "Combo 3x",
        CurrencyCode::ARS,
        ars(0),
        vec![CategoryRule::catch_all(
            regular_category(),
            Some(DiscountSchedule::Bundle {
                size: COMBO_SIZE,
                price: ars(COMBO_PRICE),
            }),
        )],
    )
}

/// Pack Black plus the Mystery Box table; both can coexist in one cart.
/// Shipping is free during the promo.
#[must_use]
pub fn black_friday() -> Promotion {
    Promotion::new(
        "Pack Black",
        CurrencyCode::ARS,
        ars(0),
        vec![
            CategoryRule::with_prefix(
                mystery_box_category(),
                MYSTERY_BOX_SLUG_PREFIX,
                DiscountSchedule::Progressive {
                    tiers: mystery_box_tiers(),
                },
            ),
            CategoryRule::catch_all(
                regular_category(),
                Some(DiscountSchedule::Bundle {
                    size: PACK_BLACK_SIZE,
                    price: ars(PACK_BLACK_PRICE),
                }),
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mystery_box_tiers_match_the_campaign() {
        let table = mystery_box_tiers();
        assert_eq!(table.smallest_quantity(), 1);
        assert_eq!(table.max_rule().quantity, 5);
        assert_eq!(table.max_rule().total_price, ars(59_500));
        // Top tier works out to ARS 11.900 per box, the advertised 65% off.
        assert_eq!(table.max_rule().price_per_unit(), ars(11_900));
        assert_eq!(
            table.max_rule().discount_percent(ars(MYSTERY_BOX_NORMAL_PRICE)),
            65
        );
    }

    #[test]
    fn test_black_friday_has_both_categories() {
        let promo = black_friday();
        assert_eq!(promo.rules.len(), 2);
        assert!(promo.shipping_fee.is_zero());
        assert!(promo.enabled);
    }
}
