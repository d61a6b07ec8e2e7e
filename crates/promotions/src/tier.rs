//! Tier tables: ordered (quantity → discounted total price) configuration.
//!
//! A [`TierTable`] is config-time constant data. It is validated once at
//! construction so the calculator can rely on the rules being non-empty and
//! strictly ascending by quantity.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use foltz_core::Price;

/// Errors raised when constructing a [`TierTable`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TierTableError {
    /// A tier table must have at least one rule.
    #[error("Tier table must not be empty")]
    Empty,

    /// Tier quantities start at 1.
    #[error("Tier quantity must be at least 1")]
    ZeroQuantity,

    /// Rules must be strictly ascending by quantity.
    #[error("Tier quantities must be strictly ascending: {previous} before {next}")]
    NotAscending { previous: u32, next: u32 },
}

/// One configuration entry: buying exactly `quantity` units of the category
/// costs `total_price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRule {
    /// Quantity threshold this rule applies to.
    pub quantity: u32,
    /// Discounted total for exactly `quantity` units.
    pub total_price: Price,
    /// Display string for tier pickers (e.g. "MÁXIMO DESCUENTO").
    pub label: String,
}

impl TierRule {
    /// Create a rule.
    #[must_use]
    pub fn new(quantity: u32, total_price: Price, label: impl Into<String>) -> Self {
        Self {
            quantity,
            total_price,
            label: label.into(),
        }
    }

    /// Discounted price per unit at this tier.
    #[must_use]
    pub fn price_per_unit(&self) -> Price {
        debug_assert!(self.quantity >= 1);
        Price::new(
            self.total_price.amount / Decimal::from(self.quantity.max(1)),
            self.total_price.currency_code,
        )
    }

    /// Percentage saved at this tier against a normal per-unit price,
    /// rounded down. Display metadata only.
    #[must_use]
    pub fn discount_percent(&self, normal_unit_price: Price) -> u32 {
        let normal_total = normal_unit_price * self.quantity;
        if normal_total.is_zero() || self.total_price.amount >= normal_total.amount {
            return 0;
        }
        let ratio = (normal_total.amount - self.total_price.amount) / normal_total.amount;
        (ratio * Decimal::ONE_HUNDRED).floor().to_u32().unwrap_or(0)
    }
}

/// A validated, ascending list of [`TierRule`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TierRule>", into = "Vec<TierRule>")]
pub struct TierTable {
    rules: Vec<TierRule>,
}

impl TierTable {
    /// Build a table, validating the ordering invariant.
    ///
    /// # Errors
    ///
    /// Returns [`TierTableError`] when the list is empty, contains a zero
    /// quantity, or is not strictly ascending by quantity.
    pub fn new(rules: Vec<TierRule>) -> Result<Self, TierTableError> {
        let first = rules.first().ok_or(TierTableError::Empty)?;
        if first.quantity == 0 {
            return Err(TierTableError::ZeroQuantity);
        }
        for pair in rules.windows(2) {
            if let [previous, next] = pair
                && next.quantity <= previous.quantity
            {
                return Err(TierTableError::NotAscending {
                    previous: previous.quantity,
                    next: next.quantity,
                });
            }
        }
        Ok(Self { rules })
    }

    /// All rules, ascending by quantity.
    #[must_use]
    pub fn rules(&self) -> &[TierRule] {
        &self.rules
    }

    /// The smallest quantity that unlocks any discount.
    #[must_use]
    pub fn smallest_quantity(&self) -> u32 {
        self.rules.first().map_or(0, |rule| rule.quantity)
    }

    /// The highest configured tier.
    ///
    /// # Panics
    ///
    /// Never panics: the table is non-empty by construction.
    #[must_use]
    #[allow(clippy::missing_panics_doc)]
    pub fn max_rule(&self) -> &TierRule {
        self.rules.last().expect("tier table is non-empty")
    }

    /// The best rule unlocked by `quantity`: the highest tier whose
    /// threshold does not exceed it. `None` below the smallest tier.
    #[must_use]
    pub fn rule_for(&self, quantity: u32) -> Option<&TierRule> {
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.quantity <= quantity)
    }

    /// The next threshold above `quantity`, for "add N more" messaging.
    #[must_use]
    pub fn next_threshold(&self, quantity: u32) -> Option<u32> {
        self.rules
            .iter()
            .map(|rule| rule.quantity)
            .find(|threshold| *threshold > quantity)
    }
}

impl TryFrom<Vec<TierRule>> for TierTable {
    type Error = TierTableError;

    fn try_from(rules: Vec<TierRule>) -> Result<Self, Self::Error> {
        Self::new(rules)
    }
}

impl From<TierTable> for Vec<TierRule> {
    fn from(table: TierTable) -> Self {
        table.rules
    }
}

#[cfg(test)]
mod tests {
    use foltz_core::CurrencyCode;

    use super::*;

    fn ars(amount: i64) -> Price {
        Price::from_major(amount, CurrencyCode::ARS)
    }

    fn mystery_tiers() -> TierTable {
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
    fn test_empty_table_rejected() {
        assert_eq!(TierTable::new(vec![]), Err(TierTableError::Empty));
    }

    #[test]
    fn test_non_ascending_rejected() {
        let err = TierTable::new(vec![
            TierRule::new(3, ars(47700), "a"),
            TierRule::new(3, ars(55600), "b"),
        ])
        .expect_err("duplicate quantity must be rejected");
        assert_eq!(err, TierTableError::NotAscending {
            previous: 3,
            next: 3,
        });
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let err = TierTable::new(vec![TierRule::new(0, ars(100), "free?")])
            .expect_err("zero quantity must be rejected");
        assert_eq!(err, TierTableError::ZeroQuantity);
    }

    #[test]
    fn test_rule_selection() {
        let table = mystery_tiers();
        assert_eq!(table.smallest_quantity(), 1);
        assert_eq!(table.max_rule().quantity, 5);
        assert_eq!(table.rule_for(0), None);
        assert_eq!(table.rule_for(3).map(|r| r.quantity), Some(3));
        // Above the max tier the max rule still applies.
        assert_eq!(table.rule_for(9).map(|r| r.quantity), Some(5));
        assert_eq!(table.next_threshold(3), Some(4));
        assert_eq!(table.next_threshold(5), None);
    }

    #[test]
    fn test_per_unit_and_discount_percent() {
        let table = mystery_tiers();
        let top = table.max_rule();
        assert_eq!(top.price_per_unit(), ars(11900));
        // Normal box price is 34.900; 5 for 59.500 is a 65% discount floor.
        assert_eq!(top.discount_percent(ars(34900)), 65);
        // A tier that saves nothing reports 0.
        assert_eq!(TierRule::new(1, ars(34900), "x").discount_percent(ars(34900)), 0);
    }

    #[test]
    fn test_serde_rejects_invalid_table() {
        let json = r#"[
            {"quantity": 2, "total_price": {"amount": "39900", "currency_code": "ARS"}, "label": "dos"},
            {"quantity": 1, "total_price": {"amount": "23900", "currency_code": "ARS"}, "label": "una"}
        ]"#;
        let result: Result<TierTable, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
