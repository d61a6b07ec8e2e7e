//! Type-safe price representation using decimal arithmetic.
//!
//! Store prices are whole Argentine pesos (e.g. `36900` for ARS 36.900), so
//! amounts are kept in the currency's major unit as a [`Decimal`]. Arithmetic
//! keeps the left-hand operand's currency; callers are expected to enforce
//! currency uniformity at the cart-mutation boundary before doing math.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's major unit (e.g., pesos, not centavos).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price from a whole number of major units.
    #[must_use]
    pub fn from_major(amount: i64, currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::from(amount), currency_code)
    }

    /// The zero price in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Whether the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Subtract, clamping at zero instead of going negative.
    #[must_use]
    pub fn saturating_sub(self, rhs: Self) -> Self {
        if rhs.amount >= self.amount {
            Self::zero(self.currency_code)
        } else {
            Self::new(self.amount - rhs.amount, self.currency_code)
        }
    }

    /// Format for display (e.g., "$59900").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{}", self.currency_code.symbol(), self.amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        debug_assert_eq!(self.currency_code, rhs.currency_code);
        Self::new(self.amount + rhs.amount, self.currency_code)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        debug_assert_eq!(self.currency_code, rhs.currency_code);
        self.amount += rhs.amount;
    }
}

impl Sub for Price {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        debug_assert_eq!(self.currency_code, rhs.currency_code);
        Self::new(self.amount - rhs.amount, self.currency_code)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        Self::new(self.amount * Decimal::from(rhs), self.currency_code)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.reduce(Add::add)
            .unwrap_or_else(|| Self::zero(CurrencyCode::default()))
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    ARS,
    USD,
    EUR,
    BRL,
}

impl CurrencyCode {
    /// The currency symbol used for display.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::ARS | Self::USD => "$",
            Self::EUR => "€",
            Self::BRL => "R$",
        }
    }

    /// The ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ARS => "ARS",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::BRL => "BRL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_arithmetic() {
        let a = Price::from_major(36900, CurrencyCode::ARS);
        let b = Price::from_major(23900, CurrencyCode::ARS);

        assert_eq!((a + b).amount, Decimal::from(60800));
        assert_eq!((a - b).amount, Decimal::from(13000));
        assert_eq!((a * 3).amount, Decimal::from(110_700));
    }

    #[test]
    fn test_saturating_sub_clamps_at_zero() {
        let small = Price::from_major(100, CurrencyCode::ARS);
        let big = Price::from_major(500, CurrencyCode::ARS);

        assert!(small.saturating_sub(big).is_zero());
        assert_eq!(big.saturating_sub(small).amount, Decimal::from(400));
    }

    #[test]
    fn test_sum_of_empty_iterator_is_zero() {
        let total: Price = std::iter::empty().sum();
        assert!(total.is_zero());
    }

    #[test]
    fn test_display() {
        let price = Price::from_major(59900, CurrencyCode::ARS);
        assert_eq!(price.display(), "$59900");
    }
}
