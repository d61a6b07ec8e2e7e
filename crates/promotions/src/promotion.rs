//! Promotion configuration and quoting.
//!
//! A [`Promotion`] ties category matchers to discount schedules and owns the
//! flat shipping fee. Configurations are serde-loadable so promo tables can
//! live in config instead of being scattered across UI contexts.

use serde::{Deserialize, Serialize};

use foltz_core::{CurrencyCode, LineItem, Price};

use crate::calculator::{DiscountSchedule, price_bucket};
use crate::partition::{Category, CategoryMatcher, partition};
use crate::totals::{PromotionTotals, aggregate};

/// One category's matcher plus its (optional) discount schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Category name surfaced in bucket totals.
    pub category: Category,
    /// Slug prefix claiming items for this category; `None` is the catch-all.
    pub slug_prefix: Option<String>,
    /// Discount applied to the category; `None` means normal pricing.
    pub schedule: Option<DiscountSchedule>,
}

impl CategoryRule {
    /// A prefix-matched category with a discount schedule.
    #[must_use]
    pub fn with_prefix(
        category: Category,
        prefix: impl Into<String>,
        schedule: DiscountSchedule,
    ) -> Self {
        Self {
            category,
            slug_prefix: Some(prefix.into()),
            schedule: Some(schedule),
        }
    }

    /// The catch-all category, optionally discounted.
    #[must_use]
    pub const fn catch_all(category: Category, schedule: Option<DiscountSchedule>) -> Self {
        Self {
            category,
            slug_prefix: None,
            schedule,
        }
    }

    fn matcher(&self) -> CategoryMatcher {
        CategoryMatcher {
            category: self.category.clone(),
            slug_prefix: self.slug_prefix.clone(),
        }
    }
}

/// A configured promotion: how the cart is partitioned and priced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promotion {
    /// Display name (e.g. "Pack Black").
    pub name: String,
    /// Disabled promotions quote normal pricing.
    pub enabled: bool,
    /// Store currency for all schedule prices.
    pub currency: CurrencyCode,
    /// Flat shipping fee added to the discounted subtotal.
    pub shipping_fee: Price,
    /// Category rules, first match wins. Quoting appends a normal-priced
    /// catch-all when none is configured, so the partition never loses
    /// items regardless of how the promotion was built.
    pub rules: Vec<CategoryRule>,
}

impl Promotion {
    /// Create an enabled promotion. A catch-all rule is appended when the
    /// configuration forgot one, so every item is always priced.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        currency: CurrencyCode,
        shipping_fee: Price,
        mut rules: Vec<CategoryRule>,
    ) -> Self {
        if rules.iter().all(|rule| rule.slug_prefix.is_some()) {
            rules.push(CategoryRule::catch_all(Category::new("regular"), None));
        }
        Self {
            name: name.into(),
            enabled: true,
            currency,
            shipping_fee,
            rules,
        }
    }

    /// Quote a cart snapshot under this promotion.
    ///
    /// Pure and idempotent: the same snapshot always yields the same totals.
    /// An empty cart yields all-zero totals plus the shipping fee; a
    /// disabled promotion prices every bucket normally. Promotions missing
    /// a catch-all rule (possible via deserialization or field access) get
    /// a synthetic normal-priced one, so no item ever drops out of the
    /// totals.
    #[must_use]
    pub fn quote(&self, items: &[LineItem]) -> PromotionTotals {
        if items.is_empty() {
            return PromotionTotals::empty(self.currency, self.shipping_fee);
        }

        let fallback = self
            .rules
            .iter()
            .all(|rule| rule.slug_prefix.is_some())
            .then(|| CategoryRule::catch_all(Category::new("regular"), None));
        let rules = self.rules.iter().chain(fallback.as_ref());

        let matchers: Vec<CategoryMatcher> =
            rules.clone().map(CategoryRule::matcher).collect();
        let buckets = partition(items, &matchers);

        let priced = buckets
            .into_iter()
            .zip(rules)
            .map(|(bucket, rule)| {
                let schedule = if self.enabled {
                    rule.schedule.as_ref()
                } else {
                    None
                };
                price_bucket(bucket.category, &bucket.items, schedule, self.currency)
            })
            .collect();

        let totals = aggregate(priced, self.shipping_fee, self.currency);
        tracing::debug!(
            promotion = %self.name,
            item_count = totals.item_count,
            has_discount = totals.has_discount,
            "Quoted cart"
        );
        totals
    }
}
