//! Cart partitioner: splits line items into disjoint category buckets.
//!
//! Classification is by slug prefix (e.g. everything under `mystery-box-` is
//! a Mystery Box; everything else is a regular jersey). The partition is
//! complete and order-preserving: every input item lands in exactly one
//! bucket, and items keep their cart order within a bucket.

use serde::{Deserialize, Serialize};

use foltz_core::LineItem;

/// A promotion category name (e.g. `mystery-box`, `regular`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Create a category name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The category name as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// How items are matched into a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMatcher {
    /// Category this matcher feeds.
    pub category: Category,
    /// Slug prefix to match; `None` is the catch-all bucket.
    pub slug_prefix: Option<String>,
}

impl CategoryMatcher {
    /// A prefix matcher: items whose slug starts with `prefix`.
    #[must_use]
    pub fn slug_prefix(category: Category, prefix: impl Into<String>) -> Self {
        Self {
            category,
            slug_prefix: Some(prefix.into()),
        }
    }

    /// The catch-all matcher for items no other matcher claims.
    #[must_use]
    pub const fn catch_all(category: Category) -> Self {
        Self {
            category,
            slug_prefix: None,
        }
    }

    /// Whether this matcher claims the item.
    #[must_use]
    pub fn matches(&self, item: &LineItem) -> bool {
        self.slug_prefix
            .as_ref()
            .is_none_or(|prefix| item.slug.starts_with(prefix.as_str()))
    }
}

/// One category's slice of the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub category: Category,
    pub items: Vec<LineItem>,
}

impl Bucket {
    /// Sum of quantities across the bucket's items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(LineItem::quantity).sum()
    }
}

/// Partition `items` across `matchers`, first match wins.
///
/// Every matcher yields a bucket, empty or not, in matcher order. Items no
/// prefix matcher claims go to the first catch-all matcher; quoting always
/// supplies a catch-all, so in practice nothing is skipped.
#[must_use]
pub fn partition(items: &[LineItem], matchers: &[CategoryMatcher]) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = matchers
        .iter()
        .map(|matcher| Bucket {
            category: matcher.category.clone(),
            items: Vec::new(),
        })
        .collect();

    for item in items {
        let Some(index) = matchers.iter().position(|matcher| matcher.matches(item)) else {
            tracing::warn!(slug = %item.slug, "No category matcher for item; skipping");
            continue;
        };
        if let Some(bucket) = buckets.get_mut(index) {
            bucket.items.push(item.clone());
        }
    }

    buckets
}
