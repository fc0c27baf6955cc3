//! Sort comparators for the listing.

use crate::catalog::ProductSummary;
use std::cmp::Ordering;

/// Sort options for the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Newest first (default).
    #[default]
    Newest,
    /// Oldest first.
    Oldest,
    /// Effective price, low to high.
    PriceLow,
    /// Effective price, high to low.
    PriceHigh,
    /// Title A-Z.
    NameAz,
    /// Title Z-A.
    NameZa,
}

impl SortKey {
    pub fn from_str(s: &str) -> Self {
        match s {
            "oldest" => SortKey::Oldest,
            "price-low" => SortKey::PriceLow,
            "price-high" => SortKey::PriceHigh,
            "name-az" => SortKey::NameAz,
            "name-za" => SortKey::NameZa,
            _ => SortKey::Newest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::NameAz => "name-az",
            SortKey::NameZa => "name-za",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Newest => "Newest First",
            SortKey::Oldest => "Oldest First",
            SortKey::PriceLow => "Price: Low to High",
            SortKey::PriceHigh => "Price: High to Low",
            SortKey::NameAz => "Name: A to Z",
            SortKey::NameZa => "Name: Z to A",
        }
    }

    /// Every key, in menu order.
    pub fn all() -> [SortKey; 6] {
        [
            SortKey::Newest,
            SortKey::Oldest,
            SortKey::PriceLow,
            SortKey::PriceHigh,
            SortKey::NameAz,
            SortKey::NameZa,
        ]
    }

    fn compare(&self, a: &ProductSummary, b: &ProductSummary) -> Ordering {
        match self {
            SortKey::Newest => b.published_at.cmp(&a.published_at),
            SortKey::Oldest => a.published_at.cmp(&b.published_at),
            SortKey::PriceLow => a.effective_price_cents().cmp(&b.effective_price_cents()),
            SortKey::PriceHigh => b.effective_price_cents().cmp(&a.effective_price_cents()),
            SortKey::NameAz => caseless(&a.title).cmp(&caseless(&b.title)),
            SortKey::NameZa => caseless(&b.title).cmp(&caseless(&a.title)),
        }
    }
}

/// Caseless collation key. Unicode lowercasing stands in for full
/// locale-aware collation; ties between equal keys keep original order.
fn caseless(title: &str) -> String {
    title.to_lowercase()
}

/// Sort the listing in place. `sort_by` is a stable sort, so items with
/// equal keys keep their relative order from the working set.
pub fn sort_listing(items: &mut [&ProductSummary], key: SortKey) {
    items.sort_by(|a, b| key.compare(a, b));
}
