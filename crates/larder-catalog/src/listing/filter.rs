//! Listing source selection and filter predicates.

use crate::catalog::ProductSummary;
use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// Minimum search term length (in characters) before the search source
/// is consulted at all.
pub const MIN_SEARCH_TERM_LEN: usize = 2;

/// Which upstream set feeds the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    /// The full catalog.
    Catalog,
    /// Results for the active search term.
    SearchResults,
}

impl SourceKind {
    /// Choose the source for a debounced term. Pure function of the
    /// term's character count; anything under the minimum falls back to
    /// the catalog.
    pub fn for_term(term: &str) -> Self {
        if term.chars().count() >= MIN_SEARCH_TERM_LEN {
            SourceKind::SearchResults
        } else {
            SourceKind::Catalog
        }
    }
}

/// The selected working set, tagged with its origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListingSource<'a> {
    Catalog(&'a [ProductSummary]),
    SearchResults(&'a [ProductSummary]),
}

impl<'a> ListingSource<'a> {
    /// Select the working set for a term. A source that has not loaded
    /// yet yields an empty working set, never the other source.
    pub fn select(
        term: &str,
        catalog: Option<&'a [ProductSummary]>,
        search: Option<&'a [ProductSummary]>,
    ) -> Self {
        match SourceKind::for_term(term) {
            SourceKind::Catalog => ListingSource::Catalog(catalog.unwrap_or(&[])),
            SourceKind::SearchResults => ListingSource::SearchResults(search.unwrap_or(&[])),
        }
    }

    /// The items in the working set.
    pub fn items(&self) -> &'a [ProductSummary] {
        match self {
            ListingSource::Catalog(items) => items,
            ListingSource::SearchResults(items) => items,
        }
    }

    /// The origin tag.
    pub fn kind(&self) -> SourceKind {
        match self {
            ListingSource::Catalog(_) => SourceKind::Catalog,
            ListingSource::SearchResults(_) => SourceKind::SearchResults,
        }
    }
}

/// Category selection. `All` is a sentinel variant, not a category id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(CategoryId),
}

impl CategoryFilter {
    /// Whether a product's category passes this filter. Products without
    /// a category pass only under `All`.
    pub fn matches(&self, product: &ProductSummary) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(id) => product
                .category
                .as_ref()
                .map(|c| &c.id == id)
                .unwrap_or(false),
        }
    }

    /// The selected id, unless `All`.
    pub fn selected_id(&self) -> Option<&CategoryId> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(id) => Some(id),
        }
    }
}

/// Listing view mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn from_str(s: &str) -> Self {
        match s {
            "list" => ViewMode::List,
            _ => ViewMode::Grid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }
}

/// The user's current predicate set. Ephemeral; lives only as long as
/// the listing session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub in_stock_only: bool,
    pub on_sale_only: bool,
}

impl FilterState {
    /// Whether a single product survives every enabled predicate.
    pub fn retains(&self, product: &ProductSummary) -> bool {
        if !self.category.matches(product) {
            return false;
        }
        if self.in_stock_only && !product.in_stock {
            return false;
        }
        if self.on_sale_only && !product.is_on_sale() {
            return false;
        }
        true
    }

    /// Whether any predicate deviates from the default.
    pub fn is_active(&self) -> bool {
        self.category != CategoryFilter::All || self.in_stock_only || self.on_sale_only
    }

    /// Reset every predicate.
    pub fn clear(&mut self) {
        *self = FilterState::default();
    }
}

/// Retain the items that pass every enabled predicate, preserving order.
pub fn apply_filters<'a>(
    items: &'a [ProductSummary],
    filter: &FilterState,
) -> Vec<&'a ProductSummary> {
    items.iter().filter(|p| filter.retains(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CategoryRef, Slug};
    use crate::money::Currency;

    fn summary(
        id: &str,
        category: Option<&str>,
        in_stock: bool,
        sale: Option<i64>,
    ) -> ProductSummary {
        use crate::catalog::{Dimensions, Image, ImageAsset, ImageMetadata};
        use crate::ids::AssetId;

        ProductSummary {
            id: id.into(),
            title: id.to_string(),
            slug: Slug::new(id),
            main_image: Image {
                asset: ImageAsset {
                    id: AssetId::new("image-1"),
                    url: String::new(),
                    metadata: ImageMetadata {
                        dimensions: Dimensions {
                            width: 1,
                            height: 1,
                        },
                        lqip: None,
                    },
                },
                alt: None,
                caption: None,
                hotspot: None,
                crop: None,
            },
            price: 500,
            sale_price: sale,
            currency: Currency::USD,
            in_stock,
            featured: false,
            published_at: "2025-01-01T00:00:00Z".parse().unwrap(),
            category: category.map(|c| CategoryRef {
                id: c.into(),
                title: c.to_string(),
                slug: Slug::new(c),
            }),
        }
    }

    #[test]
    fn test_source_kind_threshold() {
        assert_eq!(SourceKind::for_term(""), SourceKind::Catalog);
        assert_eq!(SourceKind::for_term("a"), SourceKind::Catalog);
        assert_eq!(SourceKind::for_term("ab"), SourceKind::SearchResults);
        assert_eq!(SourceKind::for_term("honey"), SourceKind::SearchResults);
        // Character count, not byte count.
        assert_eq!(SourceKind::for_term("\u{00e9}"), SourceKind::Catalog);
    }

    #[test]
    fn test_select_unloaded_source_is_empty() {
        let catalog = vec![summary("a", None, true, None)];
        let source = ListingSource::select("bread", Some(&catalog), None);
        assert_eq!(source.kind(), SourceKind::SearchResults);
        assert!(source.items().is_empty());

        let source = ListingSource::select("b", None, None);
        assert_eq!(source.kind(), SourceKind::Catalog);
        assert!(source.items().is_empty());
    }

    #[test]
    fn test_select_prefers_catalog_below_threshold() {
        let catalog = vec![summary("a", None, true, None)];
        let search = vec![summary("b", None, true, None)];
        let source = ListingSource::select("x", Some(&catalog), Some(&search));
        assert_eq!(source.kind(), SourceKind::Catalog);
        assert_eq!(source.items().len(), 1);
        assert_eq!(source.items()[0].id.as_str(), "a");
    }

    #[test]
    fn test_category_filter() {
        let items = vec![
            summary("a", Some("cat-1"), true, None),
            summary("b", Some("cat-2"), true, None),
            summary("c", None, true, None),
        ];
        let filter = FilterState {
            category: CategoryFilter::Only("cat-1".into()),
            ..Default::default()
        };
        let out = apply_filters(&items, &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id.as_str(), "a");

        // All passes everything, including uncategorized items.
        let out = apply_filters(&items, &FilterState::default());
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_stock_filter() {
        let items = vec![
            summary("a", None, true, None),
            summary("b", None, false, None),
        ];
        let filter = FilterState {
            in_stock_only: true,
            ..Default::default()
        };
        let out = apply_filters(&items, &filter);
        assert!(out.iter().all(|p| p.in_stock));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_sale_filter_enforces_invariant() {
        let items = vec![
            summary("valid", None, true, Some(400)),
            summary("equal", None, true, Some(500)),
            summary("above", None, true, Some(600)),
            summary("none", None, true, None),
        ];
        let filter = FilterState {
            on_sale_only: true,
            ..Default::default()
        };
        let out = apply_filters(&items, &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id.as_str(), "valid");
    }

    #[test]
    fn test_is_active_and_clear() {
        let mut filter = FilterState {
            in_stock_only: true,
            ..Default::default()
        };
        assert!(filter.is_active());
        filter.clear();
        assert!(!filter.is_active());
    }
}
