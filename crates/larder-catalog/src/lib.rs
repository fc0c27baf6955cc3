//! Catalog domain types and listing logic for the Larder storefront.
//!
//! This crate provides the typed models the content store publishes and
//! the pure listing pipeline over them:
//!
//! - **Catalog**: products, summaries, categories, images, rich text
//! - **Money**: minor-unit prices, currencies, discount formatting
//! - **Listing**: source selection, filter predicates, sort comparators
//!
//! # Example
//!
//! ```rust,ignore
//! use larder_catalog::prelude::*;
//!
//! let filter = FilterState {
//!     on_sale_only: true,
//!     ..Default::default()
//! };
//! let visible = listing::compose("", Some(&catalog), None, &filter, SortKey::PriceLow);
//! ```

pub mod catalog;
pub mod ids;
pub mod listing;
pub mod money;

pub use catalog::{Category, CategoryRef, Product, ProductSummary, Slug};
pub use ids::{AssetId, CategoryId, ProductId};
pub use money::{Currency, FormattedPrice, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::catalog::{
        Block, Category, CategoryRef, Image, ImageAsset, ListKind, Mark, Product,
        ProductSummary, Slug, Span,
    };
    pub use crate::ids::{AssetId, CategoryId, ProductId};
    pub use crate::listing::{
        self, CategoryFilter, FilterState, ListingSource, SortKey, SourceKind, ViewMode,
    };
    pub use crate::money::{Currency, FormattedPrice, Money};
}
