//! Content store fetch layer for the Larder storefront.
//!
//! Translates named query classes into typed results from the headless
//! content store, with per-class cache lifetimes and in-flight request
//! de-duplication. All access is read-only against the CDN endpoint;
//! no mutation credentials exist in this layer.
//!
//! # Example
//!
//! ```rust,ignore
//! use larder_content::{ContentApi, ContentConfig};
//!
//! let api = ContentApi::from_env()?;
//! let products = api.all_products().await?;
//! let results = api.search_products("sourdough").await?;
//! ```

mod api;
mod cache;
mod client;
mod config;
mod error;
mod image_url;
mod query;

pub use api::{ContentApi, HealthStatus, HomepageData, MetadataCategory, ProductMetadata, ProductsPage};
pub use cache::{CacheStatus, QueryCache, SharedFetch};
pub use client::{query_url, ContentClient, ContentTransport};
pub use config::{ContentConfig, API_VERSION_VAR, DATASET_VAR, PROJECT_ID_VAR};
pub use error::{ContentError, ErrorReport};
pub use image_url::{
    lqip_url, product_image_url, responsive_image_urls, ImageFormat, ImageUrlBuilder,
    ResponsiveImageUrls,
};
pub use query::{CachePolicy, CatalogPageFilter, ContentQuery, QueryClass, QueryKey};

#[cfg(target_arch = "wasm32")]
pub use client::CdnTransport;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CatalogPageFilter, ContentApi, ContentConfig, ContentError, ContentQuery, ErrorReport,
        HomepageData, ProductsPage, QueryClass,
    };
}
