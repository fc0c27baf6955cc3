//! Typed query surface over the content store.
//!
//! One method per query class; every call is read-only and goes through
//! the caching client. Errors come back as [`ContentError`]; callers
//! decide whether and how to retry (nothing here does).

use crate::client::{ContentClient, ContentTransport};
use crate::error::ContentError;
use crate::query::{CatalogPageFilter, ContentQuery};
use chrono::{DateTime, Utc};
use larder_catalog::catalog::{Category, Image, Product, ProductSummary};
use larder_catalog::money::Currency;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Minimum characters before a search is sent to the store.
pub use larder_catalog::listing::MIN_SEARCH_TERM_LEN;

/// A page of products with the total match count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductsPage {
    pub products: Vec<ProductSummary>,
    pub total: i64,
}

/// Homepage aggregate: one round trip for the landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageData {
    pub featured_products: Vec<ProductSummary>,
    pub categories: Vec<Category>,
    pub sale_products: Vec<ProductSummary>,
}

/// Product metadata for page titles and social cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMetadata {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub main_image: Option<Image>,
    pub price: i64,
    #[serde(default)]
    pub sale_price: Option<i64>,
    pub currency: Currency,
    pub in_stock: bool,
    #[serde(default)]
    pub category: Option<MetadataCategory>,
    pub published_at: DateTime<Utc>,
}

/// Category title projection inside metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataCategory {
    pub title: String,
}

/// Result of the connectivity probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub ok: bool,
    pub message: String,
}

/// The typed content API.
pub struct ContentApi {
    client: ContentClient,
}

impl ContentApi {
    /// Build over an arbitrary transport (tests inject fakes here).
    pub fn new(transport: Rc<dyn ContentTransport>) -> Self {
        Self {
            client: ContentClient::new(transport),
        }
    }

    /// Build from environment configuration over the CDN transport.
    /// Fails fast when the project id is absent.
    #[cfg(target_arch = "wasm32")]
    pub fn from_env() -> Result<Self, ContentError> {
        let config = crate::config::ContentConfig::from_env()?;
        Ok(Self::new(Rc::new(crate::client::CdnTransport::new(config))))
    }

    /// All products, newest first.
    pub async fn all_products(&self) -> Result<Vec<ProductSummary>, ContentError> {
        self.client.fetch(ContentQuery::all_products()).await
    }

    /// Featured products for the homepage.
    pub async fn featured_products(&self) -> Result<Vec<ProductSummary>, ContentError> {
        self.client.fetch(ContentQuery::featured_products()).await
    }

    /// A page of products with total count.
    pub async fn products_page(
        &self,
        page: i64,
        per_page: i64,
    ) -> Result<ProductsPage, ContentError> {
        self.client
            .fetch(ContentQuery::products_page(page, per_page))
            .await
    }

    /// A single product by slug, `None` when unpublished or absent.
    pub async fn product_by_slug(&self, slug: &str) -> Result<Option<Product>, ContentError> {
        self.client.fetch(ContentQuery::product_by_slug(slug)).await
    }

    /// Products in a category, by category slug.
    pub async fn products_by_category(
        &self,
        category_slug: &str,
    ) -> Result<Vec<ProductSummary>, ContentError> {
        self.client
            .fetch(ContentQuery::products_by_category(category_slug))
            .await
    }

    /// Search products. Terms under the minimum length return empty
    /// without touching the store.
    pub async fn search_products(&self, term: &str) -> Result<Vec<ProductSummary>, ContentError> {
        if term.chars().count() < MIN_SEARCH_TERM_LEN {
            return Ok(Vec::new());
        }
        self.client.fetch(ContentQuery::search(term)).await
    }

    /// Products with a valid sale price.
    pub async fn sale_products(&self) -> Result<Vec<ProductSummary>, ContentError> {
        self.client.fetch(ContentQuery::sale_products()).await
    }

    /// Same-category products, excluding the current one.
    pub async fn related_products(
        &self,
        category_id: &str,
        current_product_id: &str,
    ) -> Result<Vec<ProductSummary>, ContentError> {
        self.client
            .fetch(ContentQuery::related_products(category_id, current_product_id))
            .await
    }

    /// All categories, alphabetical.
    pub async fn categories(&self) -> Result<Vec<Category>, ContentError> {
        self.client.fetch(ContentQuery::categories()).await
    }

    /// A single category by slug.
    pub async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>, ContentError> {
        self.client.fetch(ContentQuery::category_by_slug(slug)).await
    }

    /// Product slugs for static generation.
    pub async fn product_paths(&self) -> Result<Vec<String>, ContentError> {
        self.client.fetch(ContentQuery::product_paths()).await
    }

    /// Category slugs for static generation.
    pub async fn category_paths(&self) -> Result<Vec<String>, ContentError> {
        self.client.fetch(ContentQuery::category_paths()).await
    }

    /// Server-filtered product page (price range, stock, category).
    pub async fn filtered_products(
        &self,
        filter: &CatalogPageFilter,
    ) -> Result<ProductsPage, ContentError> {
        self.client
            .fetch(ContentQuery::filtered_products(filter))
            .await
    }

    /// Homepage aggregate.
    pub async fn homepage(&self) -> Result<HomepageData, ContentError> {
        self.client.fetch(ContentQuery::homepage()).await
    }

    /// Metadata for a product page.
    pub async fn product_metadata(
        &self,
        slug: &str,
    ) -> Result<Option<ProductMetadata>, ContentError> {
        self.client.fetch(ContentQuery::product_metadata(slug)).await
    }

    /// Probe the store connection.
    pub async fn health_check(&self) -> HealthStatus {
        match self
            .client
            .fetch_value(ContentQuery::health())
            .await
        {
            Ok(_) => HealthStatus {
                ok: true,
                message: "content store connection is healthy".to_string(),
            },
            Err(error) => HealthStatus {
                ok: false,
                message: format!("content store connection failed: {}", error),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::executor::block_on;
    use serde_json::{json, Value};
    use std::cell::Cell;

    struct CannedTransport {
        calls: Cell<u32>,
        payload: Value,
    }

    #[async_trait(?Send)]
    impl ContentTransport for CannedTransport {
        async fn execute(&self, _query: &ContentQuery) -> Result<Value, ContentError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.payload.clone())
        }
    }

    fn api_with(payload: Value) -> (Rc<CannedTransport>, ContentApi) {
        let transport = Rc::new(CannedTransport {
            calls: Cell::new(0),
            payload,
        });
        let shared: Rc<dyn ContentTransport> = transport.clone();
        (transport, ContentApi::new(shared))
    }

    fn summary_json(id: &str) -> Value {
        json!({
            "_id": id,
            "title": "Sourdough Boule",
            "slug": {"current": "sourdough-boule"},
            "mainImage": {
                "asset": {
                    "_id": "image-1",
                    "url": "https://cdn.example.com/1.jpg",
                    "metadata": {"dimensions": {"width": 800, "height": 800}}
                }
            },
            "price": 850,
            "currency": "USD",
            "inStock": true,
            "featured": false,
            "publishedAt": "2025-04-01T08:00:00Z"
        })
    }

    #[test]
    fn test_all_products_decodes_summaries() {
        let (_t, api) = api_with(json!([summary_json("prod-1"), summary_json("prod-2")]));
        let products = block_on(api.all_products()).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id.as_str(), "prod-1");
    }

    #[test]
    fn test_short_search_term_skips_network() {
        let (transport, api) = api_with(json!([]));
        let results = block_on(api.search_products("a")).unwrap();
        assert!(results.is_empty());
        assert_eq!(transport.calls.get(), 0);

        block_on(api.search_products("ab")).unwrap();
        assert_eq!(transport.calls.get(), 1);
    }

    #[test]
    fn test_homepage_decodes_aggregate() {
        let (_t, api) = api_with(json!({
            "featuredProducts": [summary_json("prod-1")],
            "categories": [{
                "_id": "cat-1",
                "title": "Bread",
                "slug": {"current": "bread"}
            }],
            "saleProducts": []
        }));
        let homepage = block_on(api.homepage()).unwrap();
        assert_eq!(homepage.featured_products.len(), 1);
        assert_eq!(homepage.categories[0].title, "Bread");
        assert!(homepage.sale_products.is_empty());
    }

    #[test]
    fn test_health_check_reports_failure() {
        struct FailingTransport;

        #[async_trait(?Send)]
        impl ContentTransport for FailingTransport {
            async fn execute(&self, _query: &ContentQuery) -> Result<Value, ContentError> {
                Err(ContentError::Transport("refused".to_string()))
            }
        }

        let api = ContentApi::new(Rc::new(FailingTransport));
        let status = block_on(api.health_check());
        assert!(!status.ok);
        assert!(status.message.contains("refused"));
    }
}
