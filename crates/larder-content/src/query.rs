//! Named query classes and their GROQ text.
//!
//! Every read the storefront performs is one of these classes. A class
//! carries its cache policy; the query couples the class with concrete
//! parameters and yields a structured cache key, so callers never build
//! cache keys out of interpolated strings.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::time::Duration;

/// Base image projection for consistent image data.
const IMAGE_PROJECTION: &str = r#"{
  _type,
  asset->{
    _id,
    url,
    metadata {
      dimensions,
      lqip
    }
  },
  alt,
  caption,
  hotspot,
  crop
}"#;

/// Base category projection.
const CATEGORY_PROJECTION: &str = r#"{
  _id,
  title,
  slug,
  description,
  image IMG
}"#;

/// Minimal product projection for listings.
const PRODUCT_SUMMARY_PROJECTION: &str = r#"{
  _id,
  title,
  slug,
  mainImage IMG,
  price,
  salePrice,
  currency,
  inStock,
  featured,
  publishedAt,
  category->{_id, title, slug}
}"#;

/// Full product projection for detail pages.
const PRODUCT_DETAIL_PROJECTION: &str = r#"{
  _id,
  title,
  slug,
  description,
  mainImage IMG,
  galleryImages[] IMG,
  price,
  salePrice,
  currency,
  category-> CAT,
  tags,
  inStock,
  featured,
  publishedAt
}"#;

const PUBLISHED: &str = r#"!(_id in path("drafts.**"))"#;

fn category_projection() -> String {
    CATEGORY_PROJECTION.replace("IMG", IMAGE_PROJECTION)
}

fn summary_projection() -> String {
    PRODUCT_SUMMARY_PROJECTION.replace("IMG", IMAGE_PROJECTION)
}

fn detail_projection() -> String {
    PRODUCT_DETAIL_PROJECTION
        .replace("CAT", &category_projection())
        .replace("IMG", IMAGE_PROJECTION)
}

/// Caching behavior for a query class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Serve cached results for the lifetime.
    Cached(Duration),
    /// No timed caching; concurrent identical requests still collapse
    /// within the de-duplication window.
    Fresh { dedup: Duration },
}

impl CachePolicy {
    /// How long a completed result stays in the request cache.
    pub fn entry_ttl(&self) -> Duration {
        match self {
            CachePolicy::Cached(ttl) => *ttl,
            CachePolicy::Fresh { dedup } => *dedup,
        }
    }

    /// Whether results may be served from timed cache.
    pub fn allows_timed_cache(&self) -> bool {
        matches!(self, CachePolicy::Cached(_))
    }
}

/// Well-known read operations against the content store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryClass {
    AllProducts,
    FeaturedProducts,
    ProductsPage,
    ProductBySlug,
    ProductsByCategory,
    Search,
    SaleProducts,
    RelatedProducts,
    Categories,
    CategoryBySlug,
    ProductPaths,
    CategoryPaths,
    FilteredProducts,
    Homepage,
    ProductMetadata,
    Health,
}

impl QueryClass {
    /// Stable name used in cache keys and logs.
    pub fn name(&self) -> &'static str {
        match self {
            QueryClass::AllProducts => "all-products",
            QueryClass::FeaturedProducts => "featured-products",
            QueryClass::ProductsPage => "products-page",
            QueryClass::ProductBySlug => "product-by-slug",
            QueryClass::ProductsByCategory => "products-by-category",
            QueryClass::Search => "search",
            QueryClass::SaleProducts => "sale-products",
            QueryClass::RelatedProducts => "related-products",
            QueryClass::Categories => "categories",
            QueryClass::CategoryBySlug => "category-by-slug",
            QueryClass::ProductPaths => "product-paths",
            QueryClass::CategoryPaths => "category-paths",
            QueryClass::FilteredProducts => "filtered-products",
            QueryClass::Homepage => "homepage",
            QueryClass::ProductMetadata => "product-metadata",
            QueryClass::Health => "health",
        }
    }

    /// The cache policy for this class.
    ///
    /// Stable catalog reads get minutes; filtered pages turn over faster;
    /// path lists barely change. Search must reflect the latest term, so
    /// it only gets the de-duplication window.
    pub fn cache_policy(&self) -> CachePolicy {
        match self {
            QueryClass::Search | QueryClass::Health => CachePolicy::Fresh {
                dedup: Duration::from_secs(1),
            },
            QueryClass::FeaturedProducts
            | QueryClass::Categories
            | QueryClass::Homepage
            | QueryClass::ProductMetadata => CachePolicy::Cached(Duration::from_secs(600)),
            QueryClass::FilteredProducts => CachePolicy::Cached(Duration::from_secs(180)),
            QueryClass::ProductPaths | QueryClass::CategoryPaths => {
                CachePolicy::Cached(Duration::from_secs(3600))
            }
            _ => CachePolicy::Cached(Duration::from_secs(300)),
        }
    }
}

impl fmt::Display for QueryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Structured cache key: query class plus a stable parameter hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    class: &'static str,
    params_hash: u64,
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:x}", self.class, self.params_hash)
    }
}

/// Parameters for the filtered products query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogPageFilter {
    /// Minimum price in minor units.
    pub min_price: Option<i64>,
    /// Maximum price in minor units.
    pub max_price: Option<i64>,
    pub in_stock_only: bool,
    pub category_id: Option<String>,
    /// 1-indexed page.
    pub page: i64,
    pub per_page: i64,
}

impl CatalogPageFilter {
    pub fn new() -> Self {
        Self {
            page: 1,
            per_page: 12,
            ..Default::default()
        }
    }
}

/// A named query with concrete parameters, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentQuery {
    pub class: QueryClass,
    pub groq: String,
    /// `$name` parameters. A `BTreeMap` keeps the encoding and the cache
    /// key stable regardless of construction order.
    pub params: BTreeMap<String, Value>,
}

impl ContentQuery {
    fn new(class: QueryClass, groq: String) -> Self {
        Self {
            class,
            groq,
            params: BTreeMap::new(),
        }
    }

    fn param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    /// All products, newest first.
    pub fn all_products() -> Self {
        Self::new(
            QueryClass::AllProducts,
            format!(
                r#"*[_type == "product" && {}] | order(publishedAt desc) {}"#,
                PUBLISHED,
                summary_projection()
            ),
        )
    }

    /// Featured products for the homepage, capped at eight.
    pub fn featured_products() -> Self {
        Self::new(
            QueryClass::FeaturedProducts,
            format!(
                r#"*[_type == "product" && featured == true && {}] | order(publishedAt desc) [0...8] {}"#,
                PUBLISHED,
                summary_projection()
            ),
        )
    }

    /// A page of products with the total count.
    pub fn products_page(page: i64, per_page: i64) -> Self {
        let page = page.max(1);
        let per_page = per_page.clamp(1, 100);
        let start = (page - 1) * per_page;
        Self::new(
            QueryClass::ProductsPage,
            format!(
                r#"{{
  "products": *[_type == "product" && {published}] | order(publishedAt desc) [$start...$end] {proj},
  "total": count(*[_type == "product" && {published}])
}}"#,
                published = PUBLISHED,
                proj = summary_projection()
            ),
        )
        .param("start", start)
        .param("end", start + per_page)
    }

    /// A single product by slug.
    pub fn product_by_slug(slug: &str) -> Self {
        Self::new(
            QueryClass::ProductBySlug,
            format!(
                r#"*[_type == "product" && slug.current == $slug && {}][0] {}"#,
                PUBLISHED,
                detail_projection()
            ),
        )
        .param("slug", slug)
    }

    /// Products within a category, by category slug.
    pub fn products_by_category(category_slug: &str) -> Self {
        Self::new(
            QueryClass::ProductsByCategory,
            format!(
                r#"*[_type == "product" && category->slug.current == $categorySlug && {}] | order(publishedAt desc) {}"#,
                PUBLISHED,
                summary_projection()
            ),
        )
        .param("categorySlug", category_slug)
    }

    /// Full-text search across title, description, and category title.
    /// The term is lowercased so equivalent searches share a cache key.
    pub fn search(term: &str) -> Self {
        Self::new(
            QueryClass::Search,
            format!(
                r#"*[_type == "product" && {} && (
  title match $term + "*" ||
  pt::text(description) match $term + "*" ||
  category->title match $term + "*"
)] | order(publishedAt desc) {}"#,
                PUBLISHED,
                summary_projection()
            ),
        )
        .param("term", term.to_lowercase())
    }

    /// Products with a valid sale price.
    pub fn sale_products() -> Self {
        Self::new(
            QueryClass::SaleProducts,
            format!(
                r#"*[_type == "product" && defined(salePrice) && salePrice < price && {}] | order(publishedAt desc) {}"#,
                PUBLISHED,
                summary_projection()
            ),
        )
    }

    /// Same-category products, excluding the current one, capped at four.
    pub fn related_products(category_id: &str, current_product_id: &str) -> Self {
        Self::new(
            QueryClass::RelatedProducts,
            format!(
                r#"*[_type == "product" && category._ref == $categoryId && _id != $currentProductId && {}] | order(publishedAt desc) [0...4] {}"#,
                PUBLISHED,
                summary_projection()
            ),
        )
        .param("categoryId", category_id)
        .param("currentProductId", current_product_id)
    }

    /// All categories, alphabetical.
    pub fn categories() -> Self {
        Self::new(
            QueryClass::Categories,
            format!(
                r#"*[_type == "category" && {}] | order(title asc) {}"#,
                PUBLISHED,
                category_projection()
            ),
        )
    }

    /// A single category by slug.
    pub fn category_by_slug(slug: &str) -> Self {
        Self::new(
            QueryClass::CategoryBySlug,
            format!(
                r#"*[_type == "category" && slug.current == $slug && {}][0] {}"#,
                PUBLISHED,
                category_projection()
            ),
        )
        .param("slug", slug)
    }

    /// Product slugs for static generation.
    pub fn product_paths() -> Self {
        Self::new(
            QueryClass::ProductPaths,
            format!(
                r#"*[_type == "product" && defined(slug.current) && {}][].slug.current"#,
                PUBLISHED
            ),
        )
    }

    /// Category slugs for static generation.
    pub fn category_paths() -> Self {
        Self::new(
            QueryClass::CategoryPaths,
            format!(
                r#"*[_type == "category" && defined(slug.current) && {}][].slug.current"#,
                PUBLISHED
            ),
        )
    }

    /// A filtered, paginated product page with its total count.
    pub fn filtered_products(filter: &CatalogPageFilter) -> Self {
        let page = filter.page.max(1);
        let per_page = filter.per_page.clamp(1, 100);
        let start = (page - 1) * per_page;
        let conditions = format!(
            r#"_type == "product" && {}
    && ($minPrice == null || price >= $minPrice)
    && ($maxPrice == null || price <= $maxPrice)
    && ($inStockOnly == false || inStock == true)
    && ($categoryId == null || category._ref == $categoryId)"#,
            PUBLISHED
        );
        Self::new(
            QueryClass::FilteredProducts,
            format!(
                r#"{{
  "products": *[{cond}] | order(coalesce(salePrice, price) asc) [$start...$end] {proj},
  "total": count(*[{cond}])
}}"#,
                cond = conditions,
                proj = summary_projection()
            ),
        )
        .param("minPrice", filter.min_price.map(Value::from).unwrap_or(Value::Null))
        .param("maxPrice", filter.max_price.map(Value::from).unwrap_or(Value::Null))
        .param("inStockOnly", filter.in_stock_only)
        .param(
            "categoryId",
            filter
                .category_id
                .clone()
                .map(Value::from)
                .unwrap_or(Value::Null),
        )
        .param("start", start)
        .param("end", start + per_page)
    }

    /// Homepage aggregate: featured products, categories, sale products.
    pub fn homepage() -> Self {
        Self::new(
            QueryClass::Homepage,
            format!(
                r#"{{
  "featuredProducts": *[_type == "product" && featured == true && {published}] | order(publishedAt desc) [0...8] {proj},
  "categories": *[_type == "category" && {published}] | order(title asc) [0...6] {cat},
  "saleProducts": *[_type == "product" && defined(salePrice) && salePrice < price && {published}] | order(publishedAt desc) [0...4] {proj}
}}"#,
                published = PUBLISHED,
                proj = summary_projection(),
                cat = category_projection()
            ),
        )
    }

    /// Product metadata for page titles and social cards.
    pub fn product_metadata(slug: &str) -> Self {
        Self::new(
            QueryClass::ProductMetadata,
            format!(
                r#"*[_type == "product" && slug.current == $slug && {}][0] {{
  title,
  "description": pt::text(description)[0...160],
  mainImage {},
  price,
  salePrice,
  currency,
  inStock,
  category->{{title}},
  publishedAt
}}"#,
                PUBLISHED, IMAGE_PROJECTION
            ),
        )
        .param("slug", slug)
    }

    /// Minimal connectivity probe.
    pub fn health() -> Self {
        Self::new(
            QueryClass::Health,
            r#"*[_type == "product"][0]._id"#.to_string(),
        )
    }

    /// The structured cache key for this query.
    pub fn cache_key(&self) -> QueryKey {
        QueryKey {
            class: self.class.name(),
            params_hash: stable_hash(&self.params),
        }
    }
}

/// Hash the parameter map through its canonical JSON encoding. `BTreeMap`
/// iteration order makes the encoding deterministic.
fn stable_hash(params: &BTreeMap<String, Value>) -> u64 {
    let encoded = serde_json::to_string(params).unwrap_or_default();
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    encoded.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_stable_for_same_params() {
        let a = ContentQuery::search("Honey");
        let b = ContentQuery::search("honey");
        // Terms are lowercased at construction, so these coincide.
        assert_eq!(a.cache_key(), b.cache_key());

        let c = ContentQuery::search("bread");
        assert_ne!(a.cache_key(), c.cache_key());
    }

    #[test]
    fn test_cache_key_distinguishes_classes() {
        let a = ContentQuery::all_products();
        let b = ContentQuery::sale_products();
        assert_ne!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn test_cache_policies() {
        assert_eq!(
            QueryClass::AllProducts.cache_policy(),
            CachePolicy::Cached(Duration::from_secs(300))
        );
        assert_eq!(
            QueryClass::Categories.cache_policy(),
            CachePolicy::Cached(Duration::from_secs(600))
        );
        assert_eq!(
            QueryClass::FilteredProducts.cache_policy(),
            CachePolicy::Cached(Duration::from_secs(180))
        );
        assert_eq!(
            QueryClass::ProductPaths.cache_policy(),
            CachePolicy::Cached(Duration::from_secs(3600))
        );

        let search = QueryClass::Search.cache_policy();
        assert!(!search.allows_timed_cache());
        assert_eq!(search.entry_ttl(), Duration::from_secs(1));
    }

    #[test]
    fn test_pagination_params() {
        let q = ContentQuery::products_page(2, 12);
        assert_eq!(q.params.get("start"), Some(&Value::from(12)));
        assert_eq!(q.params.get("end"), Some(&Value::from(24)));

        // Page floor and per-page clamp.
        let q = ContentQuery::products_page(0, 500);
        assert_eq!(q.params.get("start"), Some(&Value::from(0)));
        assert_eq!(q.params.get("end"), Some(&Value::from(100)));
    }

    #[test]
    fn test_filtered_products_null_params() {
        let q = ContentQuery::filtered_products(&CatalogPageFilter::new());
        assert_eq!(q.params.get("minPrice"), Some(&Value::Null));
        assert_eq!(q.params.get("categoryId"), Some(&Value::Null));
        assert_eq!(q.params.get("inStockOnly"), Some(&Value::from(false)));
        assert!(q.groq.contains("coalesce(salePrice, price)"));
    }

    #[test]
    fn test_groq_excludes_drafts() {
        for q in [
            ContentQuery::all_products(),
            ContentQuery::search("jam"),
            ContentQuery::categories(),
            ContentQuery::homepage(),
        ] {
            assert!(q.groq.contains(r#"drafts.**"#), "{} must skip drafts", q.class);
        }
    }
}
