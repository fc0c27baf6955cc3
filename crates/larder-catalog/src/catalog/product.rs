//! Product types as published by the content store.

use crate::catalog::image::Image;
use crate::catalog::rich_text::Block;
use crate::ids::{CategoryId, ProductId};
use crate::money::{Currency, FormattedPrice, Money};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A URL slug as stored ({"current": "sourdough-boule"}).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slug {
    pub current: String,
}

impl Slug {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            current: slug.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.current
    }
}

/// A fully hydrated product, used on detail pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Identifier issued by the content store.
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub title: String,
    pub slug: Slug,
    /// Rich-text description blocks.
    #[serde(default)]
    pub description: Vec<Block>,
    pub main_image: Image,
    /// Additional gallery images, possibly empty.
    #[serde(default)]
    pub gallery_images: Vec<Image>,
    /// Base price in minor currency units.
    pub price: i64,
    /// Sale price in minor currency units. Presence alone does not make
    /// the product on-sale; see [`Product::is_on_sale`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<i64>,
    pub currency: Currency,
    pub category: CategoryRef,
    #[serde(default)]
    pub tags: Vec<String>,
    pub in_stock: bool,
    pub featured: bool,
    pub published_at: DateTime<Utc>,
}

/// Reduced category projection embedded in product documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    #[serde(rename = "_id")]
    pub id: CategoryId,
    pub title: String,
    pub slug: Slug,
}

/// Reduced product projection used for listings.
///
/// Same identity as [`Product`], fewer fields: the listing pipeline never
/// needs the description or gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub title: String,
    pub slug: Slug,
    pub main_image: Image,
    pub price: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<i64>,
    pub currency: Currency,
    pub in_stock: bool,
    pub featured: bool,
    pub published_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
}

/// Sale classification shared by both product shapes: a sale price
/// counts only when strictly below the base price.
fn on_sale(price: i64, sale_price: Option<i64>) -> bool {
    sale_price.map(|sale| sale < price).unwrap_or(false)
}

fn effective(price: i64, sale_price: Option<i64>) -> i64 {
    match sale_price {
        Some(sale) if sale < price => sale,
        _ => price,
    }
}

impl Product {
    /// Whether a valid discount applies.
    pub fn is_on_sale(&self) -> bool {
        on_sale(self.price, self.sale_price)
    }

    /// The price to charge and sort by: sale price when valid, else base.
    pub fn effective_price(&self) -> Money {
        Money::new(effective(self.price, self.sale_price), self.currency)
    }

    /// Formatted price badge data.
    pub fn formatted_price(&self) -> FormattedPrice {
        FormattedPrice::from_cents(self.price, self.sale_price, self.currency)
    }

    /// Reduce to the listing projection.
    pub fn to_summary(&self) -> ProductSummary {
        ProductSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            slug: self.slug.clone(),
            main_image: self.main_image.clone(),
            price: self.price,
            sale_price: self.sale_price,
            currency: self.currency,
            in_stock: self.in_stock,
            featured: self.featured,
            published_at: self.published_at,
            category: Some(self.category.clone()),
        }
    }
}

impl ProductSummary {
    /// Whether a valid discount applies.
    pub fn is_on_sale(&self) -> bool {
        on_sale(self.price, self.sale_price)
    }

    /// The price to charge and sort by: sale price when valid, else base.
    pub fn effective_price(&self) -> Money {
        Money::new(effective(self.price, self.sale_price), self.currency)
    }

    /// Effective price in minor units, for comparators.
    pub fn effective_price_cents(&self) -> i64 {
        effective(self.price, self.sale_price)
    }

    /// Formatted price badge data.
    pub fn formatted_price(&self) -> FormattedPrice {
        FormattedPrice::from_cents(self.price, self.sale_price, self.currency)
    }
}
