//! Category types for catalog organization.
//!
//! Categories are a flat set in this store; products reference exactly
//! one.

use crate::catalog::image::Image;
use crate::catalog::product::Slug;
use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Identifier issued by the content store.
    #[serde(rename = "_id")]
    pub id: CategoryId,
    pub title: String,
    pub slug: Slug,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
}

impl Category {
    /// Create a bare category (tests and fixtures).
    pub fn new(id: impl Into<CategoryId>, title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            slug: Slug::new(slug),
            description: None,
            image: None,
        }
    }
}
