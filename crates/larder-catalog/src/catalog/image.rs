//! Image references as stored in the content store.
//!
//! Assets are opaque: the store resolves them to URLs and carries pixel
//! dimensions plus an optional low-quality placeholder string for
//! progressive loading. Crop and hotspot metadata come along so renderers
//! can frame images without another round trip.

use crate::ids::AssetId;
use serde::{Deserialize, Serialize};

/// An image attached to a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// The resolved asset reference.
    pub asset: ImageAsset,
    /// Alt text for accessibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Optional caption shown under galleries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Focal point for art-directed crops.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotspot: Option<Hotspot>,
    /// Crop insets, as fractions of the source dimensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<CropRect>,
}

impl Image {
    /// Alt text, falling back to the given product/category title.
    pub fn alt_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.alt.as_deref().unwrap_or(fallback)
    }
}

/// A resolved image asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAsset {
    /// Asset identifier in the content store.
    #[serde(rename = "_id")]
    pub id: AssetId,
    /// Direct URL to the unmodified asset.
    pub url: String,
    /// Dimensions and placeholder metadata.
    pub metadata: ImageMetadata,
}

/// Asset metadata the store computes at upload time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub dimensions: Dimensions,
    /// Low-quality image placeholder (base64 data URI), when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lqip: Option<String>,
}

/// Pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// Aspect ratio (width / height), or 1.0 for degenerate heights.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f64 / self.height as f64
        }
    }
}

/// Focal point, in fractions of the image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Crop insets, in fractions of the image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}
