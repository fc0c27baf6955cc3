//! Catalog content types: products, categories, images, rich text.

mod category;
mod image;
mod product;
mod rich_text;

pub use category::Category;
pub use image::{CropRect, Dimensions, Hotspot, Image, ImageAsset, ImageMetadata};
pub use product::{CategoryRef, Product, ProductSummary, Slug};
pub use rich_text::{plain_text, Block, ListKind, Mark, Span};
