//! Image URL building for the store's image CDN.
//!
//! The store resolves assets to direct URLs; transformation parameters
//! (resize, format, quality, blur) ride along as query parameters.

use larder_catalog::catalog::ImageAsset;

/// Output format for transformed images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Webp,
    Jpg,
    Png,
}

impl ImageFormat {
    fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Webp => "webp",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Png => "png",
        }
    }
}

/// Builder for transformed image URLs.
#[derive(Debug, Clone)]
pub struct ImageUrlBuilder<'a> {
    url: &'a str,
    width: Option<u32>,
    height: Option<u32>,
    format: Option<ImageFormat>,
    quality: Option<u8>,
    blur: Option<u8>,
}

impl<'a> ImageUrlBuilder<'a> {
    /// Start from an asset reference.
    pub fn for_asset(asset: &'a ImageAsset) -> Self {
        Self::from_url(&asset.url)
    }

    /// Start from a raw asset URL.
    pub fn from_url(url: &'a str) -> Self {
        Self {
            url,
            width: None,
            height: None,
            format: None,
            quality: None,
            blur: None,
        }
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn format(mut self, format: ImageFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Quality 1-100.
    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality.clamp(1, 100));
        self
    }

    /// Blur radius 1-100.
    pub fn blur(mut self, blur: u8) -> Self {
        self.blur = Some(blur.clamp(1, 100));
        self
    }

    /// Render the final URL.
    pub fn build(&self) -> String {
        let mut params = Vec::new();
        if let Some(w) = self.width {
            params.push(format!("w={}", w));
        }
        if let Some(h) = self.height {
            params.push(format!("h={}", h));
        }
        if self.width.is_some() && self.height.is_some() {
            params.push("fit=crop".to_string());
        }
        if let Some(fm) = self.format {
            params.push(format!("fm={}", fm.as_str()));
        }
        if let Some(q) = self.quality {
            params.push(format!("q={}", q));
        }
        if let Some(blur) = self.blur {
            params.push(format!("blur={}", blur));
        }

        if params.is_empty() {
            return self.url.to_string();
        }

        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.url, separator, params.join("&"))
    }
}

/// Product image at specific dimensions; webp at quality 85.
pub fn product_image_url(asset: &ImageAsset, width: u32, height: u32) -> String {
    ImageUrlBuilder::for_asset(asset)
        .width(width)
        .height(height)
        .format(ImageFormat::Webp)
        .quality(85)
        .build()
}

/// Low-quality placeholder for progressive loading: fixed 20x20, heavy
/// blur.
pub fn lqip_url(asset: &ImageAsset) -> String {
    ImageUrlBuilder::for_asset(asset)
        .width(20)
        .height(20)
        .blur(50)
        .format(ImageFormat::Jpg)
        .quality(50)
        .build()
}

/// Responsive URL set for the common breakpoints, with jpg fallbacks for
/// clients without webp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsiveImageUrls {
    pub mobile: String,
    pub tablet: String,
    pub desktop: String,
    pub original: String,
    pub mobile_fallback: String,
    pub tablet_fallback: String,
    pub desktop_fallback: String,
}

/// Build the responsive set for an asset.
pub fn responsive_image_urls(asset: &ImageAsset) -> ResponsiveImageUrls {
    let square = |size: u32, format: ImageFormat| {
        ImageUrlBuilder::for_asset(asset)
            .width(size)
            .height(size)
            .format(format)
            .build()
    };

    ResponsiveImageUrls {
        mobile: square(640, ImageFormat::Webp),
        tablet: square(768, ImageFormat::Webp),
        desktop: square(1024, ImageFormat::Webp),
        original: ImageUrlBuilder::for_asset(asset)
            .format(ImageFormat::Webp)
            .build(),
        mobile_fallback: square(640, ImageFormat::Jpg),
        tablet_fallback: square(768, ImageFormat::Jpg),
        desktop_fallback: square(1024, ImageFormat::Jpg),
    }
}
