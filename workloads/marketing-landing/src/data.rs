//! Landing page content blocks.
//!
//! The static sections ship with editorial defaults so the page renders
//! even when the content store is unreachable; the featured strip comes
//! from the homepage aggregate when it loads.

use serde::{Deserialize, Serialize};

/// Hero banner content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroContent {
    pub headline: String,
    pub subheadline: String,
    pub cta_text: String,
    pub cta_url: String,
    pub background_image: Option<String>,
}

impl Default for HeroContent {
    fn default() -> Self {
        Self {
            headline: "Good food, from down the street".to_string(),
            subheadline: "Fresh bread, seasonal produce, and small-batch pantry goods \
                          from makers within thirty miles."
                .to_string(),
            cta_text: "Browse the Shelves".to_string(),
            cta_url: "/products".to_string(),
            background_image: None,
        }
    }
}

/// A highlight card for the why-shop-here section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Highlight {
    pub icon: String,
    pub title: String,
    pub description: String,
}

impl Highlight {
    pub fn new(icon: &str, title: &str, description: &str) -> Self {
        Self {
            icon: icon.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// Highlights section content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightsContent {
    pub section_title: String,
    pub section_subtitle: String,
    pub highlights: Vec<Highlight>,
}

impl Default for HighlightsContent {
    fn default() -> Self {
        Self {
            section_title: "Why shop the Larder".to_string(),
            section_subtitle: "Everything on our shelves has a name and a face behind it."
                .to_string(),
            highlights: vec![
                Highlight::new(
                    "\u{1f33e}",
                    "Thirty-Mile Sourcing",
                    "Produce and dairy arrive from farms close enough to visit on a Sunday drive.",
                ),
                Highlight::new(
                    "\u{1f35e}",
                    "Baked Every Morning",
                    "Sourdough, rye, and seeded loaves come out of the oven before we open.",
                ),
                Highlight::new(
                    "\u{1f96b}",
                    "Small-Batch Pantry",
                    "Preserves, pickles, and honey put up in batches small enough to number by hand.",
                ),
                Highlight::new(
                    "\u{1f69a}",
                    "Same-Day Pickup",
                    "Order by noon and your basket is packed and waiting at the counter.",
                ),
            ],
        }
    }
}

/// A customer testimonial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub author_name: String,
    pub author_detail: String,
}

impl Testimonial {
    pub fn new(quote: &str, name: &str, detail: &str) -> Self {
        Self {
            quote: quote.to_string(),
            author_name: name.to_string(),
            author_detail: detail.to_string(),
        }
    }
}

/// Testimonials section content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestimonialsContent {
    pub section_title: String,
    pub testimonials: Vec<Testimonial>,
}

impl Default for TestimonialsContent {
    fn default() -> Self {
        Self {
            section_title: "Regulars say it best".to_string(),
            testimonials: vec![
                Testimonial::new(
                    "The Saturday sourdough is the reason my family gets out of bed early. \
                     We haven't bought supermarket bread in a year.",
                    "Priya N.",
                    "Regular since 2022",
                ),
                Testimonial::new(
                    "I put their strawberry preserves in everything. When the seasonal \
                     batch shows up I buy six jars and still run out.",
                    "Marcus T.",
                    "Preserves devotee",
                ),
                Testimonial::new(
                    "As a farmer, selling through the Larder means my tomatoes are on a \
                     shelf eight hours after picking. Nobody else moves that fast.",
                    "Elena R.",
                    "Redgate Farm",
                ),
            ],
        }
    }
}

/// Call-to-action banner content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CtaContent {
    pub headline: String,
    pub subheadline: String,
    pub primary_cta_text: String,
    pub primary_cta_url: String,
    pub secondary_cta_text: Option<String>,
    pub secondary_cta_url: Option<String>,
}

impl Default for CtaContent {
    fn default() -> Self {
        Self {
            headline: "Dinner is better when it's local".to_string(),
            subheadline: "Browse what came in this morning, or come say hello at the corner \
                          of Fifth and Rowan."
                .to_string(),
            primary_cta_text: "Shop the Catalog".to_string(),
            primary_cta_url: "/products".to_string(),
            secondary_cta_text: Some("Visit the Shop".to_string()),
            secondary_cta_url: Some("/visit".to_string()),
        }
    }
}

/// All static content for the landing page.
#[derive(Debug, Clone, Default)]
pub struct LandingContent {
    pub hero: HeroContent,
    pub highlights: HighlightsContent,
    pub testimonials: TestimonialsContent,
    pub cta: CtaContent,
}
