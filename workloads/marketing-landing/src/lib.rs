//! Marketing landing page for The Corner Larder.
//!
//! Static editorial sections (hero, highlights, testimonials, CTA,
//! newsletter) around a featured-products strip fed by the homepage
//! aggregate. The page is cacheable for an hour; a content store outage
//! degrades to the editorial defaults instead of an error page.

mod data;
mod sections;

pub use data::{
    CtaContent, HeroContent, Highlight, HighlightsContent, LandingContent, Testimonial,
    TestimonialsContent,
};

use larder_content::{ContentApi, HomepageData};
use larder_pages::{HeadContent, PageBuilder, Shell};
use sections::{
    render_cta, render_featured, render_hero, render_highlights, render_newsletter,
    render_testimonials,
};

/// Fetch homepage content and render the complete page.
///
/// The homepage aggregate is a nice-to-have here: on failure the landing
/// renders its defaults and logs, it never shows an error page.
pub async fn render_landing_page(api: &ContentApi) -> String {
    let homepage = match api.homepage().await {
        Ok(data) => Some(data),
        Err(error) => {
            tracing::warn!(%error, "homepage content unavailable; rendering defaults");
            None
        }
    };
    render_with(&LandingContent::default(), homepage.as_ref())
}

/// Render the page from explicit content (tests and previews).
pub fn render_with(content: &LandingContent, homepage: Option<&HomepageData>) -> String {
    let mut page = PageBuilder::new(create_shell());

    page.section("hero", &render_hero(&content.hero));
    page.section("highlights", &render_highlights(&content.highlights));
    if let Some(homepage) = homepage {
        page.section("featured", &render_featured(&homepage.featured_products));
    }
    page.section("testimonials", &render_testimonials(&content.testimonials));
    page.section("cta", &render_cta(&content.cta));
    page.section("newsletter", &render_newsletter());
    page.section("scripts", LANDING_SCRIPTS);

    page.render()
}

/// Shell with site chrome and inline styles.
fn create_shell() -> Shell {
    let head = HeadContent::new("The Corner Larder | Local food, every day")
        .with_meta("viewport", "width=device-width, initial-scale=1")
        .with_meta(
            "description",
            "Fresh bread, seasonal produce, and small-batch pantry goods from makers within thirty miles.",
        )
        .with_style(LANDING_STYLES);

    Shell::new(head)
        .with_body_start(
            r#"<body>
<header class="site-header">
    <nav class="nav-container">
        <a href="/" class="logo">The Corner Larder</a>
        <div class="nav-links">
            <a href="/products">Shop</a>
            <a href="/visit">Visit</a>
            <a href="/makers">Our Makers</a>
        </div>
    </nav>
</header>
<main>
"#,
        )
        .with_body_end(
            r#"
</main>
<footer class="site-footer">
    <div class="footer-container">
        <div class="footer-brand">
            <a href="/" class="logo">The Corner Larder</a>
            <p>Corner of Fifth and Rowan. Tuesday to Sunday, 8 to 6.</p>
        </div>
        <div class="footer-links">
            <a href="/products">Catalog</a>
            <a href="/makers">Makers</a>
            <a href="/visit">Find Us</a>
        </div>
    </div>
    <div class="footer-bottom">
        <p>&copy; 2025 The Corner Larder. All rights reserved.</p>
    </div>
</footer>
</body>
</html>"#,
        )
}

const LANDING_SCRIPTS: &str = r#"<script>
document.getElementById('newsletter-form')?.addEventListener('submit', async (e) => {
    e.preventDefault();
    const form = e.target;
    const submitBtn = form.querySelector('button[type="submit"]');
    const successDiv = document.querySelector('.newsletter-success');
    const errorDiv = document.querySelector('.newsletter-error');

    submitBtn.disabled = true;
    submitBtn.textContent = 'Subscribing...';

    try {
        const response = await fetch('/api/newsletter', {
            method: 'POST',
            headers: {'content-type': 'application/json'},
            body: JSON.stringify({email: form.email.value}),
        });
        if (!response.ok) throw new Error('Subscription failed');
        form.hidden = true;
        successDiv.hidden = false;
        errorDiv.hidden = true;
    } catch (error) {
        errorDiv.hidden = false;
        submitBtn.disabled = false;
        submitBtn.textContent = 'Subscribe';
    }
});
</script>"#;

const LANDING_STYLES: &str = r##"
:root {
    --ink: #2b2118;
    --cream: #faf6ef;
    --wheat: #e9ddc7;
    --leaf: #4a7c46;
    --leaf-dark: #396136;
    --berry: #a8353a;
    --muted: #7b6f60;
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: Georgia, 'Times New Roman', serif;
    background: var(--cream);
    color: var(--ink);
    line-height: 1.6;
}

.site-header {
    position: sticky;
    top: 0;
    background: rgba(250, 246, 239, 0.95);
    border-bottom: 1px solid var(--wheat);
    z-index: 100;
}

.nav-container {
    max-width: 1100px;
    margin: 0 auto;
    padding: 1rem 2rem;
    display: flex;
    align-items: center;
    justify-content: space-between;
}

.logo {
    font-size: 1.4rem;
    font-weight: 700;
    color: var(--leaf-dark);
    text-decoration: none;
}

.nav-links { display: flex; gap: 2rem; }

.nav-links a {
    color: var(--ink);
    text-decoration: none;
}

.nav-links a:hover { color: var(--leaf); }

.hero {
    padding: 6rem 2rem;
    background: linear-gradient(160deg, var(--leaf) 0%, var(--leaf-dark) 100%);
    color: var(--cream);
    text-align: center;
    background-size: cover;
    background-position: center;
}

.hero-content { max-width: 720px; margin: 0 auto; }

.hero-headline {
    font-size: 3rem;
    line-height: 1.15;
    margin-bottom: 1.25rem;
}

.hero-subheadline {
    font-size: 1.2rem;
    opacity: 0.92;
    margin-bottom: 2rem;
}

.hero-cta {
    display: inline-block;
    background: var(--cream);
    color: var(--leaf-dark);
    padding: 0.9rem 2.25rem;
    border-radius: 6px;
    font-weight: 700;
    text-decoration: none;
    transition: transform 0.2s ease;
}

.hero-cta:hover { transform: translateY(-2px); }

.section-header {
    text-align: center;
    max-width: 560px;
    margin: 0 auto 3rem;
}

.section-header h2 { font-size: 2.1rem; margin-bottom: 0.75rem; }
.section-header p { color: var(--muted); }

.highlights { padding: 5rem 2rem; }

.highlights-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
    gap: 1.5rem;
    max-width: 1100px;
    margin: 0 auto;
}

.highlight-card {
    background: #fff;
    border: 1px solid var(--wheat);
    border-radius: 10px;
    padding: 1.75rem;
}

.highlight-icon { font-size: 2rem; display: block; margin-bottom: 0.75rem; }
.highlight-title { font-size: 1.1rem; margin-bottom: 0.5rem; }
.highlight-description { color: var(--muted); font-size: 0.95rem; }

.featured { padding: 5rem 2rem; background: #fff; }

.featured-strip {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
    gap: 1.5rem;
    max-width: 1100px;
    margin: 0 auto;
}

.featured-card {
    text-decoration: none;
    color: var(--ink);
    border: 1px solid var(--wheat);
    border-radius: 10px;
    overflow: hidden;
    background: var(--cream);
}

.featured-card img { width: 100%; height: auto; display: block; }
.featured-card h3 { padding: 0.75rem 1rem 0.25rem; font-size: 1rem; }
.featured-price { padding: 0 1rem 1rem; }
.price-sale { color: var(--berry); font-weight: 700; }
.price-was { color: var(--muted); font-size: 0.9rem; }

.testimonials { padding: 5rem 2rem; background: var(--wheat); }

.testimonials-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
    gap: 1.5rem;
    max-width: 1100px;
    margin: 0 auto;
}

.testimonial-card {
    background: #fff;
    border-radius: 10px;
    padding: 1.75rem;
}

.testimonial-quote { font-style: italic; margin-bottom: 1.25rem; }
.testimonial-author { display: flex; align-items: center; gap: 0.9rem; }

.testimonial-avatar {
    width: 44px;
    height: 44px;
    border-radius: 50%;
    background: var(--leaf);
    color: var(--cream);
    display: flex;
    align-items: center;
    justify-content: center;
    font-weight: 700;
}

.author-name { font-weight: 700; }
.author-detail { color: var(--muted); font-size: 0.85rem; }

.cta-banner {
    padding: 5rem 2rem;
    background: var(--ink);
    color: var(--cream);
    text-align: center;
}

.cta-headline { font-size: 2.1rem; margin-bottom: 0.75rem; }
.cta-subheadline { opacity: 0.85; margin-bottom: 2rem; }
.cta-buttons { display: flex; gap: 1rem; justify-content: center; flex-wrap: wrap; }

.cta-primary {
    background: var(--leaf);
    color: var(--cream);
    padding: 0.9rem 1.9rem;
    border-radius: 6px;
    text-decoration: none;
    font-weight: 700;
}

.cta-secondary {
    border: 2px solid var(--cream);
    color: var(--cream);
    padding: 0.9rem 1.9rem;
    border-radius: 6px;
    text-decoration: none;
}

.newsletter { padding: 4rem 2rem; }

.newsletter-content { max-width: 480px; margin: 0 auto; text-align: center; }
.newsletter h2 { margin-bottom: 0.5rem; }
.newsletter p { color: var(--muted); margin-bottom: 1.5rem; }

.form-group { display: flex; gap: 0.5rem; }

.form-group input {
    flex: 1;
    padding: 0.8rem 1rem;
    border: 1px solid var(--wheat);
    border-radius: 6px;
    font-size: 1rem;
}

.form-group button {
    padding: 0.8rem 1.4rem;
    background: var(--leaf);
    color: var(--cream);
    border: none;
    border-radius: 6px;
    font-weight: 700;
    cursor: pointer;
}

.form-group button:disabled { opacity: 0.7; cursor: not-allowed; }

.newsletter-success { padding: 1.25rem; background: #e4efe2; border-radius: 6px; color: var(--leaf-dark); }
.newsletter-error { padding: 1.25rem; background: #f7e4e4; border-radius: 6px; color: var(--berry); }
.privacy-note { font-size: 0.85rem; margin-top: 1rem; }

.site-footer { background: var(--ink); color: var(--cream); padding: 3rem 2rem 1.5rem; }

.footer-container {
    max-width: 1100px;
    margin: 0 auto 2rem;
    display: flex;
    justify-content: space-between;
    gap: 2rem;
    flex-wrap: wrap;
}

.footer-brand p { opacity: 0.7; margin-top: 0.75rem; }
.footer-links { display: flex; gap: 1.5rem; align-items: center; }
.footer-links a { color: var(--cream); text-decoration: none; opacity: 0.85; }
.footer-bottom {
    max-width: 1100px;
    margin: 0 auto;
    padding-top: 1.25rem;
    border-top: 1px solid rgba(250, 246, 239, 0.2);
    font-size: 0.85rem;
    opacity: 0.7;
}

@media (max-width: 720px) {
    .nav-links { display: none; }
    .hero-headline { font-size: 2.2rem; }
    .form-group { flex-direction: column; }
}
"##;

/// Spin entry point.
#[cfg(target_arch = "wasm32")]
mod component {
    use super::render_landing_page;
    use larder_content::ContentApi;
    use spin_sdk::http::{Method, Request, Response};
    use spin_sdk::http_component;

    #[http_component]
    async fn handle_landing(req: Request) -> anyhow::Result<Response> {
        if *req.method() != Method::Get {
            return Ok(Response::builder().status(405).build());
        }

        let api = ContentApi::from_env()?;
        let html = render_landing_page(&api).await;

        Ok(Response::builder()
            .status(200)
            .header("content-type", "text/html; charset=utf-8")
            .header(
                "cache-control",
                "public, max-age=3600, stale-while-revalidate=300",
            )
            .body(html)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::executor::block_on;
    use larder_content::{ContentError, ContentQuery, ContentTransport};
    use serde_json::{json, Value};
    use std::rc::Rc;

    struct CannedTransport(Value);

    #[async_trait(?Send)]
    impl ContentTransport for CannedTransport {
        async fn execute(&self, _query: &ContentQuery) -> Result<Value, ContentError> {
            if self.0.is_null() {
                Err(ContentError::Transport("down".to_string()))
            } else {
                Ok(self.0.clone())
            }
        }
    }

    #[test]
    fn test_defaults_render_all_sections() {
        let html = render_with(&LandingContent::default(), None);
        for section in ["hero", "highlights", "testimonials", "cta", "newsletter"] {
            assert!(
                html.contains(&format!(r#"data-section="{}""#, section)),
                "missing section {}",
                section
            );
        }
        assert!(html.contains("The Corner Larder"));
        assert!(!html.contains(r#"data-section="featured""#));
    }

    #[test]
    fn test_featured_strip_from_homepage_aggregate() {
        let api = ContentApi::new(Rc::new(CannedTransport(json!({
            "featuredProducts": [{
                "_id": "prod-1",
                "title": "Wildflower Honey",
                "slug": {"current": "wildflower-honey"},
                "mainImage": {
                    "asset": {
                        "_id": "image-1",
                        "url": "https://cdn.example.com/honey.jpg",
                        "metadata": {"dimensions": {"width": 800, "height": 800}}
                    }
                },
                "price": 1250,
                "currency": "USD",
                "inStock": true,
                "featured": true,
                "publishedAt": "2025-05-01T00:00:00Z"
            }],
            "categories": [],
            "saleProducts": []
        }))));

        let html = block_on(render_landing_page(&api));
        assert!(html.contains(r#"data-section="featured""#));
        assert!(html.contains("Wildflower Honey"));
    }

    #[test]
    fn test_store_outage_degrades_to_defaults() {
        let api = ContentApi::new(Rc::new(CannedTransport(Value::Null)));
        let html = block_on(render_landing_page(&api));

        // Page renders without the featured strip, no error surface.
        assert!(html.contains(r#"data-section="hero""#));
        assert!(!html.contains(r#"data-section="featured""#));
    }
}
