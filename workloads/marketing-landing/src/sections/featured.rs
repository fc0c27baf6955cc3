//! Featured products strip, fed by the homepage aggregate.

use larder_catalog::catalog::ProductSummary;
use larder_content::product_image_url;
use larder_pages::html_escape;

/// Render the featured products strip. Empty input renders nothing;
/// the landing page omits the strip rather than showing a hole.
pub fn render_featured(products: &[ProductSummary]) -> String {
    if products.is_empty() {
        return String::new();
    }

    let cards: String = products.iter().map(render_featured_card).collect();

    format!(
        r#"<section class="featured" data-section="featured">
    <div class="section-header">
        <h2>Fresh on the shelves</h2>
        <p>What our regulars are reaching for this week.</p>
    </div>
    <div class="featured-strip">
{}    </div>
</section>"#,
        cards
    )
}

fn render_featured_card(product: &ProductSummary) -> String {
    let price = product.formatted_price();
    let price_html = match &price.sale {
        Some(sale) => format!(
            r#"<span class="price-sale">{}</span> <s class="price-was">{}</s>"#,
            sale, price.original
        ),
        None => format!(r#"<span class="price">{}</span>"#, price.original),
    };

    format!(
        r#"        <a class="featured-card" href="/products/{}">
            <img src="{}" alt="{}" loading="lazy" width="320" height="320">
            <h3>{}</h3>
            <div class="featured-price">{}</div>
        </a>
"#,
        html_escape(product.slug.as_str()),
        html_escape(&product_image_url(&product.main_image.asset, 320, 320)),
        html_escape(product.main_image.alt_or(&product.title)),
        html_escape(&product.title),
        price_html
    )
}
