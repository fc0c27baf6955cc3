//! Results grid, empty state, and error state.

use larder_catalog::catalog::ProductSummary;
use larder_catalog::ids::ProductId;
use larder_catalog::listing::ViewMode;
use larder_content::{lqip_url, product_image_url, ErrorReport};
use larder_pages::html_escape;

/// Render the results section: count line plus the card grid or the
/// explicit no-results state.
pub fn render_results(
    products: &[&ProductSummary],
    favorites: &[ProductId],
    view: ViewMode,
    has_active_filters: bool,
) -> String {
    let count_line = format!(
        r#"    <p class="results-count">Showing {} product{}</p>"#,
        products.len(),
        if products.len() == 1 { "" } else { "s" }
    );

    if products.is_empty() {
        return format!(
            r#"<section class="listing-results" data-section="results">
{}
{}</section>"#,
            count_line,
            render_empty(has_active_filters)
        );
    }

    let cards: String = products
        .iter()
        .map(|p| render_product_card(p, favorites.contains(&p.id)))
        .collect();

    let grid_class = match view {
        ViewMode::Grid => "product-grid",
        ViewMode::List => "product-grid product-list",
    };

    format!(
        r#"<section class="listing-results" data-section="results">
{}
    <div class="{}">
{}    </div>
</section>"#,
        count_line, grid_class, cards
    )
}

fn render_product_card(product: &ProductSummary, is_favorite: bool) -> String {
    let price = product.formatted_price();
    let price_html = match &price.sale {
        Some(sale) => format!(
            r#"<span class="price-sale">{}</span> <s class="price-was">{}</s> <span class="discount-badge">-{}%</span>"#,
            sale,
            price.original,
            price.discount_percentage.unwrap_or(0)
        ),
        None => format!(r#"<span class="price">{}</span>"#, price.original),
    };

    let stock_html = if product.in_stock {
        r#"<span class="stock in-stock">In Stock</span>"#
    } else {
        r#"<span class="stock out-of-stock">Out of Stock</span>"#
    };

    let category_html = product
        .category
        .as_ref()
        .map(|c| format!(r#"<span class="card-category">{}</span>"#, html_escape(&c.title)))
        .unwrap_or_default();

    format!(
        r#"        <article class="product-card" data-product-id="{id}">
            <a href="/products/{slug}" class="card-link">
                <img src="{image}" alt="{alt}" loading="lazy" width="400" height="400"
                     style="background-image: url('{lqip}')">
                <div class="card-body">
                    {category}
                    <h3 class="card-title">{title}</h3>
                    <div class="card-price">{price}</div>
                    {stock}
                </div>
            </a>
            <button class="favorite-toggle{favorite_class}" data-product-id="{id}"
                    aria-pressed="{favorite}" aria-label="Toggle favorite">&#9825;</button>
        </article>
"#,
        id = html_escape(product.id.as_str()),
        slug = html_escape(product.slug.as_str()),
        image = html_escape(&product_image_url(&product.main_image.asset, 400, 400)),
        lqip = html_escape(&lqip_url(&product.main_image.asset)),
        alt = html_escape(product.main_image.alt_or(&product.title)),
        category = category_html,
        title = html_escape(&product.title),
        price = price_html,
        stock = stock_html,
        favorite_class = if is_favorite { " active" } else { "" },
        favorite = is_favorite,
    )
}

/// The explicit no-results state, distinct from loading and error.
fn render_empty(has_active_filters: bool) -> String {
    let hint = if has_active_filters {
        r#"<p>Try adjusting your filters or search terms.</p>
        <a href="/products" class="clear-filters">Clear all filters</a>"#
    } else {
        "<p>Nothing on the shelves right now. Check back after the morning delivery.</p>"
    };

    format!(
        r#"    <div class="empty-state">
        <h3>No products found</h3>
        {}
    </div>
"#,
        hint
    )
}

/// Visible error state with a manual retry. Nothing retries on its own.
pub fn render_error(report: &ErrorReport) -> String {
    format!(
        r#"<section class="listing-error" data-section="results">
    <h2>Error Loading Products</h2>
    <p class="error-message">{}</p>
    <button onclick="window.location.reload()" class="retry-button">Try Again</button>
</section>"#,
        html_escape(&report.message)
    )
}

/// Skeleton placeholders while the catalog loads.
pub fn render_loading() -> String {
    let cards: String = (0..8)
        .map(|_| {
            r#"        <div class="product-card skeleton">
            <div class="skeleton-image"></div>
            <div class="skeleton-text"></div>
            <div class="skeleton-text short"></div>
        </div>
"#
        })
        .collect();

    format!(
        r#"<section class="listing-results" data-section="results">
    <p class="results-count">Loading products...</p>
    <div class="product-grid">
{}    </div>
</section>"#,
        cards
    )
}
