//! Page header with the search box.

use larder_pages::html_escape;

/// Render the page heading and search input.
pub fn render_header(term: &str) -> String {
    format!(
        r#"<section class="listing-header" data-section="header">
    <h1>The Shelves</h1>
    <p class="listing-tagline">Everything in the shop, picked over daily.</p>
    <div class="search-box">
        <input type="search" id="product-search" name="q" value="{}"
               placeholder="Search bread, produce, preserves..." aria-label="Search products">
    </div>
</section>"#,
        html_escape(term)
    )
}
