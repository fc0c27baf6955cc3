//! Products listing page.
//!
//! Server-renders the full listing from URL parameters, then hydrates:
//! the inline script debounces search input into the `q` parameter and
//! keeps favorites in durable client storage. All listing decisions go
//! through the `ListingController`, so the rendered page and the
//! hydrated page agree on every filter rule.

mod params;
mod sections;

pub use params::ListingParams;

use larder_catalog::catalog::Category;
use larder_content::{ContentApi, ErrorReport};
use larder_pages::{HeadContent, PageBuilder, Shell};
use larder_state::{FavoritesStore, KeyValueStorage, ListingController, ListingView};
use sections::{
    meta_description, render_detail, render_error, render_filters, render_header,
    render_loading, render_not_found, render_results,
};
use std::time::Instant;

/// Fetch data and render the complete listing page.
pub async fn render_products_page<S: KeyValueStorage>(
    api: &ContentApi,
    favorites: FavoritesStore<S>,
    params: &ListingParams,
) -> String {
    let mut controller = ListingController::with_term(params.term.clone(), favorites);
    controller.set_category(params.category_filter());
    controller.set_in_stock_only(params.in_stock_only);
    controller.set_on_sale_only(params.on_sale_only);
    controller.set_sort(params.sort);
    controller.set_view_mode(params.view);

    // Catalog and categories load concurrently; different keys, so the
    // request cache keeps them independent.
    controller.begin_catalog_load();
    let (catalog, categories) = futures::join!(api.all_products(), api.categories());
    controller.apply_catalog(catalog);

    let categories = categories.unwrap_or_else(|error| {
        tracing::warn!(%error, "categories unavailable; filter menu degrades");
        Vec::new()
    });

    // The URL term is already settled; one tick hands out the search
    // fetch when it qualifies.
    if let Some(term) = controller.tick(Instant::now()) {
        let results = api.search_products(&term).await;
        controller.apply_search(&term, results);
    }

    render_page(&controller, params, &categories)
}

/// Render the page from controller state (tests drive this directly).
pub fn render_page<S: KeyValueStorage>(
    controller: &ListingController<S>,
    params: &ListingParams,
    categories: &[Category],
) -> String {
    let mut page = PageBuilder::new(create_shell(params));

    page.section("header", &render_header(controller.search_input()));
    page.section("filters", &render_filters(params, categories));

    let results_html = match controller.view() {
        ListingView::Loading => render_loading(),
        ListingView::Failed(error) => {
            let report: ErrorReport = error.report();
            tracing::error!(status = report.status_code, "listing failed to load");
            render_error(&report)
        }
        ListingView::Ready { products, .. } => render_results(
            &products,
            controller.favorites().favorites(),
            controller.view_mode(),
            controller.has_active_filters(),
        ),
    };
    page.section("results", &results_html);
    page.section("scripts", LISTING_SCRIPTS);

    page.render()
}

/// Fetch one product and render its detail page.
///
/// Related products are a nice-to-have: their failure degrades to an
/// empty strip, while a failed product fetch is a visible error state.
pub async fn render_detail_page(api: &ContentApi, slug: &str) -> String {
    let product = match api.product_by_slug(slug).await {
        Ok(product) => product,
        Err(error) => {
            let report = error.report();
            tracing::error!(status = report.status_code, slug, "product failed to load");
            let mut page = PageBuilder::new(detail_shell(slug, None));
            page.section("detail", &render_error(&report));
            page.section("scripts", LISTING_SCRIPTS);
            return page.render();
        }
    };

    let Some(product) = product else {
        let mut page = PageBuilder::new(detail_shell(slug, None));
        page.section("detail", &render_not_found(slug));
        page.section("scripts", LISTING_SCRIPTS);
        return page.render();
    };

    let related = api
        .related_products(product.category.id.as_str(), product.id.as_str())
        .await
        .unwrap_or_else(|error| {
            tracing::warn!(%error, "related products unavailable");
            Vec::new()
        });

    let mut page = PageBuilder::new(detail_shell(&product.title, Some(&meta_description(&product))));
    page.section("detail", &render_detail(&product, &related));
    page.section("scripts", LISTING_SCRIPTS);
    page.render()
}

fn detail_shell(title: &str, description: Option<&str>) -> Shell {
    let mut head = HeadContent::new(format!("{} | The Corner Larder", title))
        .with_meta("viewport", "width=device-width, initial-scale=1");
    if let Some(description) = description {
        head = head.with_meta("description", description);
    }

    Shell::new(head.with_style(LISTING_STYLES)).with_body_start(
        r#"<body>
<header class="site-header">
    <nav class="nav-container">
        <a href="/" class="logo">The Corner Larder</a>
        <div class="nav-links">
            <a href="/products" class="current">Shop</a>
            <a href="/visit">Visit</a>
            <a href="/makers">Our Makers</a>
        </div>
    </nav>
</header>
<main>
"#,
    )
}

fn create_shell(params: &ListingParams) -> Shell {
    let title = if params.term.is_empty() {
        "Products | The Corner Larder".to_string()
    } else {
        format!("{} | Search | The Corner Larder", params.term)
    };

    let head = HeadContent::new(title)
        .with_meta("viewport", "width=device-width, initial-scale=1")
        .with_meta("description", "Everything in the shop, picked over daily.")
        .with_style(LISTING_STYLES);

    Shell::new(head).with_body_start(
        r#"<body>
<header class="site-header">
    <nav class="nav-container">
        <a href="/" class="logo">The Corner Larder</a>
        <div class="nav-links">
            <a href="/products" class="current">Shop</a>
            <a href="/visit">Visit</a>
            <a href="/makers">Our Makers</a>
        </div>
    </nav>
</header>
<main>
"#,
    )
}

/// Hydration script: debounced search (300ms) and durable favorites
/// under the `product-favorites` key.
const LISTING_SCRIPTS: &str = r#"<script>
(function () {
    var FAVORITES_KEY = 'product-favorites';
    var DEBOUNCE_MS = 300;

    function loadFavorites() {
        try {
            var stored = localStorage.getItem(FAVORITES_KEY);
            return stored ? JSON.parse(stored) : [];
        } catch (error) {
            console.error('Error loading favorites:', error);
            return [];
        }
    }

    function saveFavorites(ids) {
        localStorage.setItem(FAVORITES_KEY, JSON.stringify(ids));
    }

    var favorites = loadFavorites();

    document.querySelectorAll('.favorite-toggle').forEach(function (button) {
        var id = button.dataset.productId;
        var active = favorites.indexOf(id) !== -1;
        button.classList.toggle('active', active);
        button.setAttribute('aria-pressed', String(active));

        button.addEventListener('click', function () {
            var index = favorites.indexOf(id);
            if (index === -1) {
                favorites.push(id);
            } else {
                favorites.splice(index, 1);
            }
            saveFavorites(favorites);
            var nowActive = favorites.indexOf(id) !== -1;
            button.classList.toggle('active', nowActive);
            button.setAttribute('aria-pressed', String(nowActive));
        });
    });

    var searchInput = document.getElementById('product-search');
    if (searchInput) {
        var timer = null;
        searchInput.addEventListener('input', function () {
            if (timer) clearTimeout(timer);
            timer = setTimeout(function () {
                var url = new URL(window.location);
                if (searchInput.value) {
                    url.searchParams.set('q', searchInput.value);
                } else {
                    url.searchParams.delete('q');
                }
                window.location = url;
            }, DEBOUNCE_MS);
        });
    }
})();
</script>"#;

const LISTING_STYLES: &str = r##"
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

.logo { font-size: 1.4rem; font-weight: 700; color: var(--leaf-dark); text-decoration: none; }
.nav-links { display: flex; gap: 2rem; }
.nav-links a { color: var(--ink); text-decoration: none; }
.nav-links a.current { color: var(--leaf); font-weight: 700; }

main { max-width: 1100px; margin: 0 auto; padding: 2rem; }

.listing-header h1 { font-size: 2.2rem; }
.listing-tagline { color: var(--muted); margin-bottom: 1.25rem; }

.search-box input {
    width: 100%;
    padding: 0.85rem 1rem;
    border: 1px solid var(--wheat);
    border-radius: 8px;
    font-size: 1rem;
    background: #fff;
}

.listing-filters { margin: 1.5rem 0; }

#filter-form {
    display: flex;
    gap: 0.75rem;
    flex-wrap: wrap;
    align-items: center;
}

#filter-form select,
#filter-form .toggle {
    padding: 0.55rem 0.9rem;
    border: 1px solid var(--wheat);
    border-radius: 6px;
    background: #fff;
    font-size: 0.95rem;
    cursor: pointer;
}

#filter-form .toggle.active {
    background: var(--leaf);
    color: var(--cream);
    border-color: var(--leaf);
}

.view-toggle { margin-left: auto; display: flex; }
.view-toggle button {
    padding: 0.55rem 0.8rem;
    border: 1px solid var(--wheat);
    background: #fff;
    cursor: pointer;
}
.view-toggle button.active { background: var(--wheat); }

.active-filters {
    margin-top: 0.9rem;
    display: flex;
    gap: 0.5rem;
    align-items: center;
    flex-wrap: wrap;
    font-size: 0.9rem;
}

.active-label { color: var(--muted); }

.badge {
    background: var(--wheat);
    border-radius: 999px;
    padding: 0.2rem 0.75rem;
}

.clear-filters { color: var(--berry); }

.results-count { color: var(--muted); font-size: 0.9rem; margin-bottom: 1rem; }

.product-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(230px, 1fr));
    gap: 1.5rem;
}

.product-grid.product-list { grid-template-columns: 1fr; }

.product-card {
    position: relative;
    background: #fff;
    border: 1px solid var(--wheat);
    border-radius: 10px;
    overflow: hidden;
}

.card-link { text-decoration: none; color: var(--ink); display: block; }
.product-card img { width: 100%; height: auto; display: block; background-size: cover; }
.card-body { padding: 0.9rem 1rem 1.1rem; }
.card-category { font-size: 0.75rem; text-transform: uppercase; color: var(--muted); letter-spacing: 0.06em; }
.card-title { font-size: 1.05rem; margin: 0.3rem 0 0.5rem; }
.card-price { margin-bottom: 0.4rem; }

.price-sale { color: var(--berry); font-weight: 700; }
.price-was { color: var(--muted); font-size: 0.9rem; }

.discount-badge {
    background: var(--berry);
    color: #fff;
    font-size: 0.75rem;
    border-radius: 4px;
    padding: 0.1rem 0.4rem;
}

.stock { font-size: 0.8rem; }
.stock.in-stock { color: var(--leaf-dark); }
.stock.out-of-stock { color: var(--muted); }

.favorite-toggle {
    position: absolute;
    top: 0.6rem;
    right: 0.6rem;
    width: 2.1rem;
    height: 2.1rem;
    border-radius: 50%;
    border: 1px solid var(--wheat);
    background: rgba(255, 255, 255, 0.9);
    font-size: 1.1rem;
    cursor: pointer;
}

.favorite-toggle.active { color: var(--berry); border-color: var(--berry); }

.empty-state {
    text-align: center;
    padding: 4rem 1rem;
    color: var(--muted);
}

.empty-state h3 { color: var(--ink); margin-bottom: 0.5rem; }

.listing-error {
    text-align: center;
    padding: 4rem 1rem;
}

.listing-error h2 { color: var(--berry); margin-bottom: 0.75rem; }
.error-message { color: var(--muted); margin-bottom: 1.5rem; }

.retry-button {
    padding: 0.75rem 1.75rem;
    background: var(--leaf);
    color: var(--cream);
    border: none;
    border-radius: 6px;
    font-size: 1rem;
    cursor: pointer;
}

.skeleton .skeleton-image {
    aspect-ratio: 1;
    background: linear-gradient(90deg, var(--wheat) 25%, #f1ebe0 50%, var(--wheat) 75%);
    background-size: 200% 100%;
    animation: shimmer 1.5s infinite;
}

.skeleton .skeleton-text {
    height: 0.9rem;
    margin: 0.75rem 1rem;
    border-radius: 4px;
    background: var(--wheat);
}

.skeleton .skeleton-text.short { width: 40%; }

@keyframes shimmer {
    0% { background-position: 200% 0; }
    100% { background-position: -200% 0; }
}

.detail-layout {
    display: grid;
    grid-template-columns: minmax(280px, 1fr) minmax(280px, 1fr);
    gap: 2.5rem;
    align-items: start;
}

.detail-image { width: 100%; height: auto; border-radius: 10px; background-size: cover; }
.detail-thumbs { display: flex; gap: 0.6rem; margin-top: 0.75rem; }
.detail-thumbs img { width: 80px; height: 80px; border-radius: 6px; object-fit: cover; }

.detail-info h1 { font-size: 2rem; margin: 0.3rem 0 0.75rem; }
.detail-info .favorite-toggle { position: static; margin: 0.75rem 0; }
.detail-description { margin: 1.25rem 0; }
.detail-description blockquote {
    border-left: 3px solid var(--wheat);
    padding-left: 1rem;
    color: var(--muted);
    font-style: italic;
}
.detail-tags { display: flex; gap: 0.5rem; flex-wrap: wrap; }
.detail-related { margin-top: 3rem; }
.detail-related h2 { margin-bottom: 1rem; }

.featured-strip {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(180px, 1fr));
    gap: 1.25rem;
}

.featured-card {
    text-decoration: none;
    color: var(--ink);
    border: 1px solid var(--wheat);
    border-radius: 10px;
    overflow: hidden;
    background: #fff;
}

.featured-card img { width: 100%; height: auto; display: block; }
.featured-card h3 { padding: 0.6rem 0.8rem 0.8rem; font-size: 0.95rem; }

@media (max-width: 720px) {
    .nav-links { display: none; }
    .view-toggle { margin-left: 0; }
}
"##;

/// Spin entry point.
#[cfg(target_arch = "wasm32")]
mod component {
    use super::{render_products_page, ListingParams};
    use larder_content::ContentApi;
    use larder_state::{FavoritesStore, KvStorage, MemoryStorage};
    use spin_sdk::http::{Method, Request, Response};
    use spin_sdk::http_component;

    #[http_component]
    async fn handle_products(req: Request) -> anyhow::Result<Response> {
        if *req.method() != Method::Get {
            return Ok(Response::builder().status(405).build());
        }

        let api = ContentApi::from_env()?;

        // "/products" is the listing; "/products/<slug>" is a detail page.
        let slug = req
            .path()
            .strip_prefix("/products")
            .map(|rest| rest.trim_matches('/'))
            .filter(|rest| !rest.is_empty());

        let html = match slug {
            Some(slug) => super::render_detail_page(&api, slug).await,
            None => {
                let params = ListingParams::from_query_string(req.query());

                // Favorites read from the platform store when available;
                // a page render must not fail because storage is down.
                match KvStorage::open_default() {
                    Ok(storage) => {
                        render_products_page(&api, FavoritesStore::open(storage), &params).await
                    }
                    Err(error) => {
                        tracing::warn!(%error, "favorites storage unavailable");
                        render_products_page(
                            &api,
                            FavoritesStore::open(MemoryStorage::new()),
                            &params,
                        )
                        .await
                    }
                }
            }
        };

        Ok(Response::builder()
            .status(200)
            .header("content-type", "text/html; charset=utf-8")
            .header("cache-control", "private, max-age=60")
            .body(html)
            .build())
    }
}
