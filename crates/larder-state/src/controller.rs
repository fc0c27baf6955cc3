//! The listing controller.
//!
//! Owns the filter state, the debounced search term, the two upstream
//! resources (catalog and search results), and the favorites store, and
//! recomputes the visible listing from them. It performs no I/O of its
//! own: the owner dispatches the fetches this controller asks for and
//! feeds the results back.

use crate::debounce::Debouncer;
use crate::favorites::FavoritesStore;
use crate::resource::{Resource, TaggedResource};
use crate::storage::KeyValueStorage;
use larder_catalog::catalog::ProductSummary;
use larder_catalog::ids::ProductId;
use larder_catalog::listing::{
    self, CategoryFilter, FilterState, SortKey, SourceKind, ViewMode,
};
use larder_content::ContentError;
use std::time::Instant;

/// What the controller resolves the listing to.
#[derive(Debug, PartialEq)]
pub enum ListingView<'a> {
    /// The chosen source has not answered yet.
    Loading,
    /// The fetch layer failed; the caller must render a visible error
    /// state with a manual retry, not fall back to an empty list.
    Failed(&'a ContentError),
    /// The ordered, filtered listing. May be empty; that is the
    /// explicit no-results state, distinct from `Loading`.
    Ready {
        products: Vec<&'a ProductSummary>,
        source: SourceKind,
    },
}

/// Stateful coordinator between filter state, data resources, and the
/// favorites store.
pub struct ListingController<S: KeyValueStorage> {
    filter: FilterState,
    sort: SortKey,
    view_mode: ViewMode,
    search_input: String,
    debouncer: Debouncer<String>,
    catalog: Resource<Vec<ProductSummary>>,
    search: TaggedResource<Vec<ProductSummary>>,
    favorites: FavoritesStore<S>,
}

impl<S: KeyValueStorage> ListingController<S> {
    /// A controller with no term and default filters.
    pub fn new(favorites: FavoritesStore<S>) -> Self {
        Self::with_term(String::new(), favorites)
    }

    /// A controller whose term is already settled (server-side rendering
    /// receives the term from the URL, stable by definition).
    pub fn with_term(term: String, favorites: FavoritesStore<S>) -> Self {
        Self {
            filter: FilterState::default(),
            sort: SortKey::default(),
            view_mode: ViewMode::default(),
            search_input: term.clone(),
            debouncer: Debouncer::new(term),
            catalog: Resource::Idle,
            search: TaggedResource::new(),
            favorites,
        }
    }

    // --- filter state ---

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.filter.category = category;
    }

    pub fn set_in_stock_only(&mut self, enabled: bool) {
        self.filter.in_stock_only = enabled;
    }

    pub fn set_on_sale_only(&mut self, enabled: bool) {
        self.filter.on_sale_only = enabled;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// Whether any filter or search term is active.
    pub fn has_active_filters(&self) -> bool {
        self.filter.is_active() || !self.term().is_empty()
    }

    /// Reset filters and the search term.
    pub fn clear_filters(&mut self) {
        self.filter.clear();
        self.search_input.clear();
        self.debouncer = Debouncer::new(String::new());
        self.search.reset();
    }

    // --- search term ---

    /// The raw input as typed.
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// The debounced term the listing runs on.
    pub fn term(&self) -> &str {
        self.debouncer.value()
    }

    /// Feed a keystroke. Nothing fetches until the term settles.
    pub fn set_search_input(&mut self, raw: impl Into<String>, now: Instant) {
        self.search_input = raw.into();
        self.debouncer.input(self.search_input.clone(), now);
    }

    /// Advance the debounce timer and return the search term the owner
    /// should fetch now, if any. Marks that term as in flight, so the
    /// same request is not handed out twice.
    pub fn tick(&mut self, now: Instant) -> Option<String> {
        if self.debouncer.poll(now).is_some() && !self.wants_search() {
            // Term settled below the minimum: search results are stale.
            self.search.reset();
        }
        self.take_search_request()
    }

    fn wants_search(&self) -> bool {
        SourceKind::for_term(self.term()) == SourceKind::SearchResults
    }

    fn take_search_request(&mut self) -> Option<String> {
        if !self.wants_search() {
            return None;
        }
        let term = self.term().to_string();
        if self.search.tag() == term && !self.search.state().is_idle() {
            return None;
        }
        self.search.begin(term.clone());
        Some(term)
    }

    // --- data feeds ---

    /// Mark the catalog fetch as dispatched.
    pub fn begin_catalog_load(&mut self) {
        self.catalog = Resource::Loading;
    }

    /// Settle the catalog fetch.
    pub fn apply_catalog(&mut self, result: Result<Vec<ProductSummary>, ContentError>) {
        self.catalog.settle(result);
    }

    /// Settle a search fetch for the term it was issued with. Responses
    /// whose term has been superseded are discarded.
    pub fn apply_search(
        &mut self,
        term: &str,
        result: Result<Vec<ProductSummary>, ContentError>,
    ) -> bool {
        self.search.apply(term, result)
    }

    // --- favorites ---

    pub fn favorites(&self) -> &FavoritesStore<S> {
        &self.favorites
    }

    pub fn is_favorite(&self, id: &ProductId) -> bool {
        self.favorites.is_favorite(id)
    }

    pub fn toggle_favorite(&mut self, id: ProductId) -> bool {
        self.favorites.toggle(id)
    }

    // --- output ---

    /// Recompute the visible listing. Pure function of the current
    /// inputs; no hidden state, no side effects.
    pub fn view(&self) -> ListingView<'_> {
        let term = self.term();
        let source = match SourceKind::for_term(term) {
            SourceKind::Catalog => &self.catalog,
            SourceKind::SearchResults => self.search.state(),
        };

        match source {
            Resource::Failed(error) => ListingView::Failed(error),
            Resource::Idle | Resource::Loading => ListingView::Loading,
            Resource::Ready(_) => {
                let catalog = self.catalog.value().map(Vec::as_slice);
                let search = self.search.value_for(term).map(Vec::as_slice);
                let products = listing::compose(term, catalog, search, &self.filter, self.sort);
                ListingView::Ready {
                    products,
                    source: SourceKind::for_term(term),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use larder_catalog::catalog::{
        CategoryRef, Dimensions, Image, ImageAsset, ImageMetadata, Slug,
    };
    use larder_catalog::ids::AssetId;
    use larder_catalog::money::Currency;
    use std::time::Duration;

    fn image() -> Image {
        Image {
            asset: ImageAsset {
                id: AssetId::new("image-1"),
                url: String::new(),
                metadata: ImageMetadata {
                    dimensions: Dimensions {
                        width: 1,
                        height: 1,
                    },
                    lqip: None,
                },
            },
            alt: None,
            caption: None,
            hotspot: None,
            crop: None,
        }
    }

    fn summary(
        id: &str,
        title: &str,
        price: i64,
        sale: Option<i64>,
        in_stock: bool,
        category: &str,
    ) -> ProductSummary {
        ProductSummary {
            id: id.into(),
            title: title.to_string(),
            slug: Slug::new(id),
            main_image: image(),
            price,
            sale_price: sale,
            currency: Currency::USD,
            in_stock,
            featured: false,
            published_at: "2025-01-01T00:00:00Z".parse().unwrap(),
            category: Some(CategoryRef {
                id: category.into(),
                title: category.to_string(),
                slug: Slug::new(category),
            }),
        }
    }

    /// The two-product catalog from the acceptance scenarios.
    fn catalog() -> Vec<ProductSummary> {
        vec![
            summary("1", "Zed", 500, None, true, "A"),
            summary("2", "Ann", 300, Some(200), false, "B"),
        ]
    }

    fn controller() -> ListingController<MemoryStorage> {
        ListingController::new(FavoritesStore::open(MemoryStorage::new()))
    }

    fn ready_ids(view: &ListingView<'_>) -> Vec<String> {
        match view {
            ListingView::Ready { products, .. } => {
                products.iter().map(|p| p.id.to_string()).collect()
            }
            other => panic!("expected ready view, got {:?}", other),
        }
    }

    #[test]
    fn test_loading_until_catalog_arrives() {
        let mut ctrl = controller();
        assert_eq!(ctrl.view(), ListingView::Loading);

        ctrl.begin_catalog_load();
        assert_eq!(ctrl.view(), ListingView::Loading);

        ctrl.apply_catalog(Ok(catalog()));
        assert_eq!(ready_ids(&ctrl.view()), vec!["1", "2"]);
    }

    #[test]
    fn test_fetch_error_is_surfaced() {
        let mut ctrl = controller();
        ctrl.apply_catalog(Err(ContentError::Http {
            status: 502,
            query: "all-products".to_string(),
        }));

        match ctrl.view() {
            ListingView::Failed(error) => assert_eq!(error.status_code(), Some(502)),
            other => panic!("expected failed view, got {:?}", other),
        }
    }

    #[test]
    fn test_sale_only_scenario() {
        let mut ctrl = controller();
        ctrl.apply_catalog(Ok(catalog()));
        ctrl.set_on_sale_only(true);
        ctrl.set_sort(SortKey::NameAz);

        assert_eq!(ready_ids(&ctrl.view()), vec!["2"]);
    }

    #[test]
    fn test_stock_only_scenario() {
        let mut ctrl = controller();
        ctrl.apply_catalog(Ok(catalog()));
        ctrl.set_in_stock_only(true);
        ctrl.set_sort(SortKey::PriceLow);

        assert_eq!(ready_ids(&ctrl.view()), vec!["1"]);
    }

    #[test]
    fn test_category_filter() {
        let mut ctrl = controller();
        ctrl.apply_catalog(Ok(catalog()));
        ctrl.set_category(CategoryFilter::Only("B".into()));

        assert_eq!(ready_ids(&ctrl.view()), vec!["2"]);
    }

    #[test]
    fn test_empty_result_is_ready_not_loading() {
        let mut ctrl = controller();
        ctrl.apply_catalog(Ok(catalog()));
        ctrl.set_category(CategoryFilter::Only("missing".into()));

        match ctrl.view() {
            ListingView::Ready { products, .. } => assert!(products.is_empty()),
            other => panic!("expected ready view, got {:?}", other),
        }
    }

    #[test]
    fn test_short_term_uses_catalog() {
        let now = Instant::now();
        let mut ctrl = controller();
        ctrl.apply_catalog(Ok(catalog()));

        ctrl.set_search_input("z", now);
        assert_eq!(ctrl.tick(now + Duration::from_millis(300)), None);

        match ctrl.view() {
            ListingView::Ready { source, .. } => assert_eq!(source, SourceKind::Catalog),
            other => panic!("expected ready view, got {:?}", other),
        }
    }

    #[test]
    fn test_search_flow() {
        let now = Instant::now();
        let mut ctrl = controller();
        ctrl.apply_catalog(Ok(catalog()));

        ctrl.set_search_input("ann", now);
        // Not settled yet: still the catalog listing.
        assert_eq!(ctrl.tick(now + Duration::from_millis(100)), None);
        assert_eq!(ready_ids(&ctrl.view()), vec!["1", "2"]);

        // Settles at 300ms and asks for exactly one fetch.
        let request = ctrl.tick(now + Duration::from_millis(300));
        assert_eq!(request.as_deref(), Some("ann"));
        assert_eq!(ctrl.tick(now + Duration::from_millis(301)), None);

        // Search source chosen but still loading.
        assert_eq!(ctrl.view(), ListingView::Loading);

        assert!(ctrl.apply_search("ann", Ok(vec![catalog().remove(1)])));
        match ctrl.view() {
            ListingView::Ready { products, source } => {
                assert_eq!(source, SourceKind::SearchResults);
                assert_eq!(products.len(), 1);
                assert_eq!(products[0].id.as_str(), "2");
            }
            other => panic!("expected ready view, got {:?}", other),
        }
    }

    #[test]
    fn test_stale_search_response_discarded() {
        let now = Instant::now();
        let mut ctrl = controller();
        ctrl.apply_catalog(Ok(catalog()));

        ctrl.set_search_input("ab", now);
        let first = ctrl.tick(now + Duration::from_millis(300));
        assert_eq!(first.as_deref(), Some("ab"));

        // The term moves on before the response lands.
        ctrl.set_search_input("abc", now + Duration::from_millis(350));
        let second = ctrl.tick(now + Duration::from_millis(650));
        assert_eq!(second.as_deref(), Some("abc"));

        // Slow response for the superseded term: dropped.
        assert!(!ctrl.apply_search("ab", Ok(catalog())));
        assert_eq!(ctrl.view(), ListingView::Loading);

        assert!(ctrl.apply_search("abc", Ok(vec![])));
        match ctrl.view() {
            ListingView::Ready { products, .. } => assert!(products.is_empty()),
            other => panic!("expected ready view, got {:?}", other),
        }
    }

    #[test]
    fn test_term_dropping_below_minimum_restores_catalog() {
        let now = Instant::now();
        let mut ctrl = controller();
        ctrl.apply_catalog(Ok(catalog()));

        ctrl.set_search_input("ann", now);
        let term = ctrl.tick(now + Duration::from_millis(300)).unwrap();
        ctrl.apply_search(&term, Ok(vec![]));

        ctrl.set_search_input("a", now + Duration::from_millis(400));
        assert_eq!(ctrl.tick(now + Duration::from_millis(700)), None);

        assert_eq!(ready_ids(&ctrl.view()), vec!["1", "2"]);
    }

    #[test]
    fn test_clear_filters() {
        let now = Instant::now();
        let mut ctrl = controller();
        ctrl.apply_catalog(Ok(catalog()));
        ctrl.set_in_stock_only(true);
        ctrl.set_search_input("ann", now);
        ctrl.tick(now + Duration::from_millis(300));
        assert!(ctrl.has_active_filters());

        ctrl.clear_filters();
        assert!(!ctrl.has_active_filters());
        assert_eq!(ctrl.term(), "");
        assert_eq!(ready_ids(&ctrl.view()), vec!["1", "2"]);
    }

    #[test]
    fn test_favorites_pass_through() {
        let mut ctrl = controller();
        let id = ProductId::new("prod-1");

        assert!(ctrl.toggle_favorite(id.clone()));
        assert!(ctrl.is_favorite(&id));
        assert!(!ctrl.toggle_favorite(id.clone()));
        assert!(!ctrl.is_favorite(&id));
    }

    #[test]
    fn test_ssr_construction_with_settled_term() {
        let mut ctrl = ListingController::with_term(
            "sourdough".to_string(),
            FavoritesStore::open(MemoryStorage::new()),
        );
        ctrl.apply_catalog(Ok(catalog()));

        // The term is settled; the first tick asks for the fetch.
        let request = ctrl.tick(Instant::now());
        assert_eq!(request.as_deref(), Some("sourdough"));
    }
}
