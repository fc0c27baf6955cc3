//! The listing pipeline: source selection, filtering, sorting.
//!
//! Everything here is a pure function of its inputs. The stateful
//! controller that feeds it lives in `larder-state`; presentation
//! consumes the ordered output.

mod filter;
mod sort;

pub use filter::{
    apply_filters, CategoryFilter, FilterState, ListingSource, SourceKind, ViewMode,
    MIN_SEARCH_TERM_LEN,
};
pub use sort::{sort_listing, SortKey};

use crate::catalog::ProductSummary;

/// Run the full pipeline: choose the working set for the term, apply the
/// enabled filters, sort with a stable comparator.
pub fn compose<'a>(
    term: &str,
    catalog: Option<&'a [ProductSummary]>,
    search: Option<&'a [ProductSummary]>,
    filter: &FilterState,
    sort: SortKey,
) -> Vec<&'a ProductSummary> {
    let source = ListingSource::select(term, catalog, search);
    let mut items = apply_filters(source.items(), filter);
    sort_listing(&mut items, sort);
    items
}
