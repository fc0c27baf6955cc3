//! Filter controls and active-filter badges.

use crate::params::ListingParams;
use larder_catalog::catalog::Category;
use larder_catalog::listing::{SortKey, ViewMode};
use larder_pages::html_escape;

/// Render the filter control row.
///
/// The controls are a GET form over the same page, so filtering works
/// before hydration; the inline script upgrades them in place.
pub fn render_filters(params: &ListingParams, categories: &[Category]) -> String {
    let category_options: String = categories
        .iter()
        .map(|c| {
            let selected = if params.category.as_deref() == Some(c.id.as_str()) {
                " selected"
            } else {
                ""
            };
            format!(
                r#"            <option value="{}"{}>{}</option>
"#,
                html_escape(c.id.as_str()),
                selected,
                html_escape(&c.title)
            )
        })
        .collect();

    let sort_options: String = SortKey::all()
        .iter()
        .map(|key| {
            let selected = if *key == params.sort { " selected" } else { "" };
            format!(
                r#"            <option value="{}"{}>{}</option>
"#,
                key.as_str(),
                selected,
                key.display_name()
            )
        })
        .collect();

    format!(
        r#"<section class="listing-filters" data-section="filters">
    <form id="filter-form" method="GET" action="/products">
        <input type="hidden" name="q" value="{term}">
        <select name="category" aria-label="Category">
            <option value="all">All Categories</option>
{category_options}        </select>
        <select name="sort" aria-label="Sort order">
{sort_options}        </select>
        <button type="submit" name="stock" value="{stock_value}" class="toggle{stock_class}">In Stock Only</button>
        <button type="submit" name="sale" value="{sale_value}" class="toggle{sale_class}">On Sale Only</button>
        <div class="view-toggle">
            <button type="submit" name="view" value="grid" class="{grid_class}" aria-label="Grid view">&#9638;</button>
            <button type="submit" name="view" value="list" class="{list_class}" aria-label="List view">&#9776;</button>
        </div>
    </form>
{badges}</section>"#,
        term = html_escape(&params.term),
        category_options = category_options,
        sort_options = sort_options,
        stock_value = if params.in_stock_only { "0" } else { "1" },
        stock_class = if params.in_stock_only { " active" } else { "" },
        sale_value = if params.on_sale_only { "0" } else { "1" },
        sale_class = if params.on_sale_only { " active" } else { "" },
        grid_class = if params.view == ViewMode::Grid { "active" } else { "" },
        list_class = if params.view == ViewMode::List { "active" } else { "" },
        badges = render_active_badges(params, categories),
    )
}

/// Active filter badges with a clear-all affordance.
fn render_active_badges(params: &ListingParams, categories: &[Category]) -> String {
    let mut badges = Vec::new();

    if !params.term.is_empty() {
        badges.push(format!(
            r#"<span class="badge">Search: &quot;{}&quot;</span>"#,
            html_escape(&params.term)
        ));
    }
    if let Some(id) = &params.category {
        let title = categories
            .iter()
            .find(|c| c.id.as_str() == id)
            .map(|c| c.title.as_str())
            .unwrap_or(id.as_str());
        badges.push(format!(
            r#"<span class="badge">Category: {}</span>"#,
            html_escape(title)
        ));
    }
    if params.in_stock_only {
        badges.push(r#"<span class="badge">In Stock</span>"#.to_string());
    }
    if params.on_sale_only {
        badges.push(r#"<span class="badge">On Sale</span>"#.to_string());
    }

    if badges.is_empty() {
        return String::new();
    }

    format!(
        r#"    <div class="active-filters">
        <span class="active-label">Active filters:</span>
        {}
        <a href="/products" class="clear-filters">Clear all filters</a>
    </div>
"#,
        badges.join("\n        ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<Category> {
        vec![
            Category::new("cat-bread", "Bread", "bread"),
            Category::new("cat-pantry", "Pantry", "pantry"),
        ]
    }

    #[test]
    fn test_selected_category_marked() {
        let params = ListingParams {
            category: Some("cat-pantry".to_string()),
            ..Default::default()
        };
        let html = render_filters(&params, &categories());
        assert!(html.contains(r#"<option value="cat-pantry" selected>Pantry</option>"#));
        assert!(html.contains(r#"<option value="cat-bread">Bread</option>"#));
    }

    #[test]
    fn test_badges_only_for_active_filters() {
        let html = render_filters(&ListingParams::default(), &categories());
        assert!(!html.contains("active-filters"));

        let params = ListingParams {
            term: "jam".to_string(),
            in_stock_only: true,
            ..Default::default()
        };
        let html = render_filters(&params, &categories());
        assert!(html.contains("Active filters:"));
        assert!(html.contains("Search: &quot;jam&quot;"));
        assert!(html.contains(r#"<span class="badge">In Stock</span>"#));
        assert!(html.contains("Clear all filters"));
    }

    #[test]
    fn test_badge_uses_category_title() {
        let params = ListingParams {
            category: Some("cat-bread".to_string()),
            ..Default::default()
        };
        let html = render_filters(&params, &categories());
        assert!(html.contains("Category: Bread"));
    }
}
