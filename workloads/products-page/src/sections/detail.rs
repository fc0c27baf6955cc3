//! Product detail section: gallery, price, rich-text description,
//! related products.

use larder_catalog::catalog::{plain_text, Block, ListKind, Mark, Product, ProductSummary, Span};
use larder_content::{lqip_url, product_image_url};
use larder_pages::html_escape;

/// Render the product detail section.
pub fn render_detail(product: &Product, related: &[ProductSummary]) -> String {
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

    let tags_html: String = product
        .tags
        .iter()
        .map(|tag| format!(r#"<span class="badge">{}</span>"#, html_escape(tag)))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        r#"<section class="product-detail" data-section="detail" data-product-id="{id}">
    <div class="detail-layout">
        {gallery}
        <div class="detail-info">
            <a href="/products?category={category_id}" class="card-category">{category}</a>
            <h1>{title}</h1>
            <div class="card-price">{price}</div>
            {stock}
            <button class="favorite-toggle" data-product-id="{id}" aria-pressed="false"
                    aria-label="Toggle favorite">&#9825;</button>
            <div class="detail-description">
{description}            </div>
            <div class="detail-tags">{tags}</div>
        </div>
    </div>
    {related}
</section>"#,
        id = html_escape(product.id.as_str()),
        gallery = render_gallery(product),
        category_id = html_escape(product.category.id.as_str()),
        category = html_escape(&product.category.title),
        title = html_escape(&product.title),
        price = price_html,
        stock = stock_html,
        description = render_blocks(&product.description),
        tags = tags_html,
        related = render_related(related),
    )
}

/// Main image plus gallery thumbnails.
fn render_gallery(product: &Product) -> String {
    let main = format!(
        r#"        <img class="detail-image" src="{}" alt="{}"
             style="background-image: url('{}')" width="800" height="800">
"#,
        html_escape(&product_image_url(&product.main_image.asset, 800, 800)),
        html_escape(product.main_image.alt_or(&product.title)),
        html_escape(&lqip_url(&product.main_image.asset)),
    );

    let thumbs: String = product
        .gallery_images
        .iter()
        .map(|image| {
            format!(
                r#"            <img src="{}" alt="{}" loading="lazy" width="160" height="160">
"#,
                html_escape(&product_image_url(&image.asset, 160, 160)),
                html_escape(image.alt_or(&product.title)),
            )
        })
        .collect();

    let thumbs_html = if thumbs.is_empty() {
        String::new()
    } else {
        format!(
            r#"        <div class="detail-thumbs">
{}        </div>
"#,
            thumbs
        )
    };

    format!(
        r#"<div class="detail-gallery">
{}{}    </div>"#,
        main, thumbs_html
    )
}

/// Render rich-text blocks by kind. Consecutive list items of the same
/// kind share one list element.
pub fn render_blocks(blocks: &[Block]) -> String {
    let mut html = String::new();
    let mut open_list: Option<ListKind> = None;

    for block in blocks {
        let next_list = match block {
            Block::ListItem { kind, .. } => Some(*kind),
            _ => None,
        };
        if open_list != next_list {
            if let Some(kind) = open_list {
                html.push_str(close_list_tag(kind));
            }
            if let Some(kind) = next_list {
                html.push_str(open_list_tag(kind));
            }
            open_list = next_list;
        }

        match block {
            Block::Paragraph(spans) => {
                html.push_str(&format!("<p>{}</p>\n", render_spans(spans)));
            }
            Block::Heading { level, spans } => {
                html.push_str(&format!(
                    "<h{level}>{}</h{level}>\n",
                    render_spans(spans),
                    level = level
                ));
            }
            Block::Quote(spans) => {
                html.push_str(&format!(
                    "<blockquote>{}</blockquote>\n",
                    render_spans(spans)
                ));
            }
            Block::ListItem { spans, .. } => {
                html.push_str(&format!("<li>{}</li>\n", render_spans(spans)));
            }
        }
    }

    if let Some(kind) = open_list {
        html.push_str(close_list_tag(kind));
    }

    html
}

fn open_list_tag(kind: ListKind) -> &'static str {
    match kind {
        ListKind::Bullet => "<ul>\n",
        ListKind::Number => "<ol>\n",
    }
}

fn close_list_tag(kind: ListKind) -> &'static str {
    match kind {
        ListKind::Bullet => "</ul>\n",
        ListKind::Number => "</ol>\n",
    }
}

fn render_spans(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| {
            let mut text = html_escape(&span.text);
            for mark in &span.marks {
                let (open, close) = mark_tags(*mark);
                text = format!("{}{}{}", open, text, close);
            }
            text
        })
        .collect()
}

fn mark_tags(mark: Mark) -> (&'static str, &'static str) {
    match mark {
        Mark::Strong => ("<strong>", "</strong>"),
        Mark::Emphasis => ("<em>", "</em>"),
        Mark::Code => ("<code>", "</code>"),
        Mark::Underline => ("<u>", "</u>"),
        Mark::Strike => ("<s>", "</s>"),
    }
}

/// Related products strip under the detail layout.
fn render_related(related: &[ProductSummary]) -> String {
    if related.is_empty() {
        return String::new();
    }

    let cards: String = related
        .iter()
        .map(|p| {
            format!(
                r#"        <a class="featured-card" href="/products/{}">
            <img src="{}" alt="{}" loading="lazy" width="240" height="240">
            <h3>{}</h3>
        </a>
"#,
                html_escape(p.slug.as_str()),
                html_escape(&product_image_url(&p.main_image.asset, 240, 240)),
                html_escape(p.main_image.alt_or(&p.title)),
                html_escape(&p.title),
            )
        })
        .collect();

    format!(
        r#"<div class="detail-related">
        <h2>You might also like</h2>
        <div class="featured-strip">
{}        </div>
    </div>"#,
        cards
    )
}

/// Not-found state for an unknown or unpublished slug.
pub fn render_not_found(slug: &str) -> String {
    format!(
        r#"<section class="listing-error" data-section="detail">
    <h2>Product Not Found</h2>
    <p class="error-message">Nothing on the shelves at &quot;{}&quot;. It may have sold out for the season.</p>
    <a href="/products" class="retry-button">Back to the Catalog</a>
</section>"#,
        html_escape(slug)
    )
}

/// Meta description derived from the rich-text body.
pub fn meta_description(product: &Product) -> String {
    let text = plain_text(&product.description);
    let mut description: String = text.chars().take(157).collect();
    if text.chars().count() > 157 {
        description.push_str("...");
    }
    description
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_blocks_dispatch() {
        let blocks = vec![
            Block::Heading {
                level: 2,
                spans: vec![Span::plain("Tasting notes")],
            },
            Block::Paragraph(vec![
                Span::plain("Bright, floral, "),
                Span {
                    text: "unfiltered".to_string(),
                    marks: vec![Mark::Strong],
                },
            ]),
            Block::Quote(vec![Span::plain("tastes like June")]),
        ];
        let html = render_blocks(&blocks);

        assert!(html.contains("<h2>Tasting notes</h2>"));
        assert!(html.contains("<p>Bright, floral, <strong>unfiltered</strong></p>"));
        assert!(html.contains("<blockquote>tastes like June</blockquote>"));
    }

    #[test]
    fn test_consecutive_list_items_share_list() {
        let blocks = vec![
            Block::ListItem {
                kind: ListKind::Bullet,
                spans: vec![Span::plain("Toast")],
            },
            Block::ListItem {
                kind: ListKind::Bullet,
                spans: vec![Span::plain("Yogurt")],
            },
            Block::Paragraph(vec![Span::plain("Keep refrigerated.")]),
        ];
        let html = render_blocks(&blocks);

        assert_eq!(html.matches("<ul>").count(), 1);
        assert_eq!(html.matches("</ul>").count(), 1);
        assert!(html.contains("<li>Toast</li>"));
        assert!(html.contains("<li>Yogurt</li>"));
        let ul_close = html.find("</ul>").unwrap();
        let para = html.find("<p>Keep refrigerated.").unwrap();
        assert!(ul_close < para);
    }

    #[test]
    fn test_spans_are_escaped() {
        let blocks = vec![Block::Paragraph(vec![Span::plain("Brie & <cheddar>")])];
        let html = render_blocks(&blocks);
        assert!(html.contains("Brie &amp; &lt;cheddar&gt;"));
    }

    #[test]
    fn test_not_found_links_back() {
        let html = render_not_found("gone-for-winter");
        assert!(html.contains("Product Not Found"));
        assert!(html.contains("gone-for-winter"));
        assert!(html.contains(r#"href="/products""#));
    }
}
