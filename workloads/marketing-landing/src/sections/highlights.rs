//! Why-shop-here highlight cards.

use crate::data::HighlightsContent;
use larder_pages::html_escape;

/// Render the highlights section.
pub fn render_highlights(content: &HighlightsContent) -> String {
    let cards: String = content
        .highlights
        .iter()
        .map(|h| {
            format!(
                r#"        <div class="highlight-card">
            <span class="highlight-icon">{}</span>
            <h3 class="highlight-title">{}</h3>
            <p class="highlight-description">{}</p>
        </div>
"#,
                h.icon,
                html_escape(&h.title),
                html_escape(&h.description)
            )
        })
        .collect();

    format!(
        r#"<section class="highlights" data-section="highlights">
    <div class="section-header">
        <h2>{}</h2>
        <p>{}</p>
    </div>
    <div class="highlights-grid">
{}    </div>
</section>"#,
        html_escape(&content.section_title),
        html_escape(&content.section_subtitle),
        cards
    )
}
