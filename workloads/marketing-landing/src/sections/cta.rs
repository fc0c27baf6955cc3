//! Call-to-action banner.

use crate::data::CtaContent;
use larder_pages::html_escape;

/// Render the CTA banner.
pub fn render_cta(content: &CtaContent) -> String {
    let secondary = match (&content.secondary_cta_text, &content.secondary_cta_url) {
        (Some(text), Some(url)) => format!(
            r#"
        <a href="{}" class="cta-secondary">{}</a>"#,
            html_escape(url),
            html_escape(text)
        ),
        _ => String::new(),
    };

    format!(
        r#"<section class="cta-banner" data-section="cta">
    <div class="cta-content">
        <h2 class="cta-headline">{}</h2>
        <p class="cta-subheadline">{}</p>
        <div class="cta-buttons">
        <a href="{}" class="cta-primary">{}</a>{}
        </div>
    </div>
</section>"#,
        html_escape(&content.headline),
        html_escape(&content.subheadline),
        html_escape(&content.primary_cta_url),
        html_escape(&content.primary_cta_text),
        secondary
    )
}
