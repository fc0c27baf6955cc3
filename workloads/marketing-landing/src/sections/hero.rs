//! Hero banner section.

use crate::data::HeroContent;
use larder_pages::html_escape;

/// Render the hero banner section.
pub fn render_hero(content: &HeroContent) -> String {
    let bg_style = content
        .background_image
        .as_ref()
        .map(|url| format!(r#" style="background-image: url('{}')""#, html_escape(url)))
        .unwrap_or_default();

    format!(
        r#"<section class="hero" data-section="hero"{}>
    <div class="hero-content">
        <h1 class="hero-headline">{}</h1>
        <p class="hero-subheadline">{}</p>
        <a href="{}" class="hero-cta">{}</a>
    </div>
</section>"#,
        bg_style,
        html_escape(&content.headline),
        html_escape(&content.subheadline),
        html_escape(&content.cta_url),
        html_escape(&content.cta_text)
    )
}
