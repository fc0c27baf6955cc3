//! Testimonials section.

use crate::data::TestimonialsContent;
use larder_pages::html_escape;

/// Render the testimonials section.
pub fn render_testimonials(content: &TestimonialsContent) -> String {
    let cards: String = content
        .testimonials
        .iter()
        .map(|t| {
            let initial = t.author_name.chars().next().unwrap_or('?');
            format!(
                r#"        <div class="testimonial-card">
            <blockquote class="testimonial-quote">{}</blockquote>
            <div class="testimonial-author">
                <div class="testimonial-avatar">{}</div>
                <div>
                    <div class="author-name">{}</div>
                    <div class="author-detail">{}</div>
                </div>
            </div>
        </div>
"#,
                html_escape(&t.quote),
                initial,
                html_escape(&t.author_name),
                html_escape(&t.author_detail)
            )
        })
        .collect();

    format!(
        r#"<section class="testimonials" data-section="testimonials">
    <div class="section-header">
        <h2>{}</h2>
    </div>
    <div class="testimonials-grid">
{}    </div>
</section>"#,
        html_escape(&content.section_title),
        cards
    )
}
