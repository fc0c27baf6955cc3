//! Newsletter signup form.

/// Render the newsletter signup section. Contains a form; the inline
/// script handles submission so the cached page stays static.
pub fn render_newsletter() -> String {
    r#"<section class="newsletter" data-section="newsletter">
    <div class="newsletter-content">
        <h2>First pick of the harvest</h2>
        <p>One short email on Thursdays: what's arriving, what's on sale, and what the bakers are trying next.</p>
        <form id="newsletter-form" class="newsletter-form">
            <div class="form-group">
                <input type="email" name="email" placeholder="you@example.com" required aria-label="Email address">
                <button type="submit">Subscribe</button>
            </div>
        </form>
        <div class="newsletter-success" hidden>
            <p>You're on the list. See you Thursday.</p>
        </div>
        <div class="newsletter-error" hidden>
            <p class="error-message">Something went wrong. Please try again.</p>
        </div>
        <p class="privacy-note">No recipes for spam. Unsubscribe any time.</p>
    </div>
</section>"#
        .to_string()
}
