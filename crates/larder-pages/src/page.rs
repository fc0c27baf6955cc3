//! Page assembly from named sections.

use crate::shell::Shell;

/// Collects named sections between a shell's opening and closing HTML.
#[derive(Debug)]
pub struct PageBuilder {
    shell: Shell,
    sections: Vec<(String, String)>,
}

impl PageBuilder {
    /// Start a page with the given shell.
    pub fn new(shell: Shell) -> Self {
        Self {
            shell,
            sections: Vec::new(),
        }
    }

    /// Append a named section. The name lands on a wrapper comment so
    /// rendered output stays attributable during debugging.
    pub fn section(&mut self, name: &str, html: &str) -> &mut Self {
        self.sections.push((name.to_string(), html.to_string()));
        self
    }

    /// Names of the sections added so far, in order.
    pub fn section_names(&self) -> Vec<&str> {
        self.sections.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Render the complete page.
    pub fn render(&self) -> String {
        let mut html = self.shell.render_opening();
        for (name, section) in &self.sections {
            html.push_str(&format!("<!-- section: {} -->\n", name));
            html.push_str(section);
            html.push('\n');
        }
        html.push_str(&self.shell.render_closing());
        html
    }
}

/// Escape text for interpolation into HTML.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::HeadContent;

    #[test]
    fn test_sections_render_in_order() {
        let mut page = PageBuilder::new(Shell::new(HeadContent::new("Home")));
        page.section("hero", "<section>hero</section>");
        page.section("cta", "<section>cta</section>");

        let html = page.render();
        assert_eq!(page.section_names(), vec!["hero", "cta"]);

        let hero_at = html.find("hero</section>").unwrap();
        let cta_at = html.find("cta</section>").unwrap();
        assert!(hero_at < cta_at);
        assert!(html.contains("<!-- section: hero -->"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"Brie & "special" <offer>"#),
            "Brie &amp; &quot;special&quot; &lt;offer&gt;"
        );
    }
}
