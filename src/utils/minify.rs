//! Page minification.

use crate::config::SiteConfig;
use std::borrow::Cow;

/// Minify the rendered page when `[build] minify` is on.
///
/// Inline `<style>` and `<script>` blocks are minified along with the markup.
pub fn minify_page<'a>(html: &'a [u8], config: &SiteConfig) -> Cow<'a, [u8]> {
    if !config.build.minify {
        return Cow::Borrowed(html);
    }

    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    Cow::Owned(minify_html::minify(html, &cfg))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_minify(enabled: bool) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.build.minify = enabled;
        config
    }

    const PAGE: &[u8] = b"<html>\n  <body>\n    <!-- hero -->\n    <p>Hello World</p>\n  </body>\n</html>";

    #[test]
    fn test_minify_strips_whitespace_and_comments() {
        let out = minify_page(PAGE, &config_with_minify(true));
        let out = String::from_utf8_lossy(&out);

        assert!(out.len() < PAGE.len());
        assert!(!out.contains("<!--"));
        assert!(out.contains("<p>Hello World</p>"));
    }

    #[test]
    fn test_minify_rendered_page() {
        let config = config_with_minify(true);
        let content = crate::content::SiteContent::embedded().unwrap();
        let html = crate::render::render_page(&config, &content);

        let out = minify_page(html.as_bytes(), &config);
        let out = String::from_utf8_lossy(&out);

        assert!(out.len() < html.len());
        assert!(out.contains("panel-close"));
        assert!(out.contains("transitionend"));
    }

    #[test]
    fn test_minify_disabled_borrows() {
        let out = minify_page(PAGE, &config_with_minify(false));
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(&*out, PAGE);
    }
}
