//! CommonMark compilation of post bodies.

use pulldown_cmark::{Options, Parser, html};

/// Compile markdown source into HTML.
///
/// Never fails: malformed input still renders as best-effort HTML.
pub fn compile_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(source, options);
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading() {
        assert_eq!(compile_markdown("# Hi"), "<h1>Hi</h1>\n");
    }

    #[test]
    fn test_paragraph_and_emphasis() {
        let html = compile_markdown("some *text* here");
        assert_eq!(html, "<p>some <em>text</em> here</p>\n");
    }

    #[test]
    fn test_unclosed_markup_still_renders() {
        let html = compile_markdown("**never closed\n\n```\nfenced");
        assert!(html.contains("never closed"));
        assert!(html.contains("<code>"));
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(compile_markdown(""), "");
    }
}
