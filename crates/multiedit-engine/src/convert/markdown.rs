use pulldown_cmark::{Options, Parser, html};
use serde::{Deserialize, Serialize};

/// Markdown extensions enabled when rendering to HTML.
///
/// Raw HTML always passes through. pulldown-cmark's own math extension is
/// never enabled; `$` spans are handled by [`crate::MathWrapping`] on the
/// rendered output instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownOptions {
    /// Curly quotes, dashes and ellipses.
    pub smart_punctuation: bool,
    /// `~sub~`
    pub subscript: bool,
    /// `^sup^`
    pub superscript: bool,
    /// `~~struck~~`
    pub strikethrough: bool,
    pub tables: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            smart_punctuation: true,
            subscript: true,
            superscript: true,
            strikethrough: true,
            tables: true,
        }
    }
}

impl MarkdownOptions {
    pub fn parser_options(&self) -> Options {
        let mut options = Options::empty();
        options.set(Options::ENABLE_SMART_PUNCTUATION, self.smart_punctuation);
        options.set(Options::ENABLE_SUBSCRIPT, self.subscript);
        options.set(Options::ENABLE_SUPERSCRIPT, self.superscript);
        options.set(Options::ENABLE_STRIKETHROUGH, self.strikethrough);
        options.set(Options::ENABLE_TABLES, self.tables);
        options
    }
}

/// Renders Markdown to HTML without any math handling.
pub fn render_markdown(markdown: &str, options: &MarkdownOptions) -> String {
    let parser = Parser::new_ext(markdown, options.parser_options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(markdown: &str) -> String {
        render_markdown(markdown, &MarkdownOptions::default())
    }

    #[test]
    fn renders_basic_markdown() {
        assert_eq!(render("Hello *world*"), "<p>Hello <em>world</em></p>\n");
        assert_eq!(render("# Title"), "<h1>Title</h1>\n");
    }

    #[test]
    fn raw_html_passes_through() {
        assert_eq!(render("<u>under</u>"), "<p><u>under</u></p>\n");
    }

    #[test]
    fn dollars_are_left_for_the_math_pass() {
        assert_eq!(render("$x$"), "<p>$x$</p>\n");
    }

    #[test]
    fn subscript_superscript_and_strikethrough() {
        let html = render("H~2~O, x^2^ and ~~old~~");
        assert!(html.contains("<sub>2</sub>"), "{html}");
        assert!(html.contains("<sup>2</sup>"), "{html}");
        assert!(html.contains("<del>old</del>"), "{html}");
    }

    #[test]
    fn smart_punctuation_can_be_turned_off() {
        let source = "\"quoted\"";
        assert!(render(source).contains('\u{201c}'));

        let plain = MarkdownOptions {
            smart_punctuation: false,
            ..MarkdownOptions::default()
        };
        assert!(!render_markdown(source, &plain).contains('\u{201c}'));
    }
}
