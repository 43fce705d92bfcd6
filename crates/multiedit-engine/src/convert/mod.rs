//! Conversions run when the editor switches between Markdown and the
//! HTML-based modes.

mod html;
mod markdown;

pub use html::html_to_markdown;
pub use markdown::{MarkdownOptions, render_markdown};

use serde::{Deserialize, Serialize};

use crate::{Error, MathMarkup, MathWrapping};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    pub markdown: MarkdownOptions,
    pub math: MathMarkup,
}

/// Markdown↔HTML conversion with math span handling.
#[derive(Debug, Clone)]
pub struct Converter {
    markdown: MarkdownOptions,
    math: MathWrapping,
}

impl Converter {
    pub fn new(options: &ConversionOptions) -> Result<Self, Error> {
        Ok(Self {
            markdown: options.markdown,
            math: MathWrapping::new(&options.math)?,
        })
    }

    /// A converter with default extensions and math markup.
    pub fn standard() -> Result<Self, Error> {
        Self::new(&ConversionOptions::default())
    }

    /// Renders Markdown, then wraps `$$...$$` and `$...$` spans.
    pub fn markdown_to_html(&self, markdown: &str) -> String {
        log::debug!("rendering {} bytes of markdown", markdown.len());
        let html = render_markdown(markdown, &self.markdown);
        self.math.apply(&html)
    }

    pub fn html_to_markdown(&self, html: &str) -> String {
        log::debug!("converting {} bytes of html to markdown", html.len());
        html_to_markdown(html)
    }
}
