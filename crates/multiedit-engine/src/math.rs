//! Math span wrapping applied to rendered Markdown.
//!
//! `$$...$$` is resolved before `$...$` so the inline pass never sees half
//! of a display delimiter.

use serde::{Deserialize, Serialize};

use crate::{DelimiterRule, Error, Marker, Wrapper};

/// Markup placed around display and inline math spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MathMarkup {
    pub display_open: String,
    pub display_close: String,
    pub inline_open: String,
    pub inline_close: String,
}

impl Default for MathMarkup {
    fn default() -> Self {
        Self {
            display_open: r#"<span class="math display">"#.to_string(),
            display_close: "</span>".to_string(),
            inline_open: r#"<span class="math inline">"#.to_string(),
            inline_close: "</span>".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MathWrapping {
    display: DelimiterRule,
    inline: DelimiterRule,
}

impl MathWrapping {
    /// Fails if any of the markup contains a `$`: display markup is also
    /// scanned by the inline pass.
    pub fn new(markup: &MathMarkup) -> Result<Self, Error> {
        let dollar = Marker::dollar()?;
        for side in [&markup.display_open, &markup.display_close] {
            if dollar.is_match(side) {
                return Err(Error::WrapperContainsMarker {
                    pattern: dollar.pattern().to_string(),
                    wrapper: side.clone(),
                });
            }
        }

        let display = DelimiterRule::new(
            Marker::double_dollar()?,
            Wrapper::new(&markup.display_open, &markup.display_close),
        )?;
        let inline = DelimiterRule::new(
            dollar,
            Wrapper::new(&markup.inline_open, &markup.inline_close),
        )?;
        Ok(Self { display, inline })
    }

    pub fn apply(&self, html: &str) -> String {
        let html = self.display.apply(html);
        self.inline.apply(&html)
    }
}
