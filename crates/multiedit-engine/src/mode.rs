use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// The three ways one document can be edited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditorMode {
    /// Rich text; the document is held as HTML.
    #[default]
    #[serde(rename = "wysiwyg")]
    Wysiwyg,
    #[serde(rename = "md", alias = "markdown")]
    Markdown,
    #[serde(rename = "html")]
    Html,
}

impl EditorMode {
    pub const ALL: [EditorMode; 3] = [EditorMode::Wysiwyg, EditorMode::Markdown, EditorMode::Html];

    /// Short name, also used as the file extension handed to text editors.
    pub fn as_str(self) -> &'static str {
        match self {
            EditorMode::Wysiwyg => "wysiwyg",
            EditorMode::Markdown => "md",
            EditorMode::Html => "html",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EditorMode::Wysiwyg => "WYSIWYG",
            EditorMode::Markdown => "Markdown",
            EditorMode::Html => "HTML source",
        }
    }

    /// Whether the document is held as HTML in this mode.
    pub fn is_html(self) -> bool {
        !matches!(self, EditorMode::Markdown)
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditorMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wysiwyg" => Ok(EditorMode::Wysiwyg),
            "md" | "markdown" => Ok(EditorMode::Markdown),
            "html" => Ok(EditorMode::Html),
            _ => Err(Error::UnknownMode(s.to_string())),
        }
    }
}
