use regex::Regex;

use crate::Error;

/// A delimiter pattern plus the number of characters one occurrence spans.
///
/// The pattern is a regular expression so callers can pass the same
/// escaped forms (`\$`, `\$\$`) the rendering path has always used. The
/// display length is what gets skipped when looking for the closing
/// occurrence, and what gets cut out of the buffer on replacement.
#[derive(Debug, Clone)]
pub struct Marker {
    pattern: Regex,
    len: usize,
}

impl Marker {
    /// Creates a marker from a regex pattern and its display length in characters.
    pub fn new(pattern: &str, len: usize) -> Result<Self, Error> {
        let regex = Regex::new(pattern).map_err(|source| Error::InvalidMarker {
            pattern: pattern.to_string(),
            source,
        })?;
        // A marker that can match nothing, or skips nothing, never lets the
        // fixed-point loop make progress.
        if len == 0 || regex.is_match("") {
            return Err(Error::EmptyMarker(pattern.to_string()));
        }
        Ok(Self {
            pattern: regex,
            len,
        })
    }

    /// Creates a marker matching `text` literally.
    pub fn literal(text: &str) -> Result<Self, Error> {
        Self::new(&regex::escape(text), text.chars().count())
    }

    /// The single `$` inline math delimiter.
    pub fn dollar() -> Result<Self, Error> {
        Self::literal("$")
    }

    /// The doubled `$$` display math delimiter.
    pub fn double_dollar() -> Result<Self, Error> {
        Self::literal("$$")
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Display length in characters.
    pub fn display_len(&self) -> usize {
        self.len
    }

    /// Byte offset of the first raw match in `s`, escaped or not.
    pub fn find_in(&self, s: &str) -> Option<usize> {
        self.pattern.find(s).map(|m| m.start())
    }

    pub fn is_match(&self, s: &str) -> bool {
        self.pattern.is_match(s)
    }

    /// Byte length of one occurrence starting at byte offset `at`.
    ///
    /// Counts `display_len` characters forward, stopping at the end of `s`.
    pub fn byte_len_at(&self, s: &str, at: usize) -> usize {
        s[at..].chars().take(self.len).map(char::len_utf8).sum()
    }
}
