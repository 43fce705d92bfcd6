use std::borrow::Cow;

use super::{Marker, unescaped_pair};
use crate::Error;

/// Text substituted for the opening and closing marker of a pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrapper {
    pub left: String,
    pub right: String,
}

impl Wrapper {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }
}

/// A marker together with the wrapper that replaces each matched pair.
#[derive(Debug, Clone)]
pub struct DelimiterRule {
    marker: Marker,
    wrapper: Wrapper,
}

impl DelimiterRule {
    /// Fails if either side of the wrapper matches the marker, since the
    /// fixed-point loop would then keep finding pairs it created itself.
    pub fn new(marker: Marker, wrapper: Wrapper) -> Result<Self, Error> {
        for side in [&wrapper.left, &wrapper.right] {
            if marker.is_match(side) {
                return Err(Error::WrapperContainsMarker {
                    pattern: marker.pattern().to_string(),
                    wrapper: side.clone(),
                });
            }
        }
        Ok(Self { marker, wrapper })
    }

    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    pub fn wrapper(&self) -> &Wrapper {
        &self.wrapper
    }

    /// Replaces the first unescaped pair only.
    pub fn replace_once<'a>(&self, s: &'a str) -> Cow<'a, str> {
        replace_pair_once(s, &self.marker, &self.wrapper)
    }

    /// Replaces pairs until none are left.
    pub fn apply(&self, s: &str) -> String {
        wrap_pairs(s, &self.marker, &self.wrapper)
    }
}

/// Replaces the first unescaped pair of `marker` in `s` with `wrapper`,
/// keeping the text between the markers as is.
///
/// Returns the input borrowed when there is no pair to replace.
pub fn replace_pair_once<'a>(s: &'a str, marker: &Marker, wrapper: &Wrapper) -> Cow<'a, str> {
    let Some(pair) = unescaped_pair(s, marker) else {
        return Cow::Borrowed(s);
    };
    let open_end = pair.open + marker.byte_len_at(s, pair.open);
    let close_end = pair.close + marker.byte_len_at(s, pair.close);
    log::trace!(
        "wrapping {} pair at {}..{}",
        marker.pattern(),
        pair.open,
        close_end
    );

    let mut out = String::with_capacity(s.len() + wrapper.left.len() + wrapper.right.len());
    out.push_str(&s[..pair.open]);
    out.push_str(&wrapper.left);
    out.push_str(&s[open_end..pair.close]);
    out.push_str(&wrapper.right);
    out.push_str(&s[close_end..]);
    Cow::Owned(out)
}

/// Applies [`replace_pair_once`] to its own output until nothing changes.
pub fn wrap_pairs(s: &str, marker: &Marker, wrapper: &Wrapper) -> String {
    let mut current = s.to_string();
    loop {
        match replace_pair_once(&current, marker, wrapper) {
            Cow::Owned(next) if next != current => current = next,
            _ => return current,
        }
    }
}

/// Wraps every unescaped pair of `marker` in `text` with `left` and `right`.
///
/// `marker` is a regex pattern (for example `\$\$`) and `marker_len` its
/// length in characters. Unbalanced input keeps its trailing marker.
///
/// ```
/// use multiedit_engine::wrap_delimited_pairs;
///
/// let html = wrap_delimited_pairs("a $$b$$ c", r"\$\$", "<div>", "</div>", 2).unwrap();
/// assert_eq!(html, "a <div>b</div> c");
/// ```
pub fn wrap_delimited_pairs(
    text: &str,
    marker: &str,
    left: &str,
    right: &str,
    marker_len: usize,
) -> Result<String, Error> {
    let rule = DelimiterRule::new(Marker::new(marker, marker_len)?, Wrapper::new(left, right))?;
    Ok(rule.apply(text))
}
