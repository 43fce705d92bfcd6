//! Escape-aware wrapping of delimited spans such as `$x$` and `$$x$$`.
//!
//! A marker occurrence immediately preceded by a backslash is escaped and
//! never opens or closes a pair. Unescaped occurrences pair up left to
//! right; each pass replaces the first pair only, and [`wrap_pairs`] loops
//! until the output stops changing.
//!
//! There is no double-escape handling: `\\$` still suppresses the `$`.

mod marker;
mod replace;
mod scan;

pub use marker::Marker;
pub use replace::{DelimiterRule, Wrapper, replace_pair_once, wrap_delimited_pairs, wrap_pairs};
pub use scan::{Pair, first_unescaped, first_unescaped_from, unescaped_pair};
