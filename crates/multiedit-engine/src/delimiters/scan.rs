use super::Marker;

/// Byte offsets of an opening marker and the marker that closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair {
    pub open: usize,
    pub close: usize,
}

/// Returns the byte offset of the first occurrence of `marker` that is not
/// immediately preceded by a backslash.
pub fn first_unescaped(s: &str, marker: &Marker) -> Option<usize> {
    first_unescaped_from(s, marker, 0)
}

/// Like [`first_unescaped`], but only looks at `s[from..]`.
///
/// An occurrence right at the start of the searched window is never
/// treated as escaped, whatever precedes it in the full buffer. Each
/// skipped occurrence moves the window to the character after it.
pub fn first_unescaped_from(s: &str, marker: &Marker, from: usize) -> Option<usize> {
    let mut cursor = from;
    loop {
        let at = cursor + marker.find_in(&s[cursor..])?;
        if at == cursor || !s[..at].ends_with('\\') {
            return Some(at);
        }
        let skip = s[at..].chars().next().map_or(1, char::len_utf8);
        cursor = at + skip;
    }
}

/// Finds the first pair of unescaped markers.
///
/// The closing search starts after the full display length of the opening
/// marker, so a doubled marker is never paired with its own second half.
pub fn unescaped_pair(s: &str, marker: &Marker) -> Option<Pair> {
    let open = first_unescaped(s, marker)?;
    let open_end = open + marker.byte_len_at(s, open);
    let close = first_unescaped_from(s, marker, open_end)?;
    Some(Pair { open, close })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn dollar() -> Marker {
        Marker::dollar().unwrap()
    }

    #[rstest]
    #[case::none("no math here", None)]
    #[case::at_start("$x", Some(0))]
    #[case::plain("ab $x", Some(3))]
    #[case::escaped_then_plain(r"a \$b$ c", Some(5))]
    #[case::only_escaped(r"price \$5", None)]
    #[case::double_backslash_still_escapes(r"\\$a", None)]
    #[case::escaped_run(r"\$\$\$$", Some(6))]
    fn finds_first_unescaped(#[case] input: &str, #[case] expected: Option<usize>) {
        assert_eq!(first_unescaped(input, &dollar()), expected);
    }

    #[test]
    fn marker_right_after_escaped_one_is_not_escaped() {
        // The escaped `$` is skipped and the next `$` starts the new window.
        assert_eq!(first_unescaped(r"\$$a$", &dollar()), Some(2));
    }

    #[test]
    fn window_start_is_never_escaped() {
        assert_eq!(first_unescaped_from(r"\$", &dollar(), 1), Some(1));
    }

    #[test]
    fn offsets_are_bytes_into_the_original_buffer() {
        assert_eq!(first_unescaped("é \\$ü $", &dollar()), Some(8));
    }

    #[test]
    fn pair_of_single_markers() {
        assert_eq!(
            unescaped_pair("a $x$ b", &dollar()),
            Some(Pair { open: 2, close: 4 })
        );
    }

    #[test]
    fn pair_skips_escaped_closing_marker() {
        assert_eq!(
            unescaped_pair(r"$a\$b$", &dollar()),
            Some(Pair { open: 0, close: 5 })
        );
    }

    #[test]
    fn pair_of_doubled_markers_skips_the_whole_opener() {
        let marker = Marker::double_dollar().unwrap();
        assert_eq!(
            unescaped_pair("a $$b$$ c", &marker),
            Some(Pair { open: 2, close: 5 })
        );
        assert_eq!(unescaped_pair("$$$", &marker), None);
    }

    #[test]
    fn adjacent_markers_form_an_empty_pair() {
        assert_eq!(
            unescaped_pair("$$", &dollar()),
            Some(Pair { open: 0, close: 1 })
        );
    }

    #[test]
    fn lone_marker_has_no_pair() {
        assert_eq!(unescaped_pair("only $ one", &dollar()), None);
        assert_eq!(unescaped_pair(r"a \$b$ c", &dollar()), None);
    }
}
