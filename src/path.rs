//! Lookup path grammar.
//!
//! A path locates a descendant of a container: `/`-separated segments where a
//! segment is either an item name or a non-negative decimal index, and the
//! first segment starts with a letter. `server/hosts/2/port` selects the
//! `port` child of the third element of the `hosts` container.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Valid item name inside a group: a letter followed by letters, digits, or
/// underscores.
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("name pattern compiles"));

/// Valid lookup path. Later segments may be purely numeric (positional
/// indices); the first must begin with a letter.
static PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(/[A-Za-z0-9_]+)*$").expect("path pattern compiles")
});

/// Returns whether `name` is usable as a group item name.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

/// One resolved step of a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Select the first non-comment child with this name.
    Name(&'a str),
    /// Select the child at this position.
    Index(usize),
}

/// Splits a path into segments, validating it against the path grammar.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] when the path does not match the grammar.
///
/// # Examples
///
/// ```rust
/// use tycon::path::{segments, Segment};
///
/// let segs = segments("servers/0/port").unwrap();
/// assert_eq!(segs[1], Segment::Index(0));
/// assert!(segments("/leading/slash").is_err());
/// ```
pub fn segments(path: &str) -> Result<Vec<Segment<'_>>> {
    if !PATH_RE.is_match(path) {
        return Err(Error::InvalidPath(path.to_string()));
    }
    Ok(path
        .split('/')
        .map(|seg| match seg.parse::<usize>() {
            Ok(index) => Segment::Index(index),
            Err(_) => Segment::Name(seg),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_grammar() {
        assert!(is_valid_name("server"));
        assert!(is_valid_name("Server_1"));
        assert!(is_valid_name("x"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("1up"));
        assert!(!is_valid_name("_hidden"));
        assert!(!is_valid_name("dash-ed"));
        assert!(!is_valid_name("spaced name"));
    }

    #[test]
    fn splits_names_and_indices() {
        let segs = segments("a/b2/10/c").unwrap();
        assert_eq!(
            segs,
            vec![
                Segment::Name("a"),
                Segment::Name("b2"),
                Segment::Index(10),
                Segment::Name("c"),
            ]
        );
    }

    #[test]
    fn single_segment_path() {
        assert_eq!(segments("top").unwrap(), vec![Segment::Name("top")]);
    }

    #[test]
    fn rejects_bad_paths() {
        for bad in ["", "/a", "a/", "a//b", "1/a", "a/b-c", "a b"] {
            assert!(
                matches!(segments(bad), Err(Error::InvalidPath(_))),
                "expected InvalidPath for {:?}",
                bad
            );
        }
    }
}
