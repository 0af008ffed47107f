//! Comment nodes.
//!
//! Tycon keeps comments in the tree: a [`Comment`] is a first-class child of
//! any container and survives the parse → emit round trip. The stored text is
//! the content between the delimiters, without them.

use std::fmt;

/// The three comment syntaxes of the format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommentFlavor {
    /// `# ...` to end of line
    SingleLineBash,
    /// `// ...` to end of line
    SingleLineC,
    /// `/* ... */`, may span lines
    MultiLineC,
}

impl CommentFlavor {
    /// Opening delimiter as written in source.
    #[must_use]
    pub const fn opener(&self) -> &'static str {
        match self {
            CommentFlavor::SingleLineBash => "#",
            CommentFlavor::SingleLineC => "//",
            CommentFlavor::MultiLineC => "/*",
        }
    }

    /// Closing delimiter, empty for the single-line flavors.
    #[must_use]
    pub const fn closer(&self) -> &'static str {
        match self {
            CommentFlavor::SingleLineBash | CommentFlavor::SingleLineC => "",
            CommentFlavor::MultiLineC => "*/",
        }
    }
}

/// A comment with its flavor and verbatim text.
///
/// # Examples
///
/// ```rust
/// use tycon::{Comment, CommentFlavor};
///
/// let comment = Comment::bash(" server tuning");
/// assert_eq!(comment.flavor(), CommentFlavor::SingleLineBash);
/// assert_eq!(comment.text(), " server tuning");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Comment {
    flavor: CommentFlavor,
    text: String,
}

impl Comment {
    /// Creates a comment of the given flavor.
    pub fn new(flavor: CommentFlavor, text: impl Into<String>) -> Self {
        Comment {
            flavor,
            text: text.into(),
        }
    }

    /// Creates a `# ...` comment.
    pub fn bash(text: impl Into<String>) -> Self {
        Comment::new(CommentFlavor::SingleLineBash, text)
    }

    /// Creates a `// ...` comment.
    pub fn line(text: impl Into<String>) -> Self {
        Comment::new(CommentFlavor::SingleLineC, text)
    }

    /// Creates a `/* ... */` comment.
    pub fn multiline(text: impl Into<String>) -> Self {
        Comment::new(CommentFlavor::MultiLineC, text)
    }

    #[must_use]
    pub const fn flavor(&self) -> CommentFlavor {
        self.flavor
    }

    /// The stored text, delimiters excluded.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.flavor.opener(),
            self.text,
            self.flavor.closer()
        )
    }
}
