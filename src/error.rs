//! Error types for Tycon parsing, tree mutation, and lookup.
//!
//! Every fallible operation in the crate reports through the single [`Error`]
//! enum. Parse failures carry the 1-based source line at the moment of
//! detection; tree errors carry the offending name, path, or index.
//!
//! ## Examples
//!
//! ```rust
//! use tycon::{from_str, Error};
//!
//! let result = from_str("Invalid = { Unclosed }");
//! assert!(result.is_err());
//!
//! if let Err(Error::Parse { line, reason }) = result {
//!     eprintln!("parse failed on line {}: {}", line, reason);
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// All errors produced by the crate.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error while reading input
    #[error("IO error: {0}")]
    Io(String),

    /// Lexical, syntactic, or semantic parse failure
    #[error("Parse error at line {line}: {reason}")]
    Parse {
        /// 1-based source line where the error was detected
        line: u32,
        reason: String,
    },

    /// Name rejected by the container it was inserted into
    #[error("Invalid name '{name}' for an item of a {kind}")]
    InvalidName { name: String, kind: &'static str },

    /// Lookup path violates the path grammar
    #[error("Invalid path '{0}'")]
    InvalidPath(String),

    /// Path resolution missed a child
    #[error("Item '{0}' was not found")]
    ItemNotFound(String),

    /// List already holds a structurally equal child
    #[error("Item already exists")]
    ItemAlreadyExists,

    /// Group already holds a child with this name
    #[error("Item with name '{0}' already exists")]
    ItemNameAlreadyExists(String),

    /// Positional access past the end of a container
    #[error("Index {index} is out of bounds (container has {size} children)")]
    OutOfBounds { index: usize, size: usize },

    /// Typed accessor used on a node of a different kind
    #[error("Cannot convert {from} value to {to}")]
    WrongValueTypeConversion {
        from: &'static str,
        to: &'static str,
    },

    /// Type with no Tycon representation fed to the serde bridge
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Generic error
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a parse error tagged with a source line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tycon::Error;
    ///
    /// let err = Error::parse(3, "Unexpected EOF");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn parse(line: u32, reason: impl Into<String>) -> Self {
        Error::Parse {
            line,
            reason: reason.into(),
        }
    }

    /// Creates an invalid-name error for the given container kind label.
    pub fn invalid_name(name: impl Into<String>, kind: &'static str) -> Self {
        Error::InvalidName {
            name: name.into(),
            kind,
        }
    }

    /// Creates an out-of-bounds error for positional access.
    pub fn out_of_bounds(index: usize, size: usize) -> Self {
        Error::OutOfBounds { index, size }
    }

    /// Creates a wrong-type error from source and destination kind labels.
    pub fn wrong_type(from: &'static str, to: &'static str) -> Self {
        Error::WrongValueTypeConversion { from, to }
    }

    /// Creates an unsupported-type error for the serde bridge.
    pub fn unsupported_type(msg: impl Into<String>) -> Self {
        Error::UnsupportedType(msg.into())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error from a display message.
    pub fn io(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }

    /// The source line of a parse error, if this is one.
    #[must_use]
    pub fn line(&self) -> Option<u32> {
        match self {
            Error::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
