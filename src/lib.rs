//! # tycon
//!
//! A parser and serializer for Tycon, a textual, typed, hierarchical
//! configuration language.
//!
//! ## What is Tycon?
//!
//! Tycon is a small configuration format with four scalar kinds (integer,
//! double, boolean, string), two containers — named **groups** `{ ... }` and
//! anonymous **lists** `[ ... ]` — and three comment styles (`# ...`,
//! `// ...`, `/* ... */`). Containers nest arbitrarily, and every node is
//! reachable by name, by position, or by a mixed path like `servers/0/port`:
//!
//! ```text
//! # Upstream service
//! server = {
//! 	host = "localhost"
//! 	port = 8080
//! 	weights = [ 1 2 3 ]
//! }
//! ```
//!
//! ## Key Features
//!
//! - **Typed tree**: scalars stay what they were written as; accessors never
//!   coerce between kinds
//! - **Comments survive**: comments are tree nodes and come back out on
//!   re-emission
//! - **Line-accurate errors**: every parse failure carries the 1-based source
//!   line
//! - **Collision policies**: duplicate names resolve by `Keep`, `Overwrite`,
//!   or `Reject` — at parse time and through the mutation API alike
//! - **Parse hooks**: run callbacks before parsing, after success, or on
//!   failure with the partial tree
//! - **Canonical output**: deterministic emission with tab indentation;
//!   `parse(emit(tree))` reproduces the tree exactly
//! - **No unsafe code**
//!
//! ## Quick Start
//!
//! ```rust
//! use tycon::from_str;
//!
//! let config = from_str(
//!     "TestInt = 42\nTestStr = \"Hello, World!\"\n",
//! ).unwrap();
//!
//! assert_eq!(config.lookup("TestInt").unwrap().as_integer(), Some(42));
//! assert_eq!(config.lookup("TestStr").unwrap().as_str(), Some("Hello, World!"));
//!
//! // Emission is canonical: this input was already canonical, so it
//! // round-trips character for character.
//! assert_eq!(config.emit(), "TestInt = 42\nTestStr = \"Hello, World!\"\n");
//! ```
//!
//! ### Building trees programmatically
//!
//! ```rust
//! use tycon::{group, list, Config, Node};
//!
//! let mut config = Config::new();
//! config.insert(Node::named("endpoints", group! {
//!     primary = "eu-1",
//!     mirrors = list!["us-1", "ap-1"],
//! })).unwrap();
//!
//! assert_eq!(config.lookup("endpoints/mirrors/0").unwrap().as_str(), Some("us-1"));
//! ```
//!
//! ### Converting Rust types into trees
//!
//! Any `T: Serialize` can become a [`Value`] tree:
//!
//! ```rust
//! use serde::Serialize;
//! use tycon::to_value;
//!
//! #[derive(Serialize)]
//! struct Backend { host: String, port: u16 }
//!
//! let value = to_value(&Backend { host: "db-1".into(), port: 5432 }).unwrap();
//! let group = value.as_container().unwrap();
//! assert_eq!(group.lookup("port").unwrap().as_integer(), Some(5432));
//! ```
//!
//! ## Error Reporting
//!
//! ```rust
//! use tycon::{from_str, Error};
//!
//! let err = from_str("port = \"unclosed\nnext = 1").unwrap_err();
//! assert!(matches!(err, Error::Parse { .. }));
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` blocks
//! - All indexing is bounds-checked; positional access returns `Result`
//! - No panics in the public API (except for logic errors that indicate bugs)

pub mod comment;
pub mod config;
pub mod container;
pub mod error;
pub mod format;
pub mod macros;
pub mod options;
pub mod parser;
pub mod path;
pub mod ser;
pub mod value;

pub use comment::{Comment, CommentFlavor};
pub use config::{Config, FailureHook, ParseHook};
pub use container::{Container, ContainerKind};
pub use error::{Error, Result};
pub use options::OnDuplicate;
pub use parser::Parser;
pub use ser::{Serializer, ValueSerializer};
pub use value::{Kind, Node, Value};

use serde::Serialize;
use std::io;

/// Parses Tycon source into a fresh [`Config`] with the default policy.
///
/// # Examples
///
/// ```rust
/// use tycon::from_str;
///
/// let config = from_str("answer = 42\n").unwrap();
/// assert_eq!(config.lookup("answer").unwrap().as_integer(), Some(42));
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] with the offending line when the input is not
/// well-formed Tycon.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(source: &str) -> Result<Config> {
    let mut config = Config::new();
    config.parse_from(source)?;
    Ok(config)
}

/// Parses Tycon source from an `io::Read` into a fresh [`Config`].
///
/// The reader is drained into a string first; the parser itself works on
/// characters, not bytes.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
/// use tycon::from_reader;
///
/// let config = from_reader(Cursor::new(b"answer = 42\n")).unwrap();
/// assert_eq!(config.lookup("answer").unwrap().as_integer(), Some(42));
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] when reading fails and [`Error::Parse`] when the
/// content is not well-formed Tycon.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Config>
where
    R: io::Read,
{
    let mut source = String::new();
    reader
        .read_to_string(&mut source)
        .map_err(|e| Error::io(e.to_string()))?;
    from_str(&source)
}

/// Converts any `T: Serialize` into a [`Value`] tree.
///
/// Structs and maps become groups (keys must satisfy the name grammar),
/// sequences become lists. Useful for turning existing Rust data into
/// insertable configuration subtrees.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use tycon::to_value;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_container());
/// ```
///
/// # Errors
///
/// Returns an error for values Tycon cannot represent (`None`, unit, invalid
/// group keys).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ser::ValueSerializer)
}
