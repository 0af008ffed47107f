//! The typed value tree.
//!
//! This module provides [`Value`], the sum of everything a Tycon document can
//! hold, and [`Node`], a value paired with its optional name. A parsed
//! document is a tree of nodes rooted in an unnamed group.
//!
//! ## Core Types
//!
//! - [`Value`]: a tagged union over bool, integer, double, string, comment,
//!   and container payloads
//! - [`Node`]: an optional name plus a value; names exist only for non-comment
//!   children of groups
//! - [`Kind`]: the tag of a value, used in conversion diagnostics
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use tycon::{Comment, Node, Value};
//!
//! let flag = Value::from(true);
//! let port = Value::from(8080);
//! let ratio = Value::from(0.5);
//! let motd = Value::from("hello");
//! let note = Value::from(Comment::bash(" tuning"));
//!
//! let item = Node::named("port", port);
//! assert_eq!(item.name(), Some("port"));
//! ```
//!
//! ### Type Checking
//!
//! ```rust
//! use tycon::Value;
//!
//! let value = Value::from(42);
//! assert!(value.is_integer());
//! assert!(!value.is_string());
//! ```
//!
//! ### Extracting Values
//!
//! ```rust
//! use tycon::Value;
//!
//! let value = Value::from(42);
//!
//! // Probing returns Option...
//! assert_eq!(value.as_integer(), Some(42));
//!
//! // ...while TryFrom reports the mismatch.
//! let n = i32::try_from(&value).unwrap();
//! assert_eq!(n, 42);
//! assert!(bool::try_from(&value).is_err());
//! ```

use crate::comment::Comment;
use crate::container::{Container, ContainerKind};
use crate::error::{Error, Result};
use crate::ser;
use serde::de::{self, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The tag of a [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Bool,
    Integer,
    Double,
    String,
    Comment,
    Container,
}

impl Kind {
    /// Human-readable tag name, as used in conversion errors.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Kind::Bool => "Bool",
            Kind::Integer => "Integer",
            Kind::Double => "Double",
            Kind::String => "String",
            Kind::Comment => "Comment",
            Kind::Container => "Container",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any value a Tycon document can hold.
///
/// Scalars carry their payload directly; [`Comment`] and [`Container`] carry
/// their own structure. The enum is exhaustive: there is no null and no
/// catch-all variant.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Integer(i32),
    Double(f64),
    String(String),
    Comment(Comment),
    Container(Container),
}

impl Value {
    /// The tag of this value.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::Integer(_) => Kind::Integer,
            Value::Double(_) => Kind::Double,
            Value::String(_) => Kind::String,
            Value::Comment(_) => Kind::Comment,
            Value::Container(_) => Kind::Container,
        }
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if the value is an integer.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    /// Returns `true` if the value is a double.
    #[inline]
    #[must_use]
    pub const fn is_double(&self) -> bool {
        matches!(self, Value::Double(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is a comment.
    #[inline]
    #[must_use]
    pub const fn is_comment(&self) -> bool {
        matches!(self, Value::Comment(_))
    }

    /// Returns `true` if the value is a group or list.
    #[inline]
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Value::Container(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is an integer, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is a double, returns it. Otherwise returns `None`.
    ///
    /// Integers are not coerced; `Value::Integer(1).as_double()` is `None`.
    #[inline]
    #[must_use]
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a comment, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            Value::Comment(c) => Some(c),
            _ => None,
        }
    }

    /// If the value is a container, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Value::Container(c) => Some(c),
            _ => None,
        }
    }

    /// Mutable variant of [`Value::as_container`].
    #[inline]
    #[must_use]
    pub fn as_container_mut(&mut self) -> Option<&mut Container> {
        match self {
            Value::Container(c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    /// Writes the canonical literal form: scalars as they appear after the
    /// `=` sign, comments with their delimiters, containers as their full
    /// multi-line block.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Double(d) => f.write_str(&ser::double_literal(*d)),
            Value::String(s) => f.write_str(&ser::string_literal(s)),
            Value::Comment(c) => write!(f, "{}", c),
            Value::Container(c) => f.write_str(&ser::container_block(c, 0)),
        }
    }
}

macro_rules! try_from_value {
    ($target:ty, $variant:ident, $kind:expr) => {
        impl TryFrom<&Value> for $target {
            type Error = Error;

            fn try_from(value: &Value) -> Result<Self> {
                match value {
                    Value::$variant(inner) => Ok(inner.clone()),
                    other => Err(Error::wrong_type(other.kind().as_str(), $kind)),
                }
            }
        }

        impl TryFrom<&Node> for $target {
            type Error = Error;

            fn try_from(node: &Node) -> Result<Self> {
                <$target>::try_from(node.value())
            }
        }
    };
}

try_from_value!(bool, Bool, "Bool");
try_from_value!(i32, Integer, "Integer");
try_from_value!(f64, Double, "Double");
try_from_value!(String, String, "String");

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Comment> for Value {
    fn from(value: Comment) -> Self {
        Value::Comment(value)
    }
}

impl From<Container> for Value {
    fn from(value: Container) -> Self {
        Value::Container(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Container(Container::list_of(values))
    }
}

/// A tree node: an optional name plus a value.
///
/// Non-comment children of groups are named; list children and comments are
/// anonymous. Name rules are enforced when the node enters a container, not
/// at construction.
///
/// # Examples
///
/// ```rust
/// use tycon::{Node, Value};
///
/// let named = Node::named("port", 8080);
/// let bare = Node::anonymous("standby");
///
/// assert_eq!(named.name(), Some("port"));
/// assert_eq!(bare.name(), None);
/// assert_eq!(named.as_integer(), Some(8080));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    name: Option<String>,
    value: Value,
}

impl Node {
    /// Creates an unnamed node, suitable for lists.
    pub fn anonymous(value: impl Into<Value>) -> Self {
        Node {
            name: None,
            value: value.into(),
        }
    }

    /// Creates a named node, suitable for groups.
    pub fn named(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Node {
            name: Some(name.into()),
            value: value.into(),
        }
    }

    /// The node's name, absent for list children and comments.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[must_use]
    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    /// Consumes the node, discarding the name.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }

    /// The tag of the node's value.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.value.kind()
    }

    /// Returns `true` if the node holds a comment.
    #[must_use]
    pub fn is_comment(&self) -> bool {
        self.value.is_comment()
    }

    /// Recursive node total: 1 for scalars and comments, 1 plus the child
    /// counts for containers.
    #[must_use]
    pub fn count(&self) -> usize {
        match &self.value {
            Value::Container(c) => 1 + c.count(),
            _ => 1,
        }
    }

    /// See [`Value::as_bool`].
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        self.value.as_bool()
    }

    /// See [`Value::as_integer`].
    #[must_use]
    pub fn as_integer(&self) -> Option<i32> {
        self.value.as_integer()
    }

    /// See [`Value::as_double`].
    #[must_use]
    pub fn as_double(&self) -> Option<f64> {
        self.value.as_double()
    }

    /// See [`Value::as_str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }

    /// See [`Value::as_comment`].
    #[must_use]
    pub fn as_comment(&self) -> Option<&Comment> {
        self.value.as_comment()
    }

    /// See [`Value::as_container`].
    #[must_use]
    pub fn as_container(&self) -> Option<&Container> {
        self.value.as_container()
    }

    /// See [`Value::as_container_mut`].
    #[must_use]
    pub fn as_container_mut(&mut self) -> Option<&mut Container> {
        self.value.as_container_mut()
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::anonymous(value)
    }
}

impl From<Comment> for Node {
    fn from(comment: Comment) -> Self {
        Node::anonymous(Value::Comment(comment))
    }
}

impl Serialize for Value {
    /// Maps the tree onto the serde data model: groups become maps, lists
    /// become sequences, comments inside containers are skipped, and a bare
    /// comment serializes as its text.
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i32(*i),
            Value::Double(d) => serializer.serialize_f64(*d),
            Value::String(s) => serializer.serialize_str(s),
            Value::Comment(c) => serializer.serialize_str(c.text()),
            Value::Container(c) => match c.kind() {
                ContainerKind::Group => {
                    let entries: Vec<&Node> =
                        c.children().filter(|n| !n.is_comment()).collect();
                    let mut map = serializer.serialize_map(Some(entries.len()))?;
                    for node in entries {
                        map.serialize_entry(node.name().unwrap_or_default(), node.value())?;
                    }
                    map.end()
                }
                ContainerKind::List => {
                    let elements: Vec<&Node> =
                        c.children().filter(|n| !n.is_comment()).collect();
                    let mut seq = serializer.serialize_seq(Some(elements.len()))?;
                    for node in elements {
                        seq.serialize_element(node.value())?;
                    }
                    seq.end()
                }
            },
        }
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a Tycon-representable value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Value, E> {
                // Narrow to the format's i32 integers; widen to double when
                // the magnitude does not fit.
                match i32::try_from(value) {
                    Ok(narrow) => Ok(Value::Integer(narrow)),
                    Err(_) => Ok(Value::Double(value as f64)),
                }
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Value, E> {
                match i32::try_from(value) {
                    Ok(narrow) => Ok(Value::Integer(narrow)),
                    Err(_) => Ok(Value::Double(value as f64)),
                }
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Value, E> {
                Ok(Value::Double(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Value, E> {
                Ok(Value::String(value))
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut list = Container::list();
                while let Some(element) = seq.next_element::<Value>()? {
                    list.push(Node::anonymous(element));
                }
                Ok(Value::Container(list))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                use crate::options::OnDuplicate;

                let mut group = Container::group();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    group
                        .add(Node::named(key, value), OnDuplicate::Reject)
                        .map_err(de::Error::custom)?;
                }
                Ok(Value::Container(group))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}
