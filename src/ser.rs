//! Canonical text emission.
//!
//! This module provides the [`Serializer`] that renders a value tree back
//! into Tycon source, and [`ValueSerializer`], a [`serde::Serializer`] whose
//! output is a [`Value`] tree (the engine behind [`to_value`](crate::to_value)).
//!
//! ## Canonical form
//!
//! Emission is deterministic: children appear in insertion order, nesting
//! indents by one tab per level, every item ends its last line with a
//! newline, and comments always occupy their own line. Whitespace from the
//! original source is not preserved; `parse(emit(tree))` reproduces `tree`
//! exactly.
//!
//! ```rust
//! use tycon::from_str;
//!
//! let config = from_str("a = {   b = 1   }").unwrap();
//! assert_eq!(config.emit(), "a = {\n\tb = 1\n}\n");
//! ```

use crate::container::Container;
use crate::error::{Error, Result};
use crate::options::OnDuplicate;
use crate::value::{Node, Value};
use serde::{ser, Serialize};

/// Renders nodes into canonical Tycon text.
pub struct Serializer {
    output: String,
}

impl Serializer {
    #[must_use]
    pub fn new() -> Self {
        Serializer {
            output: String::with_capacity(256),
        }
    }

    /// Consumes the serializer, returning the accumulated text.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes every child of `container` at the given indent level, each
    /// followed by a newline.
    pub fn write_children(&mut self, container: &Container, indent: usize) {
        for node in container.children() {
            self.write_node(node, indent);
        }
    }

    /// Writes one node at the given indent level, newline included.
    pub fn write_node(&mut self, node: &Node, indent: usize) {
        self.write_indent(indent);
        match node.value() {
            Value::Bool(b) => {
                self.write_name(node);
                self.output.push_str(if *b { "true" } else { "false" });
            }
            Value::Integer(i) => {
                self.write_name(node);
                self.output.push_str(&i.to_string());
            }
            Value::Double(d) => {
                self.write_name(node);
                self.output.push_str(&double_literal(*d));
            }
            Value::String(s) => {
                self.write_name(node);
                self.output.push_str(&string_literal(s));
            }
            Value::Comment(c) => {
                self.output.push_str(c.flavor().opener());
                self.output.push_str(c.text());
                self.output.push_str(c.flavor().closer());
            }
            Value::Container(c) => {
                self.write_name(node);
                self.write_container(c, indent);
            }
        }
        self.output.push('\n');
    }

    fn write_name(&mut self, node: &Node) {
        if let Some(name) = node.name() {
            self.output.push_str(name);
            self.output.push_str(" = ");
        }
    }

    fn write_container(&mut self, container: &Container, indent: usize) {
        self.output.push(container.kind().opener());
        self.output.push('\n');
        self.write_children(container, indent + 1);
        self.write_indent(indent);
        self.output.push(container.kind().closer());
    }

    fn write_indent(&mut self, indent: usize) {
        for _ in 0..indent {
            self.output.push('\t');
        }
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Serializer::new()
    }
}

/// The literal form of a double. Shortest round-trip rendering, with `.0`
/// appended when nothing marks the literal as non-integral.
pub(crate) fn double_literal(value: f64) -> String {
    let mut literal = value.to_string();
    if value.is_finite() && !literal.contains('.') {
        literal.push_str(".0");
    }
    literal
}

/// The quoted literal form of a string. Only `"` and `\` need escaping;
/// every other character, control characters included, is emitted raw and
/// survives re-parsing.
pub(crate) fn string_literal(s: &str) -> String {
    let mut literal = String::with_capacity(s.len() + 2);
    literal.push('"');
    for c in s.chars() {
        match c {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            other => literal.push(other),
        }
    }
    literal.push('"');
    literal
}

/// A container rendered as its full block, opener through closer, without a
/// trailing newline.
pub(crate) fn container_block(container: &Container, indent: usize) -> String {
    let mut ser = Serializer::new();
    ser.write_container(container, indent);
    ser.into_inner()
}

fn to_value_inner<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// A `serde::Serializer` producing a [`Value`] tree: structs and maps become
/// groups, sequences become lists.
pub struct ValueSerializer;

pub struct SerializeListValue {
    list: Container,
}

pub struct SerializeGroupValue {
    group: Container,
    current_key: Option<String>,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeListValue;
    type SerializeTuple = SerializeListValue;
    type SerializeTupleStruct = SerializeListValue;
    type SerializeTupleVariant = SerializeListValue;
    type SerializeMap = SerializeGroupValue;
    type SerializeStruct = SerializeGroupValue;
    type SerializeStructVariant = SerializeGroupValue;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Integer(v as i32))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Integer(v as i32))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Integer(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        match i32::try_from(v) {
            Ok(narrow) => Ok(Value::Integer(narrow)),
            Err(_) => Ok(Value::Double(v as f64)),
        }
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Integer(v as i32))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Integer(v as i32))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        match i32::try_from(v) {
            Ok(narrow) => Ok(Value::Integer(narrow)),
            Err(_) => Ok(Value::Double(v as f64)),
        }
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        match i32::try_from(v) {
            Ok(narrow) => Ok(Value::Integer(narrow)),
            Err(_) => Ok(Value::Double(v as f64)),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Double(v as f64))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Double(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        let mut list = Container::list();
        for byte in v {
            list.push(Node::anonymous(Value::Integer(*byte as i32)));
        }
        Ok(Value::Container(list))
    }

    fn serialize_none(self) -> Result<Value> {
        Err(Error::unsupported_type("Tycon has no null value"))
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Err(Error::unsupported_type("Tycon has no unit value"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value> {
        Err(Error::unsupported_type(format!("unit struct {name}")))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_type("newtype variants"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<SerializeListValue> {
        Ok(SerializeListValue::new())
    }

    fn serialize_tuple(self, _len: usize) -> Result<SerializeListValue> {
        Ok(SerializeListValue::new())
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<SerializeListValue> {
        Ok(SerializeListValue::new())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SerializeListValue> {
        Err(Error::unsupported_type("tuple variants"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeGroupValue> {
        Ok(SerializeGroupValue::new())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeGroupValue> {
        Ok(SerializeGroupValue::new())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SerializeGroupValue> {
        Err(Error::unsupported_type("struct variants"))
    }
}

impl SerializeListValue {
    fn new() -> Self {
        SerializeListValue {
            list: Container::list(),
        }
    }

    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.list.push(Node::anonymous(to_value_inner(value)?));
        Ok(())
    }
}

impl SerializeGroupValue {
    fn new() -> Self {
        SerializeGroupValue {
            group: Container::group(),
            current_key: None,
        }
    }

    fn insert<T>(&mut self, key: String, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.group
            .add(Node::named(key, to_value_inner(value)?), OnDuplicate::Overwrite)?;
        Ok(())
    }
}

impl ser::SerializeSeq for SerializeListValue {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Container(self.list))
    }
}

impl ser::SerializeTuple for SerializeListValue {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Container(self.list))
    }
}

impl ser::SerializeTupleStruct for SerializeListValue {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Container(self.list))
    }
}

impl ser::SerializeTupleVariant for SerializeListValue {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Container(self.list))
    }
}

impl ser::SerializeMap for SerializeGroupValue {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value_inner(key)? {
            Value::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            _ => Err(Error::custom("group keys must be strings")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.insert(key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Container(self.group))
    }
}

impl ser::SerializeStruct for SerializeGroupValue {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Container(self.group))
    }
}

impl ser::SerializeStructVariant for SerializeGroupValue {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Container(self.group))
    }
}
