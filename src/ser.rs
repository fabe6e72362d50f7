//! `.properties` rendering and serialization.
//!
//! This module turns a [`PropertyTable`] back into text, and Rust values
//! implementing `Serialize` into a [`PropertyTable`].
//!
//! ## Rendering
//!
//! Entries are sorted by key and written as `key = value` lines joined by `\n`.
//! Two styles share the same key escaping (`:`, `=`, spaces, and a leading `#`
//! or `!` get a backslash) and differ in how much else is escaped:
//!
//! - **Canonical**: backslashes doubled, CR/LF as `\r`/`\n`, everything outside
//!   printable ASCII as `\uxxxx`. Decodes back to an equal table.
//! - **Display**: keys and values otherwise left as they are, for people to
//!   read.
//!
//! ## Serialization
//!
//! [`to_table`] accepts structs and maps whose fields are primitives, options,
//! unit variants or lists of those. Lists are joined with `,`; `None` and `()`
//! become the empty string. Nested structs and maps have no flat representation
//! and are rejected.
//!
//! ```rust
//! use serde::Serialize;
//! use serde_properties::to_table;
//!
//! #[derive(Serialize)]
//! struct Server { host: String, port: u16, tags: Vec<String> }
//!
//! let server = Server {
//!     host: "localhost".to_string(),
//!     port: 8080,
//!     tags: vec!["a".to_string(), "b".to_string()],
//! };
//!
//! let table = to_table(&server).unwrap();
//! assert_eq!(table.to_canonical_string(), "host = localhost\nport = 8080\ntags = a,b");
//! ```

use crate::{Error, PropertiesOptions, PropertyTable, Result, Separator};
use serde::ser::{self, Impossible, Serialize};
use std::fmt::Write;

/// How keys and values are escaped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Style {
    /// Round-trippable through the decoder.
    Canonical,
    /// Human readable.
    Display,
}

pub(crate) fn render(table: &PropertyTable, options: &PropertiesOptions) -> String {
    let style = if options.escape_values {
        Style::Canonical
    } else {
        Style::Display
    };

    let mut entries: Vec<_> = table.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

    let mut output = String::with_capacity(entries.len() * 32);
    for (index, (key, value)) in entries.into_iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }

        write_key(&mut output, key, style);
        // A bare space after an empty key would be skipped as leading blank.
        let separator = match options.separator {
            Separator::Space if key.is_empty() => Separator::Equals,
            other => other,
        };
        output.push_str(separator.as_str());
        write_value(&mut output, value, style);
    }

    if options.trailing_newline && !table.is_empty() {
        output.push('\n');
    }

    output
}

fn write_key(output: &mut String, key: &str, style: Style) {
    match style {
        Style::Canonical => escape_key(output, &escape_unicode(key)),
        Style::Display => escape_key(output, key),
    }
}

fn write_value(output: &mut String, value: &str, style: Style) {
    match style {
        Style::Canonical => {
            let escaped = escape_unicode(value);
            // The separator scan would swallow these as part of the separator.
            if escaped.starts_with(&[' ', ':', '='][..]) {
                output.push('\\');
            }
            output.push_str(&escaped);
        }
        Style::Display => output.push_str(value),
    }
}

/// Backslash-escapes the characters that would end a key or start a comment.
fn escape_key(output: &mut String, key: &str) {
    for (index, ch) in key.chars().enumerate() {
        match ch {
            ':' | '=' | ' ' => output.push('\\'),
            '#' | '!' if index == 0 => output.push('\\'),
            _ => {}
        }
        output.push(ch);
    }
}

/// Escapes everything the decoder would not read back verbatim.
///
/// Characters outside printable ASCII become `\uxxxx`, supplementary ones as a
/// UTF-16 surrogate pair.
fn escape_unicode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            ' '..='~' => out.push(ch),
            _ => {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    // Writing into a String cannot fail.
                    let _ = write!(out, "\\u{:04x}", unit);
                }
            }
        }
    }
    out
}

/// Serializes a struct or map into a [`PropertyTable`].
///
/// # Errors
///
/// [`Error::UnsupportedType`] for anything that is not a struct or map of
/// flat values.
pub fn to_table<T>(value: &T) -> Result<PropertyTable>
where
    T: ?Sized + Serialize,
{
    value.serialize(TableSerializer)
}

/// Serializes the top level of a value: only maps and structs produce a table.
pub struct TableSerializer;

/// Collects the fields of a struct or the entries of a map.
pub struct SerializeTable {
    table: PropertyTable,
    current_key: Option<String>,
}

/// Serializes a single field into its string form.
struct ValueSerializer;

/// Collects list items before joining them with `,`.
struct SerializeList {
    items: Vec<String>,
}

fn top_level(kind: &str) -> Error {
    Error::unsupported_type(&format!("{kind} at the top level, expected a struct or map"))
}

impl ser::Serializer for TableSerializer {
    type Ok = PropertyTable;
    type Error = Error;

    type SerializeSeq = Impossible<PropertyTable, Error>;
    type SerializeTuple = Impossible<PropertyTable, Error>;
    type SerializeTupleStruct = Impossible<PropertyTable, Error>;
    type SerializeTupleVariant = Impossible<PropertyTable, Error>;
    type SerializeMap = SerializeTable;
    type SerializeStruct = SerializeTable;
    type SerializeStructVariant = Impossible<PropertyTable, Error>;

    fn serialize_bool(self, _v: bool) -> Result<PropertyTable> {
        Err(top_level("bool"))
    }

    fn serialize_i8(self, _v: i8) -> Result<PropertyTable> {
        Err(top_level("integer"))
    }

    fn serialize_i16(self, _v: i16) -> Result<PropertyTable> {
        Err(top_level("integer"))
    }

    fn serialize_i32(self, _v: i32) -> Result<PropertyTable> {
        Err(top_level("integer"))
    }

    fn serialize_i64(self, _v: i64) -> Result<PropertyTable> {
        Err(top_level("integer"))
    }

    fn serialize_u8(self, _v: u8) -> Result<PropertyTable> {
        Err(top_level("integer"))
    }

    fn serialize_u16(self, _v: u16) -> Result<PropertyTable> {
        Err(top_level("integer"))
    }

    fn serialize_u32(self, _v: u32) -> Result<PropertyTable> {
        Err(top_level("integer"))
    }

    fn serialize_u64(self, _v: u64) -> Result<PropertyTable> {
        Err(top_level("integer"))
    }

    fn serialize_f32(self, _v: f32) -> Result<PropertyTable> {
        Err(top_level("float"))
    }

    fn serialize_f64(self, _v: f64) -> Result<PropertyTable> {
        Err(top_level("float"))
    }

    fn serialize_char(self, _v: char) -> Result<PropertyTable> {
        Err(top_level("char"))
    }

    fn serialize_str(self, _v: &str) -> Result<PropertyTable> {
        Err(top_level("string"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<PropertyTable> {
        Err(top_level("bytes"))
    }

    fn serialize_none(self) -> Result<PropertyTable> {
        Ok(PropertyTable::new())
    }

    fn serialize_some<T>(self, value: &T) -> Result<PropertyTable>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<PropertyTable> {
        Ok(PropertyTable::new())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<PropertyTable> {
        Ok(PropertyTable::new())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<PropertyTable> {
        Err(top_level("enum"))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<PropertyTable>
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
    ) -> Result<PropertyTable>
    where
        T: ?Sized + Serialize,
    {
        Err(top_level("enum"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(top_level("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(top_level("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(top_level("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(top_level("enum"))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeTable> {
        Ok(SerializeTable::new(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeTable> {
        Ok(SerializeTable::new(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(top_level("enum"))
    }
}

impl SerializeTable {
    fn new(capacity: usize) -> Self {
        SerializeTable {
            table: PropertyTable::with_capacity(capacity),
            current_key: None,
        }
    }
}

impl ser::SerializeMap for SerializeTable {
    type Ok = PropertyTable;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(key.serialize(ValueSerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called before serialize_key"))?;
        let value = value.serialize(ValueSerializer)?;
        self.table.set(key, value);
        Ok(())
    }

    fn end(self) -> Result<PropertyTable> {
        Ok(self.table)
    }
}

impl ser::SerializeStruct for SerializeTable {
    type Ok = PropertyTable;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let value = value.serialize(ValueSerializer)?;
        self.table.set(key, value);
        Ok(())
    }

    fn end(self) -> Result<PropertyTable> {
        Ok(self.table)
    }
}

impl ser::Serializer for ValueSerializer {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = SerializeList;
    type SerializeTuple = SerializeList;
    type SerializeTupleStruct = SerializeList;
    type SerializeTupleVariant = Impossible<String, Error>;
    type SerializeMap = Impossible<String, Error>;
    type SerializeStruct = Impossible<String, Error>;
    type SerializeStructVariant = Impossible<String, Error>;

    fn serialize_bool(self, v: bool) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_f32(self, v: f32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_f64(self, v: f64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_char(self, v: char) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String> {
        Err(Error::unsupported_type("bytes"))
    }

    fn serialize_none(self) -> Result<String> {
        Ok(String::new())
    }

    fn serialize_some<T>(self, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<String> {
        Ok(String::new())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String> {
        Ok(String::new())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String> {
        Ok(variant.to_string())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<String>
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
    ) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_type("newtype variants"))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeList> {
        Ok(SerializeList {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeList> {
        ser::Serializer::serialize_seq(self, Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeList> {
        ser::Serializer::serialize_seq(self, Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_type("tuple variants"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::unsupported_type("nested maps"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(Error::unsupported_type("nested structs"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported_type("struct variants"))
    }
}

impl SerializeList {
    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let item = value.serialize(ValueSerializer)?;
        if item.contains(',') {
            return Err(Error::unsupported_type("list items containing ','"));
        }
        self.items.push(item);
        Ok(())
    }
}

impl ser::SerializeSeq for SerializeList {
    type Ok = String;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<String> {
        Ok(self.items.join(","))
    }
}

impl ser::SerializeTuple for SerializeList {
    type Ok = String;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<String> {
        Ok(self.items.join(","))
    }
}

impl ser::SerializeTupleStruct for SerializeList {
    type Ok = String;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<String> {
        Ok(self.items.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[test]
    fn test_sorted_by_code_point() {
        let table = properties! { "b" => "2", "B" => "3", "a" => "1", "é" => "4" };
        assert_eq!(
            table.to_display_string(),
            "B = 3\na = 1\nb = 2\né = 4"
        );
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(PropertyTable::new().to_canonical_string(), "");
        let options = PropertiesOptions::new().with_trailing_newline(true);
        assert_eq!(PropertyTable::new().render(&options), "");
    }

    #[test]
    fn test_canonical_escapes() {
        let table = properties! {
            "install root" => "/opt\\ddd",
            "msg" => "\u{0e4f}",
            "multi" => "a\nb\rc\td",
            "astral" => "\u{1D54A}",
        };
        assert_eq!(
            table.to_canonical_string(),
            "astral = \\ud835\\udd4a\n\
             install\\ root = /opt\\\\ddd\n\
             msg = \\u0e4f\n\
             multi = a\\nb\\rc\\u0009d"
        );
    }

    #[test]
    fn test_display_keeps_values() {
        let table = properties! { "weird:properties" => "can be used too.", "msg" => "\u{0e4f}" };
        assert_eq!(
            table.to_display_string(),
            "msg = \u{0e4f}\nweird\\:properties = can be used too."
        );
    }

    #[test]
    fn test_key_escaping() {
        let mut out = String::new();
        escape_key(&mut out, "#a=b:c d!");
        assert_eq!(out, "\\#a\\=b\\:c\\ d!");
    }

    #[test]
    fn test_value_leading_separator_is_escaped() {
        let table = properties! { "a" => " x", "b" => "=y", "c" => ":z", "d" => "x " };
        assert_eq!(
            table.to_canonical_string(),
            "a = \\ x\nb = \\=y\nc = \\:z\nd = x "
        );
    }

    #[test]
    fn test_separators() {
        let table = properties! { "" => "v", "k" => "" };
        let space = PropertiesOptions::new().with_separator(Separator::Space);
        assert_eq!(table.render(&space), " = v\nk ");

        let colon = PropertiesOptions::new()
            .with_separator(Separator::Colon)
            .with_trailing_newline(true);
        assert_eq!(table.render(&colon), ": v\nk: \n");
    }

    #[derive(Serialize)]
    enum Mode {
        Fast,
    }

    #[derive(Serialize)]
    struct Flat {
        name: String,
        port: u16,
        ratio: f64,
        enabled: bool,
        missing: Option<u8>,
        mode: Mode,
        hosts: Vec<&'static str>,
    }

    #[test]
    fn test_to_table_flat_struct() {
        let table = to_table(&Flat {
            name: "svc".to_string(),
            port: 80,
            ratio: 0.5,
            enabled: true,
            missing: None,
            mode: Mode::Fast,
            hosts: vec!["a", "b"],
        })
        .unwrap();

        assert_eq!(table.get("name").unwrap(), "svc");
        assert_eq!(table.get("port").unwrap(), "80");
        assert_eq!(table.get("ratio").unwrap(), "0.5");
        assert_eq!(table.get("enabled").unwrap(), "true");
        assert_eq!(table.get("missing").unwrap(), "");
        assert_eq!(table.get("mode").unwrap(), "Fast");
        assert_eq!(table.get("hosts").unwrap(), "a,b");
    }

    #[test]
    fn test_to_table_map() {
        let mut map = BTreeMap::new();
        map.insert(1, "one");
        map.insert(2, "two");
        let table = to_table(&map).unwrap();
        assert_eq!(table.to_canonical_string(), "1 = one\n2 = two");
    }

    #[derive(Serialize)]
    struct Inner {
        x: i32,
    }

    #[derive(Serialize)]
    struct Outer {
        inner: Inner,
    }

    #[test]
    fn test_to_table_rejects_nesting() {
        let result = to_table(&Outer {
            inner: Inner { x: 1 },
        });
        assert!(matches!(result, Err(Error::UnsupportedType(_))));
        assert!(matches!(to_table(&42), Err(Error::UnsupportedType(_))));
        assert!(matches!(
            to_table(&vec!["a,b"]),
            Err(Error::UnsupportedType(_))
        ));
    }
}
