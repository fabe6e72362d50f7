//! Deserialization from a property table.
//!
//! This module provides the [`Deserializer`] that exposes a decoded
//! [`PropertyTable`] to Serde as a map of string keys.
//!
//! ## Overview
//!
//! Every value in a table is text. The deserializer converts it on demand to
//! whatever the target type asks for:
//!
//! - **Scalars**: `bool`, integers, floats and `char` are parsed from the
//!   trimmed value
//! - **Options**: an empty value is `None`, anything else is `Some`
//! - **Lists**: comma-separated, each item trimmed; an empty value is an empty
//!   list
//! - **Enums**: unit variants, matched by name
//!
//! Nested maps and structs have no flat representation and are rejected.
//!
//! ## Usage
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_properties::{from_table, properties};
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Database { url: String, pool: u32, replicas: Vec<String> }
//!
//! let table = properties! {
//!     "url" => "postgres://localhost/app",
//!     "pool" => " 16 ",
//!     "replicas" => "db1, db2",
//! };
//!
//! let db: Database = from_table(&table).unwrap();
//! assert_eq!(db.pool, 16);
//! assert_eq!(db.replicas, vec!["db1", "db2"]);
//! ```

use crate::{Error, PropertyTable, Result};
use serde::de::value::BorrowedStrDeserializer;
use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::{de, forward_to_deserialize_any};

/// Deserializes a `T` from the entries of `table`.
///
/// # Errors
///
/// - [`Error::InvalidValue`] when a value does not parse as its field type.
/// - [`Error::UnsupportedType`] for nested maps and structs.
/// - Serde's own errors for missing or unknown fields, as [`Error::Custom`].
pub fn from_table<T>(table: &PropertyTable) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(Deserializer::new(table))
}

/// The table deserializer.
///
/// Created via [`Deserializer::new`]; a struct or map target receives one
/// field per entry.
pub struct Deserializer<'a> {
    table: &'a PropertyTable,
}

impl<'a> Deserializer<'a> {
    pub fn new(table: &'a PropertyTable) -> Self {
        Deserializer { table }
    }
}

impl<'de> de::Deserializer<'de> for Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(MapDeserializer::new(self.table))
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

struct MapDeserializer<'de> {
    iter: indexmap::map::Iter<'de, String, String>,
    value: Option<(&'de str, &'de str)>,
}

impl<'de> MapDeserializer<'de> {
    fn new(table: &'de PropertyTable) -> Self {
        MapDeserializer {
            iter: table.iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some((key.as_str(), value.as_str()));
                seed.deserialize(BorrowedStrDeserializer::new(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some((key, value)) => seed.deserialize(ValueDeserializer::new(key, value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

/// Hands out list items, all reporting errors against the same key.
struct ListDeserializer<'de> {
    key: &'de str,
    items: std::vec::IntoIter<&'de str>,
}

impl<'de> ListDeserializer<'de> {
    fn new(key: &'de str, value: &'de str) -> Self {
        let items: Vec<&str> = if value.trim().is_empty() {
            Vec::new()
        } else {
            value.split(',').map(str::trim).collect()
        };
        ListDeserializer {
            key,
            items: items.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for ListDeserializer<'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.items.next() {
            Some(item) => seed
                .deserialize(ValueDeserializer::new(self.key, item))
                .map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.items.len())
    }
}

/// A single property value, converted on request.
struct ValueDeserializer<'de> {
    key: &'de str,
    value: &'de str,
}

impl<'de> ValueDeserializer<'de> {
    fn new(key: &'de str, value: &'de str) -> Self {
        ValueDeserializer { key, value }
    }

    fn parse<T>(&self) -> Result<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.value
            .trim()
            .parse()
            .map_err(|e| Error::invalid_value(self.key, e))
    }
}

macro_rules! deserialize_parsed {
    ($($method:ident => $visit:ident,)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                visitor.$visit(self.parse()?)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for ValueDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.value)
    }

    deserialize_parsed! {
        deserialize_bool => visit_bool,
        deserialize_i8 => visit_i8,
        deserialize_i16 => visit_i16,
        deserialize_i32 => visit_i32,
        deserialize_i64 => visit_i64,
        deserialize_i128 => visit_i128,
        deserialize_u8 => visit_u8,
        deserialize_u16 => visit_u16,
        deserialize_u32 => visit_u32,
        deserialize_u64 => visit_u64,
        deserialize_u128 => visit_u128,
        deserialize_f32 => visit_f32,
        deserialize_f64 => visit_f64,
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let mut chars = self.value.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => visitor.visit_char(ch),
            _ => Err(Error::invalid_value(self.key, "expected a single character")),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.value.is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.value.trim().is_empty() {
            visitor.visit_unit()
        } else {
            Err(Error::invalid_value(self.key, "expected an empty value"))
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_unit(self, visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_seq(ListDeserializer::new(self.key, self.value))
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_seq(self, visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_seq(self, visitor)
    }

    fn deserialize_map<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_type("nested maps"))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_type("nested structs"))
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_enum(self.value.trim().into_deserializer())
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        str string bytes byte_buf identifier
    }
}
