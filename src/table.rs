//! The property table.
//!
//! This module provides [`PropertyTable`], a wrapper around [`IndexMap`] holding
//! decoded keys and values. Iteration follows insertion order, which is not
//! part of the contract; rendering always sorts by key.
//!
//! ## Examples
//!
//! ```rust
//! use serde_properties::PropertyTable;
//!
//! let mut table = PropertyTable::new();
//! table.set("java.home", "/opt/java");
//! table.set("java.home", "/usr/lib/jvm");
//!
//! assert_eq!(table.len(), 1);
//! assert_eq!(table.get("java.home").unwrap(), "/usr/lib/jvm");
//! ```

use crate::decoder::{Decoder, EntrySink};
use crate::{ser, ByteSource, Error, Latin1Source, PropertiesOptions, Result};
use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A map of unique string keys to string values.
///
/// # Examples
///
/// ```rust
/// use serde_properties::PropertyTable;
///
/// let mut table: PropertyTable = "b = 2\na = 1\n".parse().unwrap();
/// table.set("c", "3");
///
/// assert_eq!(table.to_canonical_string(), "a = 1\nb = 2\nc = 3");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PropertyTable(IndexMap<String, String>);

impl PropertyTable {
    /// Creates an empty `PropertyTable`.
    #[must_use]
    pub fn new() -> Self {
        PropertyTable(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        PropertyTable(IndexMap::with_capacity(capacity))
    }

    /// Sets `key` to `value`, returning the value it replaces.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_properties::PropertyTable;
    ///
    /// let mut table = PropertyTable::new();
    /// assert!(table.set("key", "1").is_none());
    /// assert_eq!(table.set("key", "2").as_deref(), Some("1"));
    /// ```
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the table has no such key.
    pub fn get(&self, key: &str) -> Result<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| Error::key_not_found(key))
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes `key` and returns its value.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the table has no such key.
    pub fn delete(&mut self, key: &str) -> Result<String> {
        self.0
            .shift_remove(key)
            .ok_or_else(|| Error::key_not_found(key))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys. The order is unspecified; the iterator
    /// is `Clone`, so it can be restarted from any point.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, String> {
        self.0.keys()
    }

    /// Returns an iterator over the entries, in unspecified order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, String> {
        self.0.iter()
    }

    /// Decodes everything `source` yields into this table.
    ///
    /// Existing keys are overwritten by later entries with the same key.
    ///
    /// # Errors
    ///
    /// On [`Error::MalformedUnicodeEscape`] or a source error the decode stops;
    /// entries registered up to that point are kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_properties::{PropertyTable, SliceSource};
    ///
    /// let mut table = PropertyTable::new();
    /// table.decode_from(SliceSource::new(b"a=1\na:2\nb 3\n")).unwrap();
    ///
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.get("a").unwrap(), "2");
    /// ```
    pub fn decode_from<S: ByteSource>(&mut self, source: S) -> Result<()> {
        Decoder::new(source).decode_into(self)
    }

    /// Renders the canonical form: sorted by key, fully escaped, decodes back to
    /// an equal table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_properties::properties;
    ///
    /// let table = properties! { "weird:key" => "๏", "a" => "1" };
    /// assert_eq!(table.to_canonical_string(), "a = 1\nweird\\:key = \\u0e4f");
    /// ```
    #[must_use]
    pub fn to_canonical_string(&self) -> String {
        self.render(&PropertiesOptions::new())
    }

    /// Renders the display form: sorted by key, values written verbatim.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_properties::properties;
    ///
    /// let table = properties! { "weird:key" => "๏", "a" => "1" };
    /// assert_eq!(table.to_display_string(), "a = 1\nweird\\:key = ๏");
    /// ```
    #[must_use]
    pub fn to_display_string(&self) -> String {
        self.render(&PropertiesOptions::display())
    }

    /// Renders the table with custom options.
    #[must_use]
    pub fn render(&self, options: &PropertiesOptions) -> String {
        ser::render(self, options)
    }
}

impl EntrySink for PropertyTable {
    fn register(&mut self, key: String, value: String) {
        self.0.insert(key, value);
    }
}

/// Formats the canonical form.
impl fmt::Display for PropertyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

/// Decodes a string whose characters all fit in ISO-8859-1.
impl FromStr for PropertyTable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut table = PropertyTable::new();
        table.decode_from(Latin1Source::new(s))?;
        Ok(table)
    }
}

/// Equal when both hold the same entries, in any order.
impl PartialEq for PropertyTable {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for PropertyTable {}

impl<'a> IntoIterator for &'a PropertyTable {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for PropertyTable {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertyTable {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = PropertyTable::new();
        table.extend(iter);
        table
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for PropertyTable {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

/// Serializes as a map sorted by key.
impl Serialize for PropertyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct TableVisitor;

impl<'de> Visitor<'de> for TableVisitor {
    type Value = PropertyTable;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of strings to strings")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<PropertyTable, A::Error> {
        let mut table = PropertyTable::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, String>()? {
            table.set(key, value);
        }
        Ok(table)
    }
}

impl<'de> Deserialize<'de> for PropertyTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(TableVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_overwrite() {
        let mut table = PropertyTable::new();
        assert!(table.is_empty());
        assert_eq!(table.set("a", "1"), None);
        assert_eq!(table.set("a", "2"), Some("1".to_string()));
        assert_eq!(table.get("a").unwrap(), "2");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_missing_keys() {
        let mut table = PropertyTable::new();
        assert!(matches!(table.get("nope"), Err(Error::KeyNotFound(k)) if k == "nope"));
        assert!(matches!(table.delete("nope"), Err(Error::KeyNotFound(_))));
        assert!(!table.contains("nope"));
    }

    #[test]
    fn test_delete() {
        let mut table: PropertyTable = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(table.delete("a").unwrap(), "1");
        assert!(!table.contains("a"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_keys_restartable() {
        let table: PropertyTable = [("x", "1"), ("y", "2"), ("z", "3")].into_iter().collect();
        let keys = table.keys();
        let first: Vec<_> = keys.clone().collect();
        let second: Vec<_> = keys.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: PropertyTable = [("x", "1"), ("y", "2")].into_iter().collect();
        let b: PropertyTable = [("y", "2"), ("x", "1")].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_decode_from_overwrites_existing() {
        let mut table = PropertyTable::new();
        table.set("a", "old");
        table.set("keep", "me");
        table.decode_from(Latin1Source::new("a = new\n")).unwrap();
        assert_eq!(table.get("a").unwrap(), "new");
        assert_eq!(table.get("keep").unwrap(), "me");
    }

    #[test]
    fn test_from_str_rejects_wide_chars() {
        let result = "a = 1\nb = €\n".parse::<PropertyTable>();
        assert!(matches!(result, Err(Error::Unencodable { ch: '€', .. })));
    }

    #[test]
    fn test_display_is_canonical() {
        let table: PropertyTable = [("k", "a\tb")].into_iter().collect();
        assert_eq!(table.to_string(), "k = a\\u0009b");
    }
}
