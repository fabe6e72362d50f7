//! # serde_properties
//!
//! A streaming decoder and canonical encoder for Java `.properties` files, with
//! Serde integration.
//!
//! ## What is a `.properties` file?
//!
//! A line-oriented configuration format of `key = value` entries, with `#` and
//! `!` comments, backslash escapes, `\uXXXX` unicode escapes and line
//! continuations. See [`format`] for the exact dialect.
//!
//! ## Key Features
//!
//! - **Streaming**: the decoder reads one byte at a time from any
//!   [`ByteSource`] and never buffers ahead
//! - **Round trips**: the canonical rendering decodes back to an equal table
//! - **Serde Compatible**: read typed configuration with
//!   `#[derive(Deserialize)]`, write it back with `#[derive(Serialize)]`
//! - **No Unsafe Code**
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! serde_properties = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Decoding into a table
//!
//! ```rust
//! use serde_properties::parse_str;
//!
//! let table = parse_str("\
//! ! Database settings
//! db.url = jdbc:postgresql://localhost/app
//! db.pool: 16
//! greeting   \\u0e4f hello
//! ").unwrap();
//!
//! assert_eq!(table.get("db.pool").unwrap(), "16");
//! assert_eq!(table.get("greeting").unwrap(), "๏ hello");
//! ```
//!
//! ### Typed configuration
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_properties::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     secure: bool,
//! }
//!
//! let server: Server = from_str("host=example.org\nport=8443\nsecure=true\n").unwrap();
//! assert_eq!(server.port, 8443);
//!
//! let text = to_string(&server).unwrap();
//! assert_eq!(text, "host = example.org\nport = 8443\nsecure = true");
//! ```
//!
//! ### Building tables with properties!
//!
//! ```rust
//! use serde_properties::properties;
//!
//! let table = properties! {
//!     "weird:properties" => "can be used too.",
//!     "token" => "\u{0e4f}",
//! };
//!
//! assert_eq!(
//!     table.to_string(),
//!     "token = \\u0e4f\nweird\\:properties = can be used too."
//! );
//! ```
//!
//! ## Logging
//!
//! Decoded entries are reported through the [`log`](https://docs.rs/log) facade
//! at `debug` level, individual scanner steps at `trace` level. Nothing is
//! printed unless the application installs a logger.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Decoding a file and looking up keys
//! - **`typed_config.rs`** - Reading and writing a configuration struct
//! - **`custom_options.rs`** - Separators and the display form
//!
//! Run any example with: `cargo run --example <name>`

pub mod de;
pub mod decoder;
pub mod error;
pub mod format;
pub mod macros;
pub mod options;
pub mod ser;
pub mod source;
pub mod table;

pub use de::{from_table, Deserializer};
pub use decoder::{decode_into, Decoder, EntrySink};
pub use error::{Error, Result};
pub use options::{PropertiesOptions, Separator};
pub use ser::{to_table, TableSerializer};
pub use source::{ByteSource, Latin1Source, ReadSource, SliceSource};
pub use table::PropertyTable;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Decodes a string into a [`PropertyTable`].
///
/// Every character of `s` must fit in one ISO-8859-1 byte; write anything
/// wider as a `\uXXXX` escape.
///
/// # Examples
///
/// ```rust
/// use serde_properties::parse_str;
///
/// let table = parse_str("token\\ d allowed\n").unwrap();
/// assert_eq!(table.get("token d").unwrap(), "allowed");
/// ```
///
/// # Errors
///
/// - [`Error::MalformedUnicodeEscape`] for a bad `\u` escape.
/// - [`Error::Unencodable`] for a character above `U+00FF`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_str(s: &str) -> Result<PropertyTable> {
    s.parse()
}

/// Decodes ISO-8859-1 bytes into a [`PropertyTable`].
///
/// # Examples
///
/// ```rust
/// use serde_properties::parse_slice;
///
/// let table = parse_slice(b"caf\xe9 = ouvert\n").unwrap();
/// assert_eq!(table.get("café").unwrap(), "ouvert");
/// ```
///
/// # Errors
///
/// Returns [`Error::MalformedUnicodeEscape`] for a bad `\u` escape.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_slice(v: &[u8]) -> Result<PropertyTable> {
    let mut table = PropertyTable::new();
    table.decode_from(SliceSource::new(v))?;
    Ok(table)
}

/// Decodes an I/O stream into a [`PropertyTable`].
///
/// The reader is consumed one byte at a time; wrap unbuffered readers in an
/// [`io::BufReader`].
///
/// # Examples
///
/// ```rust
/// use serde_properties::parse_reader;
/// use std::io::Cursor;
///
/// let table = parse_reader(Cursor::new(b"a = 1\nb = 2")).unwrap();
/// assert_eq!(table.len(), 2);
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, or [`Error::MalformedUnicodeEscape`]
/// for a bad `\u` escape.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_reader<R>(reader: R) -> Result<PropertyTable>
where
    R: io::Read,
{
    let mut table = PropertyTable::new();
    table.decode_from(ReadSource::new(reader))?;
    Ok(table)
}

/// Deserialize an instance of type `T` from `.properties` text.
///
/// # Examples
///
/// ```rust
/// use serde_properties::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x = 1\ny = 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the text does not decode, or the table cannot be
/// deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_table(&parse_str(s)?)
}

/// Deserialize an instance of type `T` from ISO-8859-1 bytes.
///
/// # Errors
///
/// Returns an error if the bytes do not decode, or the table cannot be
/// deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    from_table(&parse_slice(v)?)
}

/// Deserialize an instance of type `T` from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use serde_properties::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_reader(Cursor::new(b"x: 1\ny: 2")).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input does not decode, or the table
/// cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    from_table(&parse_reader(reader)?)
}

/// Serialize any `T: Serialize` to the canonical `.properties` form.
///
/// # Examples
///
/// ```rust
/// use serde_properties::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), "x = 1\ny = 2");
/// ```
///
/// # Errors
///
/// Returns an error if `T` is not a struct or map of flat values.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &PropertiesOptions::default())
}

/// Serialize any `T: Serialize` to the human-readable display form.
///
/// Values are written unescaped, so the output may not decode back to the
/// same values.
///
/// # Errors
///
/// Returns an error if `T` is not a struct or map of flat values.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_display<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &PropertiesOptions::display())
}

/// Serialize any `T: Serialize` with custom rendering options.
///
/// # Examples
///
/// ```rust
/// use serde_properties::{to_string_with_options, PropertiesOptions, Separator};
/// use std::collections::BTreeMap;
///
/// let mut map = BTreeMap::new();
/// map.insert("key", "value");
///
/// let options = PropertiesOptions::new()
///     .with_separator(Separator::Colon)
///     .with_trailing_newline(true);
/// assert_eq!(to_string_with_options(&map, &options).unwrap(), "key: value\n");
/// ```
///
/// # Errors
///
/// Returns an error if `T` is not a struct or map of flat values.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &PropertiesOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(to_table(value)?.render(options))
}

/// Serialize any `T: Serialize` to a writer in the canonical form.
///
/// The canonical form is pure ASCII, so the bytes written are valid in both
/// ISO-8859-1 and UTF-8.
///
/// # Examples
///
/// ```rust
/// use serde_properties::to_writer;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(buffer, b"x = 1\ny = 2");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string(value)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
    }

    fn alice() -> User {
        User {
            id: 123,
            name: "Alice Ünal".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
        }
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let text = to_string(&alice()).unwrap();
        assert_eq!(
            text,
            "active = true\nid = 123\nname = Alice \\u00dcnal\ntags = admin,user"
        );

        let back: User = from_str(&text).unwrap();
        assert_eq!(back, alice());
    }

    #[test]
    fn test_display_form() {
        let text = to_string_display(&alice()).unwrap();
        assert!(text.contains("name = Alice Ünal"));
    }

    #[test]
    fn test_writer_and_reader() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &alice()).unwrap();

        let back: User = from_reader(buffer.as_slice()).unwrap();
        assert_eq!(back, alice());

        let back: User = from_slice(&buffer).unwrap();
        assert_eq!(back, alice());
    }

    #[test]
    fn test_parse_functions_agree() {
        let input = "a = 1\nb: two\n";
        let table = parse_str(input).unwrap();
        assert_eq!(table, parse_slice(input.as_bytes()).unwrap());
        assert_eq!(table, parse_reader(input.as_bytes()).unwrap());
    }

    #[test]
    fn test_options_render() {
        let options = PropertiesOptions::new().with_separator(Separator::Space);
        let text = to_string_with_options(&alice(), &options).unwrap();
        let back: User = from_str(&text).unwrap();
        assert_eq!(back, alice());
    }
}
