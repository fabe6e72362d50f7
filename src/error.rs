//! Error types for `.properties` decoding, table access and the Serde layer.
//!
//! ## Error Categories
//!
//! - **Decode Errors**: a `\u` escape that is not followed by four hex digits
//!   (or that names an unpaired UTF-16 surrogate). Fatal for the whole decode.
//! - **Lookup Errors**: [`PropertyTable::get`](crate::PropertyTable::get) or
//!   [`PropertyTable::delete`](crate::PropertyTable::delete) on an absent key.
//! - **I/O Errors**: failures of the underlying byte source, passed through
//!   untouched.
//! - **Serde Errors**: values that cannot be converted to or from the flat
//!   string-to-string shape of a property table.
//!
//! Malformed separators, unterminated comments and dangling continuations are
//! not errors: the decoder degrades gracefully and registers a best-effort
//! entry instead.
//!
//! ## Examples
//!
//! ```rust
//! use serde_properties::{parse_str, Error};
//!
//! let result = parse_str("token.a = \\u0e\n");
//! assert!(matches!(result, Err(Error::MalformedUnicodeEscape { .. })));
//! ```

use std::fmt;
use std::io;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A `\u` escape was not followed by exactly four hexadecimal digits, or
    /// named a UTF-16 surrogate without its partner.
    #[error("Malformed unicode escape on line {line}: {escape:?}")]
    MalformedUnicodeEscape { line: usize, escape: String },

    /// Lookup or removal of a key the table does not contain.
    #[error("Key not found: {0:?}")]
    KeyNotFound(String),

    /// The byte source failed to produce the next byte.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A character of a text input cannot be represented as a single
    /// ISO-8859-1 byte.
    #[error("Character {ch:?} at offset {offset} is not encodable as ISO-8859-1")]
    Unencodable { ch: char, offset: usize },

    /// Unsupported type for the flat property shape
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// A property value could not be converted to the requested type
    #[error("Invalid value for key {key:?}: {msg}")]
    InvalidValue { key: String, msg: String },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a malformed unicode escape error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_properties::Error;
    ///
    /// let err = Error::malformed_unicode_escape(3, "\\u0e");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn malformed_unicode_escape(line: usize, escape: &str) -> Self {
        Error::MalformedUnicodeEscape {
            line,
            escape: escape.to_string(),
        }
    }

    /// Creates a key-not-found error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_properties::Error;
    ///
    /// let err = Error::key_not_found("java.home");
    /// assert!(err.to_string().contains("java.home"));
    /// ```
    pub fn key_not_found(key: &str) -> Self {
        Error::KeyNotFound(key.to_string())
    }

    /// Creates an invalid value error for the property stored under `key`.
    pub fn invalid_value<T: fmt::Display>(key: &str, msg: T) -> Self {
        Error::InvalidValue {
            key: key.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates an unsupported type error for shapes a property table cannot hold.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_properties::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_is_preserved() {
        let err: Error = io::Error::new(io::ErrorKind::UnexpectedEof, "pipe closed").into();
        match err {
            Error::Io(inner) => {
                assert_eq!(inner.kind(), io::ErrorKind::UnexpectedEof);
                assert_eq!(inner.to_string(), "pipe closed");
            }
            other => panic!("Expected Io, got {other:?}"),
        }
    }

    #[test]
    fn test_messages() {
        let err = Error::invalid_value("port", "invalid digit found in string");
        assert_eq!(
            err.to_string(),
            "Invalid value for key \"port\": invalid digit found in string"
        );

        let err = Error::Unencodable { ch: '€', offset: 4 };
        assert!(err.to_string().contains("offset 4"));
    }
}
