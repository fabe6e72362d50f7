//! Byte sources feeding the decoder.
//!
//! The decoder reads through the [`ByteSource`] trait one byte at a time and
//! never looks back. Three adapters cover the common inputs:
//!
//! - [`SliceSource`]: an in-memory byte slice
//! - [`Latin1Source`]: a `&str` whose characters all fit in one ISO-8859-1 byte
//! - [`ReadSource`]: anything implementing [`std::io::Read`]
//!
//! ## Examples
//!
//! ```rust
//! use serde_properties::{ByteSource, SliceSource};
//!
//! let mut source = SliceSource::new(b"k=v");
//! assert_eq!(source.next_byte().unwrap(), Some(b'k'));
//! ```

use crate::{Error, Result};
use std::io;
use std::str::CharIndices;

/// A sequential supply of bytes.
///
/// `Ok(None)` signals end of input. Once a byte has been returned it is never
/// asked for again. A source that never ends blocks the decoder on its next
/// read; the decoder has no timeout of its own.
pub trait ByteSource {
    /// Returns the next byte, or `Ok(None)` when the input is exhausted.
    ///
    /// # Errors
    ///
    /// Whatever the underlying input reports; the decoder passes it through
    /// unchanged.
    fn next_byte(&mut self) -> Result<Option<u8>>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn next_byte(&mut self) -> Result<Option<u8>> {
        (**self).next_byte()
    }
}

/// Input over a byte slice, tracks read position.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> SliceSource<'a> {
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        SliceSource { bytes, position: 0 }
    }
}

impl ByteSource for SliceSource<'_> {
    fn next_byte(&mut self) -> Result<Option<u8>> {
        let byte = self.bytes.get(self.position).copied();
        if byte.is_some() {
            self.position += 1;
        }
        Ok(byte)
    }
}

/// Input over a string that is re-encoded as ISO-8859-1 on the fly.
///
/// Every `char` up to `U+00FF` maps to the byte of the same value. Anything
/// above fails with [`Error::Unencodable`] when it is reached, so entries
/// before it are still decoded.
#[derive(Debug, Clone)]
pub struct Latin1Source<'a> {
    chars: CharIndices<'a>,
}

impl<'a> Latin1Source<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Latin1Source {
            chars: text.char_indices(),
        }
    }
}

impl ByteSource for Latin1Source<'_> {
    fn next_byte(&mut self) -> Result<Option<u8>> {
        match self.chars.next() {
            Some((offset, ch)) => u8::try_from(u32::from(ch))
                .map(Some)
                .map_err(|_| Error::Unencodable { ch, offset }),
            None => Ok(None),
        }
    }
}

/// Input over any [`io::Read`].
///
/// Reads are issued one byte at a time, so wrap files and sockets in a
/// [`io::BufReader`] first.
#[derive(Debug)]
pub struct ReadSource<R> {
    bytes: io::Bytes<R>,
}

impl<R: io::Read> ReadSource<R> {
    pub fn new(reader: R) -> Self {
        ReadSource {
            bytes: reader.bytes(),
        }
    }
}

impl<R: io::Read> ByteSource for ReadSource<R> {
    fn next_byte(&mut self) -> Result<Option<u8>> {
        self.bytes.next().transpose().map_err(Error::from)
    }
}
