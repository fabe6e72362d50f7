//! Streaming `.properties` decoding.
//!
//! This module provides the [`Decoder`], a finite-state byte scanner that turns
//! a [`ByteSource`] into decoded `(key, value)` entries and hands each one to
//! an [`EntrySink`].
//!
//! ## Overview
//!
//! The scanner reads exactly one symbol at a time (a byte or end of input) and
//! never buffers ahead. It moves between five states:
//!
//! - **Initial**: start of a logical line, skipping blanks
//! - **Comment**: a line starting with `#` or `!`, discarded up to the newline
//! - **TokenName**: accumulating the key
//! - **TokenSeparation**: skipping whitespace, `:` and `=` between key and value
//! - **TokenValue**: accumulating the value
//!
//! Two transitions are transparent: the symbol that moves `Initial` to
//! `TokenName`, or `TokenSeparation` to `TokenValue`, is scanned again by the
//! new state without reading another byte.
//!
//! ## Escapes
//!
//! While scanning, `\r`, `\n`, `\u` and `\\` are kept as two-byte tokens; any
//! other escaped byte is stored as itself. A backslash before a newline inside a
//! value continues the value on the next line, leading blanks stripped. The
//! kept tokens are resolved when the entry is registered, after each byte has
//! been read as the ISO-8859-1 character of the same value.
//!
//! ## Usage
//!
//! ```rust
//! use serde_properties::{decode_into, SliceSource};
//!
//! let mut entries = Vec::new();
//! decode_into(
//!     SliceSource::new(b"# comment\nname = Michael\nhomepage http://example.org\n"),
//!     &mut |key: String, value: String| entries.push((key, value)),
//! )
//! .unwrap();
//!
//! assert_eq!(entries[0], ("name".to_string(), "Michael".to_string()));
//! assert_eq!(entries[1].1, "http://example.org");
//! ```

use crate::{ByteSource, Error, Result};

const BACKSLASH: u8 = b'\\';

/// Receives every entry the decoder registers, in document order.
pub trait EntrySink {
    fn register(&mut self, key: String, value: String);
}

impl<F: FnMut(String, String)> EntrySink for F {
    fn register(&mut self, key: String, value: String) {
        self(key, value)
    }
}

/// Scanner states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Initial,
    Comment,
    TokenName,
    TokenSeparation,
    TokenValue,
}

/// One input symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Symbol {
    Byte(u8),
    End,
}

/// Where the scanner goes after a symbol has been fully handled.
enum Flow {
    Continue(State),
    Finished,
}

/// Result of dispatching a symbol to a state.
enum Transition {
    Settled(Flow),
    /// Scan the same symbol again in the named state.
    Reenter(Reentry),
}

/// The only two states a symbol can be handed over to.
enum Reentry {
    TokenName,
    TokenValue,
}

/// Raw bytes of the entry under construction.
#[derive(Debug, Default)]
struct Pending {
    key: Vec<u8>,
    value: Vec<u8>,
    /// Line the key started on.
    line: usize,
}

impl Pending {
    fn clear(&mut self) {
        self.key.clear();
        self.value.clear();
    }
}

/// The `.properties` decoder.
///
/// Created via [`Decoder::new`] and consumed by [`Decoder::decode_into`], so the
/// pending buffers never outlive one decode.
pub struct Decoder<S> {
    source: S,
    pending: Pending,
    line: usize,
}

impl<S: ByteSource> Decoder<S> {
    pub fn new(source: S) -> Self {
        Decoder {
            source,
            pending: Pending::default(),
            line: 1,
        }
    }

    /// Runs the scanner to the end of the input, registering every entry with `sink`.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedUnicodeEscape`] for a `\u` escape without four hex
    ///   digits. Entries registered before it stay registered.
    /// - Any error of the byte source, unchanged.
    pub fn decode_into(mut self, sink: &mut impl EntrySink) -> Result<()> {
        let mut state = State::Initial;

        loop {
            let symbol = self.read_symbol()?;
            log::trace!("line {}: {:?} <- {:?}", self.line, state, symbol);

            let flow = match self.dispatch(state, symbol, sink)? {
                Transition::Settled(flow) => flow,
                Transition::Reenter(Reentry::TokenName) => {
                    log::trace!("line {}: reentering TokenName", self.line);
                    self.scan_name(symbol, sink)?
                }
                Transition::Reenter(Reentry::TokenValue) => {
                    log::trace!("line {}: reentering TokenValue", self.line);
                    self.scan_value(symbol, sink)?
                }
            };

            match flow {
                Flow::Continue(next) => state = next,
                Flow::Finished => return Ok(()),
            }
        }
    }

    fn read_symbol(&mut self) -> Result<Symbol> {
        match self.source.next_byte()? {
            Some(byte) => {
                if byte == b'\n' {
                    self.line += 1;
                }
                Ok(Symbol::Byte(byte))
            }
            None => Ok(Symbol::End),
        }
    }

    fn dispatch(
        &mut self,
        state: State,
        symbol: Symbol,
        sink: &mut impl EntrySink,
    ) -> Result<Transition> {
        Ok(match state {
            State::Initial => self.scan_initial(symbol),
            State::Comment => Transition::Settled(scan_comment(symbol)),
            State::TokenName => Transition::Settled(self.scan_name(symbol, sink)?),
            State::TokenSeparation => scan_separation(symbol),
            State::TokenValue => Transition::Settled(self.scan_value(symbol, sink)?),
        })
    }

    fn scan_initial(&mut self, symbol: Symbol) -> Transition {
        match symbol {
            Symbol::Byte(byte) if is_blank(byte) || byte == b'\n' => {
                Transition::Settled(Flow::Continue(State::Initial))
            }
            Symbol::Byte(b'#' | b'!') => Transition::Settled(Flow::Continue(State::Comment)),
            Symbol::End => Transition::Settled(Flow::Finished),
            Symbol::Byte(_) => {
                self.pending.line = self.line;
                Transition::Reenter(Reentry::TokenName)
            }
        }
    }

    fn scan_name(&mut self, symbol: Symbol, sink: &mut impl EntrySink) -> Result<Flow> {
        match symbol {
            Symbol::Byte(BACKSLASH) => match self.read_symbol()? {
                Symbol::Byte(escaped) => {
                    push_escaped(&mut self.pending.key, escaped);
                    Ok(Flow::Continue(State::TokenName))
                }
                Symbol::End => self.register(sink, Flow::Finished),
            },
            Symbol::Byte(byte) if is_separator(byte) => {
                Ok(Flow::Continue(State::TokenSeparation))
            }
            Symbol::Byte(b'\n') => self.register(sink, Flow::Continue(State::Initial)),
            // A key cut off by end of input gets an empty value, the same as a
            // key ended by a newline.
            Symbol::End => self.register(sink, Flow::Finished),
            Symbol::Byte(byte) => {
                self.pending.key.push(byte);
                Ok(Flow::Continue(State::TokenName))
            }
        }
    }

    fn scan_value(&mut self, symbol: Symbol, sink: &mut impl EntrySink) -> Result<Flow> {
        match symbol {
            Symbol::Byte(BACKSLASH) => match self.read_symbol()? {
                // Continuation: blanks and separators opening the next line are skipped.
                Symbol::Byte(b'\n') => Ok(Flow::Continue(State::TokenSeparation)),
                Symbol::Byte(escaped) => {
                    push_escaped(&mut self.pending.value, escaped);
                    Ok(Flow::Continue(State::TokenValue))
                }
                Symbol::End => self.register(sink, Flow::Finished),
            },
            Symbol::Byte(b'\n') => self.register(sink, Flow::Continue(State::Initial)),
            Symbol::End => self.register(sink, Flow::Finished),
            Symbol::Byte(byte) => {
                self.pending.value.push(byte);
                Ok(Flow::Continue(State::TokenValue))
            }
        }
    }

    /// Decodes the pending entry, hands it to `sink` and clears the buffers.
    fn register(&mut self, sink: &mut impl EntrySink, then: Flow) -> Result<Flow> {
        let line = self.pending.line;
        let key = unescape(&self.pending.key, line);
        let value = unescape(&self.pending.value, line);
        self.pending.clear();

        let (key, value) = (key?, value?);
        log::debug!("line {}: {:?} = {:?}", line, key, value);
        sink.register(key, value);
        Ok(then)
    }
}

/// Decodes everything `source` yields into `sink`.
///
/// Shorthand for `Decoder::new(source).decode_into(sink)`.
///
/// # Errors
///
/// See [`Decoder::decode_into`].
pub fn decode_into<S: ByteSource>(source: S, sink: &mut impl EntrySink) -> Result<()> {
    Decoder::new(source).decode_into(sink)
}

fn scan_comment(symbol: Symbol) -> Flow {
    match symbol {
        Symbol::Byte(b'\n') => Flow::Continue(State::Initial),
        Symbol::End => Flow::Finished,
        Symbol::Byte(_) => Flow::Continue(State::Comment),
    }
}

fn scan_separation(symbol: Symbol) -> Transition {
    match symbol {
        Symbol::Byte(byte) if is_separator(byte) => {
            Transition::Settled(Flow::Continue(State::TokenSeparation))
        }
        _ => Transition::Reenter(Reentry::TokenValue),
    }
}

#[inline]
fn is_blank(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r')
}

#[inline]
fn is_separator(byte: u8) -> bool {
    is_blank(byte) || byte == b':' || byte == b'='
}

/// Stores an escaped byte: the four deferred escapes keep their backslash.
fn push_escaped(buf: &mut Vec<u8>, escaped: u8) {
    match escaped {
        b'r' | b'n' | b'u' | BACKSLASH => buf.extend_from_slice(&[BACKSLASH, escaped]),
        other => buf.push(other),
    }
}

/// Resolves the deferred escapes of a raw key or value.
///
/// Bytes map 1:1 onto code points `U+0000..=U+00FF`. A high surrogate escape
/// must be directly followed by a low surrogate escape.
fn unescape(raw: &[u8], line: usize) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some((&byte, tail)) = rest.split_first() {
        rest = tail;
        if byte != BACKSLASH {
            out.push(char::from(byte));
            continue;
        }

        match rest.split_first() {
            Some((&b'r', tail)) => {
                out.push('\r');
                rest = tail;
            }
            Some((&b'n', tail)) => {
                out.push('\n');
                rest = tail;
            }
            Some((&BACKSLASH, tail)) => {
                out.push('\\');
                rest = tail;
            }
            Some((&b'u', tail)) => {
                let start = raw.len() - rest.len() - 1;
                let malformed = || {
                    let end = raw.len().min(start + 12);
                    let escape: String = raw[start..end].iter().map(|&b| char::from(b)).collect();
                    Error::malformed_unicode_escape(line, &escape)
                };

                let (unit, tail) = hex_unit(tail).ok_or_else(malformed)?;
                rest = tail;

                let code_point = if (0xD800..0xDC00).contains(&unit) {
                    let (low, tail) = match rest {
                        [BACKSLASH, b'u', tail @ ..] => hex_unit(tail),
                        _ => None,
                    }
                    .filter(|(low, _)| (0xDC00..0xE000).contains(low))
                    .ok_or_else(malformed)?;
                    rest = tail;
                    0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00)
                } else {
                    unit
                };

                out.push(char::from_u32(code_point).ok_or_else(malformed)?);
            }
            // Scanning never leaves a bare backslash behind; keep it literal if one shows up.
            _ => out.push('\\'),
        }
    }

    Ok(out)
}

/// Parses exactly four hex digits from the front of `bytes`.
fn hex_unit(bytes: &[u8]) -> Option<(u32, &[u8])> {
    if bytes.len() < 4 {
        return None;
    }

    let (digits, rest) = bytes.split_at(4);
    let mut unit = 0;
    for &digit in digits {
        unit = (unit << 4) | char::from(digit).to_digit(16)?;
    }
    Some((unit, rest))
}
