//! `.properties` Format Reference
//!
//! This module documents the dialect of the Java `.properties` format read and
//! written by this library. It contains no code.
//!
//! # Encoding
//!
//! Input is a stream of bytes, each read as the ISO-8859-1 character of the
//! same value (`0xE9` is `é`). Characters beyond `U+00FF` can only be written as
//! `\uXXXX` escapes. UTF-8 input is therefore decoded byte by byte: a UTF-8
//! encoded `é` comes back as the two characters `Ã©`.
//!
//! # Lines
//!
//! Only `\n` ends a line. A `\r` before it is treated as a blank between a key
//! and its value, but stays part of a value it follows.
//!
//! ## Blank lines and comments
//!
//! Leading spaces, tabs and `\r` are skipped. A line whose first other
//! character is `#` or `!` is a comment and runs to the end of the line:
//!
//! ```text
//! # a comment
//!    ! also a comment
//! key = value # not a comment
//! ```
//!
//! A backslash at the end of a comment does not continue it.
//!
//! ## Entries
//!
//! A key runs up to the first unescaped space, tab, `\r`, `:` or `=`. Any run
//! of those characters separates the key from the value, so all of these are
//! the same entry:
//!
//! ```text
//! key=value
//! key: value
//! key value
//! key =: value
//! ```
//!
//! A key ended by a newline or end of input has an empty value. Trailing
//! spaces of a value are kept.
//!
//! # Escapes
//!
//! | Escape | Result |
//! |--------|--------|
//! | `\n`, `\r` | newline, carriage return |
//! | `\\` | a backslash |
//! | `\uXXXX` | the UTF-16 unit `XXXX`; surrogates must come in pairs |
//! | `\` + newline in a value | line continuation |
//! | `\` + anything else | that character, e.g. `\:`, `\=`, `\ `, `\#` |
//!
//! Note that `\t` is plain `t` and that `\\u0041` is the six characters
//! `\u0041`, not `A`. A `\u` escape without four hex digits aborts the decode
//! with [`Error::MalformedUnicodeEscape`](crate::Error::MalformedUnicodeEscape).
//!
//! ## Line continuation
//!
//! A value ending in an unescaped backslash continues on the next line, whose
//! leading blanks, `:` and `=` are dropped:
//!
//! ```text
//! targets = alpha, \
//!           beta
//! ```
//!
//! decodes to `alpha, beta`. Inside a key the same backslash yields a literal
//! newline. A backslash at end of input is ignored.
//!
//! ## Duplicates
//!
//! Later entries overwrite earlier ones with the same key.
//!
//! # Output
//!
//! Rendering sorts entries by key and writes `key = value` lines joined with
//! `\n`. In keys, `:`, `=`, spaces and a leading `#` or `!` are escaped with a
//! backslash.
//!
//! The **canonical** form additionally doubles backslashes, writes newlines
//! and carriage returns as `\n` and `\r`, everything outside printable ASCII as
//! lowercase `\uxxxx`, and escapes a leading space, `:` or `=` of a value. It
//! decodes back to an equal table:
//!
//! ```text
//! greeting = \u0e4f hello
//! path = C:\\temp
//! weird\:key = \ leading space
//! ```
//!
//! The **display** form writes values as they are and is meant for people:
//!
//! ```text
//! greeting = ๏ hello
//! path = C:\temp
//! weird\:key =  leading space
//! ```
