//! Conformance tests for the `.properties` dialect.
//!
//! Each test feeds a small document through the decoder and checks the
//! resulting table, covering comments, separators, escapes, continuations and
//! unicode handling.

use serde_properties::{parse_slice, parse_str, Error, PropertyTable};

fn parse(input: &str) -> PropertyTable {
    parse_str(input).unwrap()
}

#[test]
fn test_hash_comments() {
    let table = parse(
        "
# This is a comment
token.a = 1
# This is a comment
token.b = 2
# This is a comment
",
    );
    assert_eq!(table.len(), 2);
}

#[test]
fn test_bang_comments() {
    let table = parse(
        "
! This is a comment
token.a = 1
! This is a comment
token.b = 2
! This is a comment
",
    );
    assert_eq!(table.len(), 2);
}

#[test]
fn test_equal_assignment() {
    let table = parse("token.a=1\ntoken.b = 2\n");
    assert_eq!(table.get("token.a").unwrap(), "1");
    assert_eq!(table.get("token.b").unwrap(), "2");
}

#[test]
fn test_colon_assignment() {
    let table = parse("token.a:1\ntoken.b : 2\n");
    assert_eq!(table.get("token.a").unwrap(), "1");
    assert_eq!(table.get("token.b").unwrap(), "2");
}

#[test]
fn test_space_assignment() {
    let table = parse("token.a 1\ntoken.b    2\ntoken.c\n");
    assert_eq!(table.get("token.a").unwrap(), "1");
    assert_eq!(table.get("token.b").unwrap(), "2");
    assert_eq!(table.get("token.c").unwrap(), "");
}

#[test]
fn test_line_continuation() {
    let table = parse(
        r"
# Line continuation disregards leading whitespace on continuation lines,
# but not the whitespace before the continuation.
token.a = This is a long \
        token value  \\\
 over 3 lines
token.b 2
",
    );
    assert_eq!(
        table.get("token.a").unwrap(),
        r"This is a long token value  \over 3 lines"
    );
    assert_eq!(table.get("token.b").unwrap(), "2");
}

#[test]
fn test_comment_does_not_continue() {
    let table = parse(
        r"
# This is a very long comment that should not \
continue on this line
",
    );
    assert!(table.contains("continue"));
    assert_eq!(table.get("continue").unwrap(), "on this line");
}

#[test]
fn test_escaping() {
    let table = parse(
        r"
# The next line is not a continuation
token.a = my value \\
# The colon on the next line does not end the token name
token\:a = token:a
# Leading whitespace of the value is ignored, unknown escapes drop the backslash
token.b =      \a\b\c\d\e
token\\c = val
token\ d allowed
token\rd allowe\rd
token\nd allowe\nd
\:\= valid too
",
    );
    assert_eq!(table.get("token.a").unwrap(), "my value \\");
    assert_eq!(table.get("token:a").unwrap(), "token:a");
    assert_eq!(table.get("token.b").unwrap(), "abcde");
    assert_eq!(table.get("token\\c").unwrap(), "val");
    assert_eq!(table.get("token d").unwrap(), "allowed");
    assert_eq!(table.get("token\rd").unwrap(), "allowe\rd");
    assert_eq!(table.get("token\nd").unwrap(), "allowe\nd");
    assert_eq!(table.get(":=").unwrap(), "valid too");
    assert_eq!(table.len(), 8);
}

#[test]
fn test_unicode_escapes() {
    let table = parse(
        r"
# Not a unicode escape (double backslash)
token.a = \\u0e4f\\u032f\\u0361\\u0e4f
# A valid unicode escape
token.b = \u0e4f\u032f\u0361\u0e4f
token.c = \u0e4f
",
    );
    assert_eq!(table.get("token.a").unwrap(), r"\u0e4f\u032f\u0361\u0e4f");
    assert_eq!(table.get("token.b").unwrap(), "\u{0e4f}\u{032f}\u{0361}\u{0e4f}");
    assert_eq!(table.get("token.c").unwrap(), "๏");
}

#[test]
fn test_unicode_escape_too_short() {
    let result = parse_str(
        r"
# Not a valid unicode escape, too short
token.a = \u0e
",
    );
    match result {
        Err(Error::MalformedUnicodeEscape { line, escape }) => {
            assert_eq!(line, 3);
            assert_eq!(escape, r"\u0e");
        }
        other => panic!("Expected MalformedUnicodeEscape, got {other:?}"),
    }
}

#[test]
fn test_supplementary_characters_via_surrogates() {
    let table = parse(r"math = \uD835\uDD4A");
    assert_eq!(table.get("math").unwrap(), "\u{1D54A}");

    assert!(matches!(
        parse_str(r"math = \uD835 alone"),
        Err(Error::MalformedUnicodeEscape { .. })
    ));
}

#[test]
fn test_escapes_in_keys_are_unicode_aware() {
    let table = parse(r"caf\u00e9 = open");
    assert_eq!(table.get("café").unwrap(), "open");
}

#[test]
fn test_bytes_are_latin1() {
    let table = parse_slice(b"name = Jos\xe9\n").unwrap();
    assert_eq!(table.get("name").unwrap(), "José");

    // UTF-8 input is read byte by byte.
    let table = parse_slice("name = José\n".as_bytes()).unwrap();
    assert_eq!(table.get("name").unwrap(), "JosÃ©");
}

#[test]
fn test_crlf_line_endings() {
    let table = parse("a = 1\r\nb\r\n");
    assert_eq!(table.get("a").unwrap(), "1\r");
    assert_eq!(table.get("b").unwrap(), "");
}

#[test]
fn test_later_entries_win() {
    let table = parse("k = first\nk = second\n");
    assert_eq!(table.len(), 1);
    assert_eq!(table.get("k").unwrap(), "second");
}

#[test]
fn test_keys_without_values() {
    let table = parse("lonely\nalso lonely =\ntrailing");
    assert_eq!(table.get("lonely").unwrap(), "");
    assert_eq!(table.get("also").unwrap(), "lonely =");
    assert_eq!(table.get("trailing").unwrap(), "");
}

#[test]
fn test_value_keeps_trailing_whitespace_and_inner_separators() {
    let table = parse("url = http://host:8080/?a=b  \n");
    assert_eq!(table.get("url").unwrap(), "http://host:8080/?a=b  ");
}
