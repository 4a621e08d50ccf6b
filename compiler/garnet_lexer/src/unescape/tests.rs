use super::{unescape, Delimiters, ForcedEncoding, Strictness};
use garnet_diagnostic::DiagnosticId;
use garnet_ir::Encoding;
use pretty_assertions::assert_eq;

fn all(input: &[u8]) -> Vec<u8> {
    unescape(input, Strictness::All, Delimiters::new(b'"', 0)).bytes
}

#[test]
fn no_backslash_is_copied() {
    let out = unescape(b"plain text", Strictness::All, Delimiters::NONE);
    assert_eq!(out.bytes, b"plain text");
    assert!(out.errors.is_empty());
}

#[test]
fn simple_escapes() {
    assert_eq!(all(br"a\nb\tc\sd"), b"a\nb\tc d");
    assert_eq!(all(br"\a\b\e\f\v\r"), b"\x07\x08\x1b\x0c\x0b\r");
    assert_eq!(all(br#"\"\\"#), b"\"\\");
}

#[test]
fn octal_and_hex() {
    assert_eq!(all(br"\0\101\1011"), b"\0AA1");
    assert_eq!(all(br"\x41\x4"), b"A\x04");
    assert_eq!(all(br"\xFFz"), b"\xFFz");
}

#[test]
fn hex_without_digits_is_an_error() {
    let out = unescape(br"a\xg", Strictness::All, Delimiters::NONE);
    assert_eq!(out.bytes, b"ag");
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors[0].id, DiagnosticId::EscapeInvalidHex);
    assert_eq!((out.errors[0].start, out.errors[0].end), (1, 3));
}

#[test]
fn unicode_escapes() {
    assert_eq!(all(br"\u00e9"), "é".as_bytes());
    assert_eq!(all(br"\u{41 1F600}"), "A😀".as_bytes());
    let out = unescape(br"\u{41}", Strictness::All, Delimiters::NONE);
    assert!(!out.unicode_escape, "ASCII result does not force UTF-8");
    let out = unescape(br"\u00e9", Strictness::All, Delimiters::NONE);
    assert!(out.unicode_escape);
}

#[test]
fn bad_unicode_escapes() {
    let out = unescape(br"\u12", Strictness::All, Delimiters::NONE);
    assert_eq!(out.errors[0].id, DiagnosticId::EscapeInvalidUnicode);
    let out = unescape(br"\u{D800}x", Strictness::All, Delimiters::NONE);
    assert_eq!(out.errors[0].id, DiagnosticId::EscapeInvalidUnicode);
    assert_eq!(out.bytes, b"x");
    let out = unescape(br"\u{zz}tail", Strictness::All, Delimiters::NONE);
    assert_eq!(out.bytes, b"tail");
}

#[test]
fn control_and_meta() {
    assert_eq!(all(br"\cA\C-a\c?"), b"\x01\x01\x7f");
    assert_eq!(all(br"\M-a"), b"\xe1");
    assert_eq!(all(br"\M-\C-a"), b"\x81");
    let out = unescape(br"\M-a", Strictness::All, Delimiters::NONE);
    assert!(out.byte_escape);
}

#[test]
fn line_continuation_is_removed() {
    assert_eq!(all(b"a\\\nb"), b"ab");
    assert_eq!(all(b"a\\\r\nb"), b"ab");
}

#[test]
fn unknown_escape_keeps_character() {
    assert_eq!(all(br"\q\#"), b"q#");
    assert_eq!(all("\\é".as_bytes()), "é".as_bytes());
}

#[test]
fn minimal_only_handles_backslash_and_delimiters() {
    let out = unescape(br"a\'b\\c\nd", Strictness::Minimal, Delimiters::new(b'\'', 0));
    assert_eq!(out.bytes, br"a'b\c\nd");
    let out = unescape(br"\(\)", Strictness::Minimal, Delimiters::new(b')', b'('));
    assert_eq!(out.bytes, b"()");
}

#[test]
fn minimal_words_unescape_whitespace() {
    let delimiters = Delimiters {
        words: true,
        ..Delimiters::new(b']', b'[')
    };
    let out = unescape(br"a\ b", Strictness::Minimal, delimiters);
    assert_eq!(out.bytes, b"a b");
}

#[test]
fn none_keeps_escapes_but_drops_slash_delimiter() {
    let out = unescape(br"a\/b\d", Strictness::None, Delimiters::new(b'/', 0));
    assert_eq!(out.bytes, br"a/b\d");
    let out = unescape(br"a\}b", Strictness::None, Delimiters::new(b'}', b'{'));
    assert_eq!(out.bytes, br"a\}b");
}

#[test]
fn none_still_notices_encoding_escapes() {
    let out = unescape(br"\u00e9", Strictness::None, Delimiters::new(b'/', 0));
    assert_eq!(out.bytes, br"\u00e9");
    assert!(out.unicode_escape);
    let out = unescape(br"\xff", Strictness::None, Delimiters::new(b'/', 0));
    assert!(out.byte_escape);
}

#[test]
fn trailing_backslash_survives() {
    assert_eq!(all(b"ab\\"), b"ab\\");
}

#[test]
fn classification() {
    let utf8 = unescape(br"\u00e9", Strictness::All, Delimiters::NONE);
    assert_eq!(utf8.classify(Encoding::UsAscii), (ForcedEncoding::Utf8, false));

    let binary = unescape(br"\xFF\xFF\xFF", Strictness::All, Delimiters::NONE);
    assert_eq!(binary.classify(Encoding::UsAscii), (ForcedEncoding::Binary, false));
    assert_eq!(binary.classify(Encoding::Utf8), (ForcedEncoding::Binary, false));
    assert_eq!(binary.classify(Encoding::Ascii8Bit), (ForcedEncoding::None, false));

    let raw = unescape(b"\xFF\xFF", Strictness::All, Delimiters::NONE);
    assert_eq!(raw.classify(Encoding::UsAscii), (ForcedEncoding::Binary, false));

    let plain = unescape(b"abc", Strictness::All, Delimiters::NONE);
    assert_eq!(plain.classify(Encoding::UsAscii), (ForcedEncoding::None, false));
}

#[test]
fn mixed_encoding_is_reported_outside_utf8() {
    let mixed = unescape(br"\u00e9\xFF", Strictness::All, Delimiters::NONE);
    assert_eq!(mixed.classify(Encoding::UsAscii), (ForcedEncoding::Utf8, true));
    assert_eq!(mixed.classify(Encoding::Utf8), (ForcedEncoding::Utf8, false));
}
