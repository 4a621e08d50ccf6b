use super::*;
use pretty_assertions::assert_eq;

#[test]
fn find_aliases() {
    assert_eq!(Encoding::find(b"ascii"), Some(Encoding::UsAscii));
    assert_eq!(Encoding::find(b"US-ASCII"), Some(Encoding::UsAscii));
    assert_eq!(Encoding::find(b"utf-8"), Some(Encoding::Utf8));
    assert_eq!(Encoding::find(b"UTF8"), Some(Encoding::Utf8));
    assert_eq!(Encoding::find(b"binary"), Some(Encoding::Ascii8Bit));
    assert_eq!(Encoding::find(b"utf-8-unix"), Some(Encoding::Utf8));
    assert_eq!(Encoding::find(b"iso-8859-15"), Some(Encoding::Iso8859(15)));
    assert_eq!(Encoding::find(b"cp1252"), Some(Encoding::Windows1252));
    assert_eq!(Encoding::find(b"iso-8859-12"), None);
    assert_eq!(Encoding::find(b"klingon"), None);
}

#[test]
fn names_find_themselves() {
    let all = [
        Encoding::Utf8,
        Encoding::UsAscii,
        Encoding::Ascii8Bit,
        Encoding::Iso8859(1),
        Encoding::Iso8859(16),
        Encoding::Windows1250,
        Encoding::Windows1251,
        Encoding::Windows1252,
    ];
    for encoding in all {
        assert_eq!(Encoding::find(encoding.name().as_bytes()), Some(encoding));
    }
}

#[test]
fn char_width_utf8() {
    assert_eq!(Encoding::Utf8.char_width(b"a"), Some(1));
    assert_eq!(Encoding::Utf8.char_width("é".as_bytes()), Some(2));
    assert_eq!(Encoding::Utf8.char_width("日本".as_bytes()), Some(3));
    assert_eq!(Encoding::Utf8.char_width(b"\xFF"), None);
    assert_eq!(Encoding::Utf8.char_width(b"\xE6\x97"), None);
    assert_eq!(Encoding::UsAscii.char_width(b"\xFF"), None);
    assert_eq!(Encoding::Ascii8Bit.char_width(b"\xFF"), Some(1));
}

#[test]
fn validity() {
    assert!(Encoding::Utf8.is_valid("héllo".as_bytes()));
    assert!(!Encoding::Utf8.is_valid(b"\xFF"));
    assert!(!Encoding::UsAscii.is_valid(b"\xFF"));
    assert!(Encoding::Iso8859(1).is_valid(b"\xFF"));
}
