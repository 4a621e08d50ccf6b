use super::*;
use pretty_assertions::assert_eq;

#[test]
fn sentinel_and_padding() {
    let buffer = SourceBuffer::new(b"abc");
    assert_eq!(buffer.as_bytes(), b"abc");
    assert_eq!(buffer.len(), 3);
    let cursor = buffer.cursor();
    assert_eq!(cursor.peek_at(3), 0);
    assert_eq!(cursor.peek_at(63), 0);
}

#[test]
fn exact_cache_line_still_has_sentinel() {
    let src = vec![b'x'; 64];
    let buffer = SourceBuffer::new(&src);
    let mut cursor = buffer.cursor();
    cursor.advance_n(64);
    assert!(cursor.is_eof());
    assert_eq!(cursor.current(), 0);
}

#[test]
fn bom_is_skipped() {
    let buffer = SourceBuffer::new(b"\xEF\xBB\xBFx");
    assert_eq!(buffer.bom_len(), 3);
    assert_eq!(buffer.cursor().pos(), 3);
    assert_eq!(buffer.cursor().current(), b'x');
}

#[test]
fn empty_source() {
    let buffer = SourceBuffer::new(b"");
    assert!(buffer.is_empty());
    assert!(buffer.cursor().is_eof());
}
