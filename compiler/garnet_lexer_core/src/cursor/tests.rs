use crate::SourceBuffer;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn peeks_and_advances() {
    let buffer = SourceBuffer::new(b"abc");
    let mut cursor = buffer.cursor();
    assert_eq!(cursor.current(), b'a');
    assert_eq!(cursor.peek(), b'b');
    assert_eq!(cursor.peek2(), b'c');
    cursor.advance();
    assert_eq!(cursor.pos(), 1);
    assert_eq!(cursor.slice_from(0), b"a");
}

#[test]
fn advance_clamps_to_source_len() {
    let buffer = SourceBuffer::new(b"ab");
    let mut cursor = buffer.cursor();
    cursor.advance_n(10);
    assert_eq!(cursor.pos(), 2);
    assert!(cursor.is_eof());
    assert_eq!(cursor.current(), 0);
    cursor.set_pos(100);
    assert_eq!(cursor.pos(), 2);
}

#[test]
fn eat_helpers() {
    let buffer = SourceBuffer::new(b" \t\x0cfoo # c\nbar");
    let mut cursor = buffer.cursor();
    cursor.eat_whitespace();
    assert_eq!(cursor.pos(), 3);
    cursor.eat_while(|b| b.is_ascii_alphabetic());
    assert_eq!(cursor.slice_from(3), b"foo");
    cursor.eat_until_newline_or_eof();
    assert_eq!(cursor.current(), b'\n');
    assert_eq!(cursor.next_line_start(0), 11);
    assert!(cursor.is_line_start(11));
    assert!(!cursor.is_line_start(12));
    assert_eq!(cursor.find_from(0, b'#'), Some(7));
    assert_eq!(cursor.find_from(8, b'#'), None);
}

#[test]
fn slice_is_clamped() {
    let buffer = SourceBuffer::new(b"abc");
    let cursor = buffer.cursor();
    assert_eq!(cursor.slice(1, 99), b"bc");
    assert_eq!(cursor.slice(5, 2), b"");
    assert!(cursor.starts_with(b"ab"));
}

proptest! {
    #[test]
    fn never_reads_out_of_bounds(src in proptest::collection::vec(any::<u8>(), 0..200), steps in 0u32..300) {
        let buffer = SourceBuffer::new(&src);
        let mut cursor = buffer.cursor();
        for _ in 0..steps {
            let _ = cursor.peek2();
            cursor.advance();
        }
        prop_assert!(cursor.pos() <= buffer.len());
        prop_assert_eq!(cursor.rest().len() as u32, buffer.len() - cursor.pos());
    }
}
