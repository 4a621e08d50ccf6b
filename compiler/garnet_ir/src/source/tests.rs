use super::*;
use pretty_assertions::assert_eq;

#[test]
fn line_column_from_start_line() {
    let source = Source::new(b"a\nbc\n\nd", 1);
    assert_eq!(source.line_offsets(), &[0, 2, 5, 6]);
    assert_eq!(source.line_column(0), (1, 0));
    assert_eq!(source.line_column(3), (2, 1));
    assert_eq!(source.line_column(5), (3, 0));
    assert_eq!(source.line_column(6), (4, 0));
}

#[test]
fn honours_configured_start_line() {
    let source = Source::new(b"x\ny", 10);
    assert_eq!(source.line_column(2), (11, 0));
    let negative = Source::new(b"x", -3);
    assert_eq!(negative.line_column(0), (-3, 0));
}

#[test]
fn line_text_strips_newline() {
    let source = Source::new(b"first\nsecond\nthird", 1);
    assert_eq!(source.line_text(8), b"second");
    assert_eq!(source.line_text(14), b"third");
    assert_eq!(source.line_text(0), b"first");
}
