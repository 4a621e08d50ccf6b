use super::*;
use pretty_assertions::assert_eq;

#[test]
fn tags_round_trip_through_from_tag() {
    for &kind in TokenKind::ALL {
        assert_eq!(TokenKind::from_tag(kind.tag()), Some(kind));
    }
    assert_eq!(TokenKind::from_tag(0), None);
    assert_eq!(TokenKind::from_tag(TokenKind::MAX_TAG + 1), None);
}

#[test]
fn tags_are_dense() {
    for (i, &kind) in TokenKind::ALL.iter().enumerate() {
        assert_eq!(usize::from(kind.tag()), i + 1, "{kind:?}");
    }
    assert_eq!(
        TokenKind::ALL.last().map(|k| k.tag()),
        Some(TokenKind::MAX_TAG)
    );
}

#[test]
fn keyword_range() {
    assert!(TokenKind::KeywordAlias.is_keyword());
    assert!(TokenKind::KeywordLine.is_keyword());
    assert!(TokenKind::KeywordDoLoop.is_keyword());
    assert!(!TokenKind::Label.is_keyword());
    assert!(!TokenKind::IntegerRationalImaginary.is_keyword());
}

#[test]
fn debug_and_display() {
    assert_eq!(format!("{:?}", TokenKind::KeywordDef), "KEYWORD_DEF");
    assert_eq!(TokenKind::KeywordDef.to_string(), "'def'");
    assert_eq!(TokenKind::DataBegin.name(), "__END__");
}

#[test]
fn rebind_slices_new_buffer() {
    let src = b"foo bar";
    let tok = Token::new(TokenKind::Identifier, Location::new(4, 7), &src[4..7]);
    let copy = src.to_vec();
    let rebound = tok.rebind(&copy);
    assert_eq!(rebound.map(|t| t.raw), Some(&b"bar"[..]));
    assert!(tok.rebind(b"foo").is_none());
}

#[test]
fn operator_classes() {
    assert!(TokenKind::PlusEqual.is_operator_write());
    assert!(!TokenKind::Plus.is_operator_write());
    assert!(TokenKind::LessEqualGreater.is_operator_method_name());
    assert!(TokenKind::Comment.is_trivia());
    assert!(!TokenKind::Newline.is_trivia());
}
