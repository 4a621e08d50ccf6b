use pretty_assertions::assert_eq;

use super::*;
use crate::tests::parse_source;

// === TokenSet ===

#[test]
fn test_token_set_empty() {
    let set = TokenSet::new();
    assert!(set.is_empty());
    assert_eq!(set.count(), 0);
    assert!(!set.contains(TokenKind::Eof));
}

#[test]
fn test_token_set_single() {
    let set = TokenSet::single(TokenKind::Comma);
    assert_eq!(set.count(), 1);
    assert!(set.contains(TokenKind::Comma));
    assert!(!set.contains(TokenKind::Semicolon));
}

#[test]
fn test_token_set_spans_both_words() {
    let set = TokenSet::new()
        .with(TokenKind::Eof)
        .with(TokenKind::Integer)
        .with(TokenKind::UStarStar)
        .with(TokenKind::DataBegin);
    assert_eq!(set.count(), 4);
    for kind in [TokenKind::Eof, TokenKind::Integer, TokenKind::UStarStar, TokenKind::DataBegin] {
        assert!(set.contains(kind), "{kind:?}");
    }
    assert!(!set.contains(TokenKind::WordsSep));
}

#[test]
fn test_token_set_union_and_intersection() {
    let a = TokenSet::new().with(TokenKind::Comma).with(TokenKind::Newline);
    let b = TokenSet::new().with(TokenKind::Newline).with(TokenKind::UStar);
    assert_eq!(a.union(b).count(), 3);
    assert_eq!(a.intersection(b), TokenSet::single(TokenKind::Newline));
}

// === Predefined sets ===

#[test]
fn statement_end_holds_separators() {
    assert!(STATEMENT_END.contains(TokenKind::Newline));
    assert!(STATEMENT_END.contains(TokenKind::Semicolon));
    assert!(STATEMENT_END.contains(TokenKind::Eof));
    assert!(!STATEMENT_END.contains(TokenKind::IgnoredNewline));
}

#[test]
fn binary_operators_do_not_start_arguments() {
    for kind in [TokenKind::Minus, TokenKind::Star, TokenKind::Ampersand, TokenKind::Equal, TokenKind::Dot] {
        assert!(!ARGUMENT_START.contains(kind), "{kind:?}");
    }
    for kind in [TokenKind::UMinusNum, TokenKind::UStar, TokenKind::UAmpersand, TokenKind::Identifier] {
        assert!(ARGUMENT_START.contains(kind), "{kind:?}");
    }
}

#[test]
fn closers_never_start_expressions() {
    assert!(EXPRESSION_START.intersection(BODY_CLOSERS).is_empty());
    assert!(EXPRESSION_START.intersection(STATEMENT_END).is_empty());
}

// === Skipping ===

#[test]
fn unexpected_closers_are_skipped_once() {
    let result = parse_source("1\n)\n2");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].id, garnet_diagnostic::DiagnosticId::UnexpectedTokenIgnore);
    assert_eq!(crate::tests::statements(&result).len(), 2);
}
