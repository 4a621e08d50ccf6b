use pretty_assertions::assert_eq;

use super::*;
use garnet_lexer::LexerOptions;
use garnet_lexer_core::SourceBuffer;

fn kinds(source: &str) -> Vec<TokenKind> {
    let buffer = SourceBuffer::new(source.as_bytes());
    let mut cursor = Cursor::new(Lexer::new(&buffer, &LexerOptions::default()));
    let mut kinds = Vec::new();
    while !cursor.is_at_end() {
        kinds.push(cursor.advance().kind);
    }
    kinds
}

#[test]
fn test_cursor_walks_significant_tokens() {
    assert_eq!(
        kinds("a # note\n+ 1"),
        vec![TokenKind::Identifier, TokenKind::Newline, TokenKind::UPlus, TokenKind::Integer]
    );
}

#[test]
fn test_cursor_skips_invalid_tokens() {
    assert_eq!(kinds("1 \u{1} 2"), vec![TokenKind::Integer, TokenKind::Integer]);
}

#[test]
fn test_advance_at_end_is_idempotent() {
    let buffer = SourceBuffer::new(b"x");
    let mut cursor = Cursor::new(Lexer::new(&buffer, &LexerOptions::default()));
    cursor.advance();
    assert!(cursor.is_at_end());
    let end = cursor.current_location();
    cursor.advance();
    cursor.advance();
    assert_eq!(cursor.current_location(), end);
    assert_eq!(cursor.previous_kind(), TokenKind::Identifier);
}

#[test]
fn test_state_override_applies_to_the_next_token() {
    let buffer = SourceBuffer::new(b"x -1");
    let mut cursor = Cursor::new(Lexer::new(&buffer, &LexerOptions::default()));
    assert_eq!(cursor.current_kind(), TokenKind::Identifier);
    cursor.set_lex_state(LexState::END | LexState::LABEL);
    assert_eq!(cursor.lex_state(), LexState::END | LexState::LABEL);
    cursor.advance();
    assert_eq!(cursor.current_kind(), TokenKind::Minus);
}
