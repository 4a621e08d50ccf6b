use pretty_assertions::assert_eq;

use super::*;
use garnet_parse::{lex, Options};

fn encode(source: &str) -> Vec<u8> {
    serialize_tokens(&lex(source.as_bytes(), &Options::default()))
}

#[test]
fn token_stream_round_trips() {
    let source = "x = 1 # note\nputs \"a#{x}b\"\n__END__\nrest";
    let lexed = lex(source.as_bytes(), &Options::default());
    let decoded = deserialize_tokens(source.as_bytes(), &serialize_tokens(&lexed)).unwrap();
    assert_eq!(decoded, lexed);
}

#[test]
fn text_is_sliced_from_the_source() {
    let source = "foo.bar";
    let decoded = deserialize_tokens(source.as_bytes(), &encode(source)).unwrap();
    let raws: Vec<&[u8]> = decoded.tokens.iter().map(|token| token.raw).collect();
    assert_eq!(&raws[..3], &[&b"foo"[..], b".", b"bar"]);
    assert_eq!(decoded.tokens.last().map(|token| token.kind), Some(TokenKind::Eof));
}

#[test]
fn token_magic() {
    let bytes = encode("1");
    assert_eq!(&bytes[..4], b"GRTK");
    assert!(matches!(
        crate::deserialize_tree(b"1", &bytes),
        Err(DecodeError::BadMagic { .. })
    ));
}

#[test]
fn unknown_token_tag() {
    let mut bytes = encode("");
    // The final `Eof` token is the last record.
    let at = bytes.len() - TOKEN_LEN;
    bytes[at] = TokenKind::MAX_TAG + 1;
    assert_eq!(
        deserialize_tokens(b"", &bytes),
        Err(DecodeError::UnknownTokenKind {
            tag: TokenKind::MAX_TAG + 1,
            offset: at,
        })
    );
}

#[test]
fn truncated_stream() {
    let bytes = encode("a b c");
    assert!(matches!(
        deserialize_tokens(b"a b c", &bytes[..bytes.len() - 1]),
        Err(DecodeError::Truncated { needed: 1, .. })
    ));
}
