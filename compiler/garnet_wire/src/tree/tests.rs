use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use garnet_parse::{parse, Options};

fn round_trip(source: &str) {
    round_trip_with(source, &Options::default());
}

fn round_trip_with(source: &str, options: &Options) {
    let parsed = parse(source.as_bytes(), options);
    let bytes = serialize_tree(&parsed);
    assert_eq!(deserialize_tree(source.as_bytes(), &bytes), Ok(parsed), "{source:?}");
}

fn encode(source: &str) -> Vec<u8> {
    serialize_tree(&parse(source.as_bytes(), &Options::default()))
}

// === Round trips ===

#[test]
fn empty_program() {
    round_trip("");
}

#[test]
fn literals_and_calls() {
    round_trip("foo = 1\nfoo.bar(2, *baz, &blk)\n:sym\n1.5\n3r\n2i\n/ab/imx\n%w[a b]");
}

#[test]
fn strings_shared_and_owned() {
    round_trip("'plain'\n\"esc\\n\"\n\"a#{b}c\"\n<<~EOS\n  hi\n  there\nEOS\n");
}

#[test]
fn definitions_and_control_flow() {
    round_trip(
        "class A < B\n  def m(a, b = 1, *c, d:, **e, &f) = a\n  def self.k; end\nend\n\
         case x\nin [1, *rest] then rest\nin {a:} then a\nend\n\
         begin\n  y\nrescue E => e\n  retry\nensure\n  z\nend\n",
    );
}

#[test]
fn comments_magic_comments_and_data() {
    round_trip("# frozen_string_literal: true\n# hi\n=begin\ndoc\n=end\n'x'\n__END__\ndata\n");
}

#[test]
fn diagnostics_survive() {
    let source = "foo(*bar and baz)\ndef x\n";
    let parsed = parse(source.as_bytes(), &Options::default());
    assert!(!parsed.errors.is_empty());
    let decoded = deserialize_tree(source.as_bytes(), &serialize_tree(&parsed)).unwrap();
    assert_eq!(decoded.errors, parsed.errors);
}

#[test]
fn options_are_reflected() {
    let options = Options::new()
        .with_start_line(40)
        .with_frozen_string_literal(false)
        .with_encoding("binary")
        .unwrap();
    round_trip_with("'a'\n\"\\xff\"", &options);
}

#[test]
fn wide_integer_keeps_every_word() {
    let source = "4294967296";
    let decoded = deserialize_tree(source.as_bytes(), &encode(source)).unwrap();
    let NodeKind::Integer(integer) = &decoded.statements()[0].kind else {
        panic!("expected an integer");
    };
    assert_eq!(integer.value.to_words(), (false, vec![0, 1]));
    assert_eq!(integer.value.to_string(), "4294967296");
}

// === Framing ===

#[test]
fn header_starts_with_magic_and_version() {
    let bytes = encode("1");
    assert_eq!(&bytes[..4], b"GRNT");
    assert_eq!(&bytes[4..7], &[1, 0, 0]);
}

#[test]
fn root_record_spans_the_rest() {
    let bytes = encode("1\n2");
    let root = root_offset(&bytes).unwrap();
    let header = read_node_header(&bytes, root).unwrap();
    assert_eq!(header.node_type, NodeType::Program);
    assert_eq!(header.end(), bytes.len());
}

#[test]
fn siblings_can_be_skipped() {
    let bytes = encode("1\n2");
    let root = read_node_header(&bytes, root_offset(&bytes).unwrap()).unwrap();
    // No locals, then the statements record.
    let statements = read_node_header(&bytes, root.fields_offset() + 8).unwrap();
    assert_eq!(statements.node_type, NodeType::Statements);
    assert_eq!(statements.end(), root.end());

    let first = read_node_header(&bytes, statements.fields_offset() + 8).unwrap();
    let second = read_node_header(&bytes, first.end()).unwrap();
    assert_eq!(first.node_type, NodeType::Integer);
    assert_eq!(second.node_type, NodeType::Integer);
    assert_eq!(second.location, Location::new(2, 3));
    assert_eq!(second.end(), statements.end());
}

// === Rejections ===

#[test]
fn bad_magic() {
    let mut bytes = encode("1");
    bytes[0] = b'X';
    assert_eq!(
        deserialize_tree(b"1", &bytes),
        Err(DecodeError::BadMagic {
            expected: *b"GRNT",
            found: *b"XRNT",
        })
    );
}

#[test]
fn token_buffer_is_not_a_tree() {
    let mut bytes = encode("1");
    bytes[..4].copy_from_slice(b"GRTK");
    assert!(matches!(deserialize_tree(b"1", &bytes), Err(DecodeError::BadMagic { .. })));
}

#[test]
fn version_compatibility() {
    let mut bytes = encode("1");
    bytes[6] = 9;
    assert!(deserialize_tree(b"1", &bytes).is_ok());
    bytes[5] = 1;
    assert_eq!(
        deserialize_tree(b"1", &bytes),
        Err(DecodeError::UnsupportedVersion { found: [1, 1, 9] })
    );
}

#[test]
fn every_truncation_fails() {
    let source = "a = [1, 'b', :c]\na.map { |x| x }";
    let bytes = encode(source);
    for len in 0..bytes.len() {
        assert!(deserialize_tree(source.as_bytes(), &bytes[..len]).is_err(), "prefix {len}");
    }
}

#[test]
fn trailing_bytes() {
    let mut bytes = encode("1");
    bytes.push(0);
    assert_eq!(deserialize_tree(b"1", &bytes), Err(DecodeError::TrailingBytes { count: 1 }));
}

#[test]
fn declared_length_must_match() {
    let mut bytes = encode("1");
    let root = root_offset(&bytes).unwrap();
    let header = read_node_header(&bytes, root).unwrap();
    bytes[root + 1..root + 9].copy_from_slice(&(header.length + 1).to_le_bytes());
    assert!(matches!(
        deserialize_tree(b"1", &bytes),
        Err(DecodeError::LengthMismatch { node: "ProgramNode", .. })
    ));
}

#[test]
fn unknown_node_tag() {
    let mut bytes = encode("1");
    let root = root_offset(&bytes).unwrap();
    bytes[root] = u8::MAX;
    assert_eq!(
        deserialize_tree(b"1", &bytes),
        Err(DecodeError::UnknownNodeType {
            tag: u8::MAX,
            offset: root,
        })
    );
}

#[test]
fn locations_must_fit_the_source() {
    let bytes = encode("foo = 1");
    assert!(matches!(
        deserialize_tree(b"foo", &bytes),
        Err(DecodeError::OutOfBounds { len: 3, .. })
    ));
}

proptest! {
    #[test]
    fn parses_round_trip(source in "[a-z0-9 \n(){}\\[\\]|*&:=.,+\"'#$@-]{0,48}") {
        let parsed = parse(source.as_bytes(), &Options::default());
        let decoded = deserialize_tree(source.as_bytes(), &serialize_tree(&parsed));
        prop_assert_eq!(decoded, Ok(parsed));
    }
}
