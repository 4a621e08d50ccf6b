//! A tree or token buffer decodes to exactly what was encoded.

use proptest::prelude::*;

use garnet::{deserialize_tokens, deserialize_tree, lex, parse, serialize_tokens, serialize_tree, Options};

/// Well-formed statements drawn from the common shapes of the grammar.
fn valid_fragment() -> BoxedStrategy<String> {
    prop_oneof![
        "v[a-z]{0,3} = [1-9][0-9]{0,11}",
        "v[a-z]{0,3}\\.m[a-z]{0,3}\\([0-9], :s[a-z]{0,2}\\)",
        Just("x = 18446744073709551616 * -3".to_string()),
        Just("'lit' + \"esc\\t#{1 + 2}\"".to_string()),
        Just("[1, 2.5, nil, true].each { |v| p v }".to_string()),
        Just("{ a: 1, \"b\" => 2 }".to_string()),
        Just("if a then b elsif c then d else e end".to_string()),
        Just("case v\nin [Integer => n, *] then n\nin { k: String } then 0\nend".to_string()),
        Just("def m(a, *r, k: 1, **o, &b) = a".to_string()),
        Just("class C < B; def self.m; yield; end; end".to_string()),
        Just("begin; f; rescue E => e; retry; ensure; g; end".to_string()),
        Just("<<~T\n  heredoc #{x}\n  body\nT".to_string()),
        Just("/re#{1}x/im =~ s".to_string()),
        Just("%i[a b] + %w[c d]".to_string()),
        Just("-> (x) { x ** 2 }.(3)".to_string()),
        Just("ma, *mb, mc = 1, 2, 3".to_string()),
        Just("*sa, sb = list".to_string()),
        Just("na, (nb, nc) = 1, [2, 3]".to_string()),
        Just("for fa, fb in pairs do fa end".to_string()),
        Just("/(?<=\\$)(?<amount>\\d+)/ =~ price; amount".to_string()),
        Just("# comment".to_string()),
    ]
    .boxed()
}

/// Any fragment, including ones that recover from syntax errors.
fn fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        8 => valid_fragment(),
        1 => Just("foo(*bar and baz)".to_string()),
        1 => Just("def broken(".to_string()),
    ]
}

fn program() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment(), 0..8).prop_map(|parts| parts.join("\n"))
}

proptest! {
    #[test]
    fn well_formed_programs_have_no_errors(parts in prop::collection::vec(valid_fragment(), 0..8)) {
        let source = parts.join("\n");
        let result = parse(source.as_bytes(), &Options::default());
        prop_assert!(result.errors.is_empty(), "{:?} in {:?}", result.errors, source);
    }

    #[test]
    fn tree_round_trip(source in program(), start_line in -5i32..100) {
        let options = Options::new().with_start_line(start_line);
        let expected = parse(source.as_bytes(), &options);
        let bytes = serialize_tree(source.as_bytes(), &options);
        prop_assert_eq!(deserialize_tree(source.as_bytes(), &bytes), Ok(expected));
    }

    #[test]
    fn token_round_trip(source in program()) {
        let options = Options::default();
        let expected = lex(source.as_bytes(), &options);
        let bytes = serialize_tokens(source.as_bytes(), &options);
        prop_assert_eq!(deserialize_tokens(source.as_bytes(), &bytes), Ok(expected));
    }

    #[test]
    fn arbitrary_bytes_round_trip(source in prop::collection::vec(any::<u8>(), 0..96)) {
        let expected = parse(&source, &Options::default());
        let bytes = serialize_tree(&source, &Options::default());
        prop_assert_eq!(deserialize_tree(&source, &bytes), Ok(expected));
    }

    #[test]
    fn corrupted_buffers_never_panic(
        source in program(),
        flips in prop::collection::vec((any::<prop::sample::Index>(), any::<u8>()), 1..4),
    ) {
        let mut bytes = serialize_tree(source.as_bytes(), &Options::default());
        for (index, value) in flips {
            let at = index.index(bytes.len());
            bytes[at] = value;
        }
        // Either a full tree or an error; never a panic.
        let _ = deserialize_tree(source.as_bytes(), &bytes);
    }
}
