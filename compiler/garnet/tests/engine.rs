//! End-to-end behaviour of the engine entry points.

use pretty_assertions::assert_eq;

use garnet::{
    encode_options, report, ColorMode, ConfigError, DecodeError, DiagnosticId, Encoding, Engine, EngineConfig,
    EngineError, NodeKind, Options, OptionsScope,
};

fn engine() -> Engine {
    Engine::new(EngineConfig::default())
}

// === Parse scenarios ===

#[test]
fn empty_source_has_no_statements() {
    let result = engine().parse(b"");
    assert!(result.statements().is_empty());
    assert!(result.errors.is_empty());
}

#[test]
fn assignment_declares_a_top_level_local() {
    let result = engine().parse(b"foo = 1");
    let NodeKind::LocalVariableWrite(write) = &result.statements()[0].kind else {
        panic!("expected a local write");
    };
    assert_eq!(write.depth, 0);
    assert_eq!(result.locals(), &[garnet::Name::from("foo")]);
}

#[test]
fn call_with_receiver() {
    let result = engine().parse(b"foo.bar");
    let NodeKind::Call(call) = &result.statements()[0].kind else {
        panic!("expected a call");
    };
    assert_eq!(call.name, "bar");
    assert!(call.receiver.is_some());
}

#[test]
fn unclosed_argument_list_keeps_the_splat() {
    let result = engine().parse(b"foo(*bar and baz)");
    let ids: Vec<_> = result.errors.iter().map(|error| error.id).collect();
    assert_eq!(ids, vec![DiagnosticId::ArgumentTermParen]);

    let NodeKind::Call(call) = &result.statements()[0].kind else {
        panic!("expected a call");
    };
    let Some(arguments) = call.arguments.as_deref() else {
        panic!("missing arguments");
    };
    let NodeKind::Arguments(arguments) = &arguments.kind else {
        panic!("expected arguments");
    };
    assert!(matches!(arguments.arguments[0].kind, NodeKind::Splat(_)));
}

#[test]
fn ascii_magic_comment_forces_binary() {
    let result = engine().parse(b"# encoding: ascii\n\"\\xFF\\xFF\\xFF\"");
    assert_eq!(result.encoding, Encoding::UsAscii);
    let NodeKind::String(string) = &result.statements()[0].kind else {
        panic!("expected a string");
    };
    assert!(string.flags.contains(garnet_ir::node::StringFlags::FORCED_BINARY_ENCODING));
    assert!(!string.flags.contains(garnet_ir::node::StringFlags::FORCED_UTF8_ENCODING));
}

// === Transfer ===

#[test]
fn wide_integer_survives_transfer() {
    let engine = engine();
    let source = b"4294967296";
    let bytes = engine.serialize_tree(source);
    let result = engine.deserialize_tree(source, &bytes).unwrap();
    assert_eq!(result, engine.parse(source));
    let NodeKind::Integer(integer) = &result.statements()[0].kind else {
        panic!("expected an integer");
    };
    assert_eq!(integer.value.to_string(), "4294967296");
}

#[test]
fn tokens_survive_transfer() {
    let engine = engine();
    let source = b"def foo(a) = a + 1 # done\n";
    let bytes = engine.serialize_tokens(source);
    assert_eq!(engine.deserialize_tokens(source, &bytes), Ok(engine.lex(source)));
}

#[test]
fn engine_options_apply_to_every_entry_point() {
    let options = Options::new().with_scope(OptionsScope::new(["outer"]));
    let engine = Engine::new(EngineConfig::default().with_options(options));
    let parsed = engine.parse(b"outer");
    let NodeKind::LocalVariableRead(read) = &parsed.statements()[0].kind else {
        panic!("expected a local read");
    };
    assert_eq!(read.depth, 1);

    let bytes = engine.serialize_tree(b"outer");
    let decoded = engine.deserialize_tree(b"outer", &bytes).unwrap();
    assert!(matches!(decoded.statements()[0].kind, NodeKind::LocalVariableRead(_)));
}

#[test]
fn decode_failures_are_engine_errors() {
    let engine = engine();
    assert_eq!(
        engine.deserialize_tree(b"", b"GRN"),
        Err(EngineError::Decode(DecodeError::Truncated { offset: 0, needed: 1 }))
    );
}

// === Options records ===

#[test]
fn parse_under_encoded_options() {
    let options = Options::new().with_partial_script(true);
    let result = engine().parse_encoded(b"yield", &encode_options(&options)).unwrap();
    assert!(result.errors.is_empty());
}

#[test]
fn frozen_string_literal_byte_has_three_states() {
    use garnet_ir::node::StringFlags;

    let string_flags = |frozen: u8| {
        let mut record = encode_options(&Options::default());
        record[12] = frozen;
        let result = engine().parse_encoded(b"'s'", &record).unwrap();
        let NodeKind::String(string) = &result.statements()[0].kind else {
            panic!("expected a string");
        };
        string.flags & (StringFlags::FROZEN | StringFlags::MUTABLE)
    };
    assert_eq!(string_flags(0), StringFlags::empty());
    assert_eq!(string_flags(1), StringFlags::FROZEN);
    assert_eq!(string_flags(0xFF), StringFlags::MUTABLE);
}

#[test]
fn malformed_options_record_is_a_config_error() {
    let mut record = encode_options(&Options::default());
    record[18] = 7;
    assert_eq!(
        engine().parse_encoded(b"", &record),
        Err(EngineError::Config(ConfigError::Reserved { offset: 18 }))
    );
}

// === Reporting ===

#[test]
fn report_lists_errors_with_a_summary() {
    let result = engine().parse(b"def foo\n");
    let output = report(&result, "t.rb", Vec::new(), ColorMode::Never).unwrap();
    let text = String::from_utf8(output).unwrap();
    assert!(text.starts_with("t.rb:"), "{text}");
    assert!(text.contains("error"), "{text}");
    assert!(text.trim_end().ends_with("warnings") || text.trim_end().ends_with("warning"), "{text}");
}
