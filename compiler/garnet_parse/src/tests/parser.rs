//! Parses of well-formed programs.

use pretty_assertions::assert_eq;

use super::{parse_source, parse_with, single, statements};
use crate::Options;
use garnet_ir::node::{CallFlags, StringFlags};
use garnet_ir::{Encoding, Node, NodeKind, NodeType, TokenKind};

fn kinds(nodes: &[Node]) -> Vec<NodeType> {
    nodes.iter().map(Node::node_type).collect()
}

fn call_name(node: &Node) -> String {
    match &node.kind {
        NodeKind::Call(call) => call.name.to_string(),
        other => panic!("expected a call, got {other:?}"),
    }
}

// === Programs and locals ===

#[test]
fn test_empty_source() {
    let result = parse_source("");
    assert!(result.errors.is_empty());
    assert!(statements(&result).is_empty());
    assert!(matches!(result.root.kind, NodeKind::Program(_)));
}

#[test]
fn test_local_write_declares_local() {
    let result = parse_source("foo = 1");
    let NodeKind::LocalVariableWrite(write) = single(&result).kind else {
        panic!("expected a local write");
    };
    assert_eq!(write.name.to_string(), "foo");
    assert_eq!(write.depth, 0);
    let locals: Vec<String> = result.locals().iter().map(ToString::to_string).collect();
    assert_eq!(locals, vec!["foo"]);
}

#[test]
fn test_declared_local_is_read() {
    let result = parse_source("foo = 1\nfoo");
    assert_eq!(kinds(statements(&result)), vec![NodeType::LocalVariableWrite, NodeType::LocalVariableRead]);
}

#[test]
fn test_unknown_identifier_is_a_variable_call() {
    let NodeKind::Call(call) = single(&parse_source("foo")).kind else {
        panic!("expected a call");
    };
    assert!(call.flags.contains(CallFlags::VARIABLE_CALL));
    assert!(call.receiver.is_none());
}

#[test]
fn test_block_locals_resolve_outward() {
    let result = parse_source("x = 1\n[1].each { |y| x + y }");
    assert!(result.errors.is_empty());
    let NodeKind::Call(each) = &statements(&result)[1].kind else { panic!("expected a call") };
    let Some(block) = each.block.as_deref() else { panic!("missing block") };
    let NodeKind::Block(block) = &block.kind else { panic!("expected a block") };
    let locals: Vec<String> = block.locals.iter().map(ToString::to_string).collect();
    assert_eq!(locals, vec!["y"]);
}

// === Calls and operators ===

#[test]
fn test_method_call_on_receiver() {
    let node = single(&parse_source("foo.bar"));
    let NodeKind::Call(call) = &node.kind else { panic!("expected a call") };
    assert_eq!(call.name.to_string(), "bar");
    let receiver = call.receiver.as_deref().map(call_name);
    assert_eq!(receiver.as_deref(), Some("foo"));
}

#[test]
fn test_operator_precedence() {
    let node = single(&parse_source("1 + 2 * 3"));
    assert_eq!(call_name(&node), "+");
    let NodeKind::Call(plus) = &node.kind else { unreachable!() };
    let Some(arguments) = plus.arguments.as_deref() else { panic!("missing arguments") };
    let NodeKind::Arguments(arguments) = &arguments.kind else { panic!("expected arguments") };
    assert_eq!(call_name(&arguments.arguments[0]), "*");
}

#[test]
fn test_command_call_with_arguments() {
    let NodeKind::Call(call) = single(&parse_source("puts 1, 2")).kind else {
        panic!("expected a call");
    };
    let Some(arguments) = call.arguments.as_deref() else { panic!("missing arguments") };
    let NodeKind::Arguments(arguments) = &arguments.kind else { panic!("expected arguments") };
    assert_eq!(arguments.arguments.len(), 2);
    assert!(call.opening_loc.is_none());
}

#[test]
fn test_multiple_assignment() {
    let result = parse_source("a, b = 1, 2");
    let NodeKind::MultiWrite(write) = single(&result).kind else {
        panic!("expected a multiple assignment");
    };
    assert_eq!(write.lefts.len(), 2);
    assert_eq!(kinds(&write.lefts), vec![NodeType::LocalVariableTarget, NodeType::LocalVariableTarget]);
    assert_eq!(result.locals().len(), 2);
}

#[test]
fn test_multiple_assignment_with_splat_first() {
    let result = parse_source("*a, b = c");
    let NodeKind::MultiWrite(write) = single(&result).kind else {
        panic!("expected a multiple assignment");
    };
    assert!(write.lefts.is_empty());
    let Some(rest) = write.rest.as_deref() else { panic!("missing rest") };
    let NodeKind::Splat(splat) = &rest.kind else { panic!("expected a splat") };
    assert_eq!(
        splat.expression.as_deref().map(Node::node_type),
        Some(NodeType::LocalVariableTarget)
    );
    assert_eq!(kinds(&write.rights), vec![NodeType::LocalVariableTarget]);
    assert_eq!(result.locals().len(), 2);
}

#[test]
fn test_multiple_assignment_with_trailing_splat() {
    let result = parse_source("a, *b = c");
    let NodeKind::MultiWrite(write) = single(&result).kind else {
        panic!("expected a multiple assignment");
    };
    assert_eq!(kinds(&write.lefts), vec![NodeType::LocalVariableTarget]);
    assert!(write.rest.is_some());
    assert_eq!(result.locals().len(), 2);
}

#[test]
fn test_multiple_assignment_with_nested_targets() {
    let result = parse_source("a, (b, c) = d");
    let NodeKind::MultiWrite(write) = single(&result).kind else {
        panic!("expected a multiple assignment");
    };
    assert_eq!(kinds(&write.lefts), vec![NodeType::LocalVariableTarget, NodeType::MultiTarget]);
    let NodeKind::MultiTarget(nested) = &write.lefts[1].kind else { unreachable!() };
    assert_eq!(kinds(&nested.lefts), vec![NodeType::LocalVariableTarget, NodeType::LocalVariableTarget]);
    assert_eq!(result.locals().len(), 3);
}

#[test]
fn test_multiple_assignment_of_attributes_and_globals() {
    let result = parse_source("x = 1\nx.y, @z, $w = 1, 2, 3");
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    let NodeKind::MultiWrite(write) = &statements(&result)[1].kind else {
        panic!("expected a multiple assignment");
    };
    assert_eq!(
        kinds(&write.lefts),
        vec![NodeType::CallTarget, NodeType::InstanceVariableTarget, NodeType::GlobalVariableTarget]
    );
}

#[test]
fn test_named_captures_after_lookbehind_declare_locals() {
    let result = parse_source("/(?<=x)(?<m>\\d+)/ =~ s; m");
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(kinds(statements(&result)), vec![NodeType::MatchWrite, NodeType::LocalVariableRead]);
}

// === Literals ===

#[test]
fn test_interpolated_string_parts() {
    let NodeKind::InterpolatedString(string) = single(&parse_source("\"a#{b}c\"")).kind else {
        panic!("expected an interpolated string");
    };
    assert_eq!(
        kinds(&string.parts),
        vec![NodeType::String, NodeType::EmbeddedStatements, NodeType::String]
    );
}

#[test]
fn test_symbol_and_word_list() {
    let result = parse_source(":foo\n%w[a b]");
    assert_eq!(kinds(statements(&result)), vec![NodeType::Symbol, NodeType::Array]);
    let NodeKind::Array(array) = &statements(&result)[1].kind else { unreachable!() };
    assert_eq!(array.elements.len(), 2);
}

#[test]
fn test_squiggly_heredoc_strips_indentation() {
    let result = parse_source("<<~EOS\n    hi\nEOS\n");
    let NodeKind::String(string) = single(&result).kind else {
        panic!("expected a string");
    };
    assert_eq!(string.unescaped.resolve(result.source.bytes()), b"hi\n");
}

#[test]
fn test_magic_encoding_forces_binary_strings() {
    let result = parse_source("# encoding: ascii\n\"\\xFF\\xFF\\xFF\"");
    assert_eq!(result.encoding, Encoding::UsAscii);
    let NodeKind::String(string) = single(&result).kind else {
        panic!("expected a string");
    };
    assert!(string.flags.contains(StringFlags::FORCED_BINARY_ENCODING));
}

#[test]
fn test_frozen_string_literal_option() {
    let options = Options::default().with_frozen_string_literal(true);
    let NodeKind::String(string) = single(&parse_with("'a'", &options)).kind else {
        panic!("expected a string");
    };
    assert!(string.flags.contains(StringFlags::FROZEN));
}

// === Control flow ===

#[test]
fn test_if_elsif_else_chain() {
    let NodeKind::If(first) = single(&parse_source("if a\n1\nelsif b\n2\nelse\n3\nend")).kind else {
        panic!("expected an if");
    };
    assert!(first.end_keyword_loc.is_some());
    let Some(second) = first.subsequent.as_deref() else { panic!("missing elsif") };
    let NodeKind::If(second) = &second.kind else { panic!("expected an elsif") };
    assert!(matches!(second.subsequent.as_deref().map(|n| &n.kind), Some(NodeKind::Else(_))));
}

#[test]
fn test_modifiers() {
    let result = parse_source("a if b\na unless b\na while b\na until b");
    assert_eq!(
        kinds(statements(&result)),
        vec![NodeType::If, NodeType::Unless, NodeType::While, NodeType::Until]
    );
}

#[test]
fn test_case_when() {
    let NodeKind::Case(case) = single(&parse_source("case x\nwhen 1, 2 then :a\nelse :b\nend")).kind else {
        panic!("expected a case");
    };
    assert_eq!(case.conditions.len(), 1);
    let NodeKind::When(when) = &case.conditions[0].kind else { panic!("expected a when") };
    assert_eq!(when.conditions.len(), 2);
    assert!(case.else_clause.is_some());
}

#[test]
fn test_begin_rescue_ensure() {
    let result = parse_source("begin\n  a\nrescue Foo => e\n  b\nensure\n  c\nend");
    let NodeKind::Begin(begin) = single(&result).kind else {
        panic!("expected a begin");
    };
    let Some(rescue) = begin.rescue_clause.as_deref() else { panic!("missing rescue") };
    let NodeKind::Rescue(rescue) = &rescue.kind else { panic!("expected a rescue") };
    assert_eq!(rescue.exceptions.len(), 1);
    assert!(rescue.reference.is_some());
    assert!(begin.ensure_clause.is_some());
    assert_eq!(result.locals().len(), 1);
}

#[test]
fn test_for_loop_declares_index() {
    let result = parse_source("for i in list do\n  i\nend");
    assert!(matches!(single(&result).kind, NodeKind::For(_)));
    assert_eq!(result.locals().len(), 1);
}

#[test]
fn test_for_loop_with_multiple_indices() {
    let result = parse_source("for a, b in x do\n  a\nend");
    let NodeKind::For(for_loop) = single(&result).kind else {
        panic!("expected a for loop");
    };
    let NodeKind::MultiTarget(index) = &for_loop.index.kind else {
        panic!("expected a target list");
    };
    assert_eq!(kinds(&index.lefts), vec![NodeType::LocalVariableTarget, NodeType::LocalVariableTarget]);
    assert_eq!(result.locals().len(), 2);
}

// === Definitions ===

#[test]
fn test_def_with_every_parameter_kind() {
    let result = parse_source("def foo(a, b = 1, *c, d:, e: 2, **f, &g)\nend");
    let NodeKind::Def(def) = single(&result).kind else {
        panic!("expected a def");
    };
    assert_eq!(def.name.to_string(), "foo");
    assert_eq!(def.locals.len(), 7);
    let Some(parameters) = def.parameters.as_deref() else { panic!("missing parameters") };
    let NodeKind::Parameters(parameters) = &parameters.kind else { panic!("expected parameters") };
    assert_eq!(parameters.requireds.len(), 1);
    assert_eq!(parameters.optionals.len(), 1);
    assert!(parameters.rest.is_some());
    assert_eq!(parameters.keywords.len(), 2);
    assert!(parameters.keyword_rest.is_some());
    assert!(parameters.block.is_some());
}

#[test]
fn test_singleton_def() {
    let NodeKind::Def(def) = single(&parse_source("def self.foo; end")).kind else {
        panic!("expected a def");
    };
    assert!(matches!(def.receiver.as_deref().map(|n| &n.kind), Some(NodeKind::SelfKeyword(_))));
}

#[test]
fn test_endless_def() {
    let NodeKind::Def(def) = single(&parse_source("def answer = 42")).kind else {
        panic!("expected a def");
    };
    assert!(def.equal_loc.is_some());
    assert!(def.end_keyword_loc.is_none());
}

#[test]
fn test_class_and_module() {
    let result = parse_source("class Foo < Bar\nend\nmodule A::B\nend");
    let body = statements(&result);
    assert_eq!(kinds(body), vec![NodeType::Class, NodeType::Module]);
    let NodeKind::Class(class) = &body[0].kind else { unreachable!() };
    assert!(class.superclass.is_some());
    let NodeKind::Module(module) = &body[1].kind else { unreachable!() };
    assert!(matches!(module.constant_path.kind, NodeKind::ConstantPath(_)));
}

#[test]
fn test_numbered_block_parameters() {
    let NodeKind::Call(call) = single(&parse_source("foo { _1 + _2 }")).kind else {
        panic!("expected a call");
    };
    let Some(block) = call.block.as_deref() else { panic!("missing block") };
    let NodeKind::Block(block) = &block.kind else { panic!("expected a block") };
    let Some(parameters) = block.parameters.as_deref() else { panic!("missing parameters") };
    assert!(matches!(parameters.kind, NodeKind::NumberedParameters(ref p) if p.maximum == 2));
}

#[test]
fn test_lambda() {
    let NodeKind::Lambda(lambda) = single(&parse_source("->(x) { x }")).kind else {
        panic!("expected a lambda");
    };
    assert_eq!(lambda.locals.len(), 1);
    assert!(lambda.body.is_some());
}

#[test]
fn test_alias_and_undef() {
    let result = parse_source("alias foo bar\nalias $new $old\nundef a, b");
    assert_eq!(
        kinds(statements(&result)),
        vec![NodeType::AliasMethod, NodeType::AliasGlobalVariable, NodeType::Undef]
    );
}

// === Options ===

#[test]
fn test_eval_scopes_are_visible() {
    let options = Options {
        scopes: vec![crate::OptionsScope::new(["outer"])],
        ..Options::default()
    };
    let result = parse_with("outer", &options);
    let NodeKind::LocalVariableRead(read) = single(&result).kind else {
        panic!("expected a local read");
    };
    assert_eq!(read.depth, 1);
}

#[test]
fn test_partial_script_allows_top_level_yield() {
    let options = Options {
        partial_script: true,
        ..Options::default()
    };
    assert!(parse_with("yield", &options).errors.is_empty());
}

// === Token stream ===

#[test]
fn test_lex_keeps_trivia_and_text() {
    let result = crate::lex(b"a = 1 # note\n", &Options::default());
    let kinds: Vec<TokenKind> = result.tokens.iter().map(|token| token.kind).collect();
    assert_eq!(kinds.first(), Some(&TokenKind::Identifier));
    assert_eq!(kinds.last(), Some(&TokenKind::Eof));
    assert!(kinds.contains(&TokenKind::Comment));
    assert_eq!(result.tokens[0].raw, b"a");
    assert_eq!(result.comments.len(), 1);
}
