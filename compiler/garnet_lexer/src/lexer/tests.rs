use super::*;
use garnet_ir::{CommentKind, Encoding};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use TokenKind as T;

fn lex_with(source: &str, options: &LexerOptions) -> (Vec<TokenKind>, LexOutput<'static>) {
    let buffer: &'static SourceBuffer = Box::leak(Box::new(SourceBuffer::new(source.as_bytes())));
    let mut lexer = Lexer::new(buffer, options);
    let mut kinds = Vec::new();
    loop {
        let token = lexer.next_token();
        kinds.push(token.kind);
        if token.kind == T::Eof {
            break;
        }
    }
    (kinds, lexer.finish())
}

fn kinds(source: &str) -> Vec<TokenKind> {
    lex_with(source, &LexerOptions::default()).0
}

fn error_ids(output: &LexOutput<'_>) -> Vec<DiagnosticId> {
    output.diagnostics.errors().iter().map(|d| d.id).collect()
}

fn warning_ids(output: &LexOutput<'_>) -> Vec<DiagnosticId> {
    output.diagnostics.warnings().iter().map(|d| d.id).collect()
}

// === Operators and unary forms ===

#[test]
fn binary_plus_between_identifiers() {
    assert_eq!(kinds("a + b"), vec![T::Identifier, T::Plus, T::Identifier, T::Eof]);
}

#[test]
fn minus_before_digit_in_argument_position() {
    let (kinds, output) = lex_with("foo -1", &LexerOptions::default());
    assert_eq!(kinds, vec![T::Identifier, T::UMinusNum, T::Integer, T::Eof]);
    assert_eq!(warning_ids(&output), vec![DiagnosticId::AmbiguousFirstArgumentMinus]);
}

#[test]
fn slash_with_spaces_is_division() {
    assert_eq!(kinds("a / b"), vec![T::Identifier, T::Slash, T::Identifier, T::Eof]);
}

#[test]
fn compound_assignment_operators() {
    assert_eq!(
        kinds("a ||= b"),
        vec![T::Identifier, T::PipePipeEqual, T::Identifier, T::Eof]
    );
    assert_eq!(
        kinds("a **= 2"),
        vec![T::Identifier, T::StarStarEqual, T::Integer, T::Eof]
    );
}

#[test]
fn splat_at_expression_start() {
    assert_eq!(
        kinds("*a, b = c"),
        vec![T::UStar, T::Identifier, T::Comma, T::Identifier, T::Equal, T::Identifier, T::Eof]
    );
}

#[test]
fn lambda_literal_with_brace_body() {
    assert_eq!(
        kinds("->(x) { x }"),
        vec![
            T::MinusGreater,
            T::ParenthesisLeft,
            T::Identifier,
            T::ParenthesisRight,
            T::LambdaBegin,
            T::Identifier,
            T::BraceRight,
            T::Eof,
        ]
    );
}

// === Newlines ===

#[test]
fn newline_after_operator_is_ignored() {
    assert_eq!(
        kinds("x = 1 +\n 2"),
        vec![T::Identifier, T::Equal, T::Integer, T::Plus, T::Integer, T::Eof]
    );
}

#[test]
fn leading_dot_continues_previous_line() {
    assert_eq!(
        kinds("foo\n  # note\n  .bar"),
        vec![T::Identifier, T::Dot, T::Identifier, T::Eof]
    );
}

#[test]
fn ignored_newlines_are_recorded() {
    let options = LexerOptions {
        record_tokens: true,
        ..LexerOptions::default()
    };
    let (_, output) = lex_with("a +\nb", &options);
    let recorded: Vec<_> = output.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        recorded,
        vec![T::Identifier, T::Plus, T::IgnoredNewline, T::Identifier, T::Eof]
    );
}

// === Keywords and labels ===

#[test]
fn if_after_value_is_a_modifier() {
    assert_eq!(
        kinds("a if b"),
        vec![T::Identifier, T::KeywordIfModifier, T::Identifier, T::Eof]
    );
    assert_eq!(
        kinds("if a then b end"),
        vec![T::KeywordIf, T::Identifier, T::KeywordThen, T::Identifier, T::KeywordEnd, T::Eof]
    );
}

#[test]
fn do_closes_a_loop_condition() {
    let buffer = SourceBuffer::new(b"while x do end");
    let mut lexer = Lexer::new(&buffer, &LexerOptions::default());
    assert_eq!(lexer.next_token().kind, T::KeywordWhile);
    lexer.push_do_loop(true);
    assert_eq!(lexer.next_token().kind, T::Identifier);
    assert_eq!(lexer.next_token().kind, T::KeywordDoLoop);
    lexer.pop_do_loop();
    assert_eq!(lexer.next_token().kind, T::KeywordEnd);
}

#[test]
fn label_in_argument_list() {
    assert_eq!(
        kinds("foo(a: 1)"),
        vec![T::Identifier, T::ParenthesisLeft, T::Label, T::Integer, T::ParenthesisRight, T::Eof]
    );
}

#[test]
fn quoted_label_in_hash() {
    assert_eq!(
        kinds("{ \"a\": 1 }"),
        vec![
            T::BraceLeft,
            T::StringBegin,
            T::StringContent,
            T::LabelEnd,
            T::Integer,
            T::BraceRight,
            T::Eof,
        ]
    );
}

#[test]
fn keyword_after_dot_is_an_identifier() {
    assert_eq!(
        kinds("a.class"),
        vec![T::Identifier, T::Dot, T::Identifier, T::Eof]
    );
}

#[test]
fn predicate_and_bang_method_names() {
    assert_eq!(
        kinds("a.empty? && b.save!"),
        vec![
            T::Identifier,
            T::Dot,
            T::MethodName,
            T::AmpersandAmpersand,
            T::Identifier,
            T::Dot,
            T::MethodName,
            T::Eof,
        ]
    );
}

#[test]
fn parser_can_mark_a_local_as_a_value() {
    let buffer = SourceBuffer::new(b"a [1]");
    let mut lexer = Lexer::new(&buffer, &LexerOptions::default());
    assert_eq!(lexer.next_token().kind, T::Identifier);
    lexer.set_state(LexState::END | LexState::LABEL);
    assert_eq!(lexer.next_token().kind, T::BracketLeft);
}

// === Numbers ===

#[test]
fn numeric_literal_kinds() {
    assert_eq!(
        kinds("0x1F 1_000 1.5e3 3r 2i 1.5ri"),
        vec![
            T::Integer,
            T::Integer,
            T::Float,
            T::IntegerRational,
            T::IntegerImaginary,
            T::FloatRationalImaginary,
            T::Eof,
        ]
    );
}

#[test]
fn malformed_numbers_are_reported() {
    let (_, output) = lex_with("1__2", &LexerOptions::default());
    assert_eq!(error_ids(&output), vec![DiagnosticId::InvalidNumberUnderscore]);

    let (_, output) = lex_with("0x", &LexerOptions::default());
    assert_eq!(error_ids(&output), vec![DiagnosticId::NumberNoDigits]);

    let (_, output) = lex_with("09", &LexerOptions::default());
    assert_eq!(error_ids(&output), vec![DiagnosticId::InvalidOctalDigit]);
}

#[test]
fn integer_followed_by_range() {
    assert_eq!(kinds("1..2"), vec![T::Integer, T::DotDot, T::Integer, T::Eof]);
}

// === Variables ===

#[test]
fn sigiled_variables() {
    assert_eq!(
        kinds("@a; @@b; $c; $1; $&; $:"),
        vec![
            T::InstanceVariable,
            T::Semicolon,
            T::ClassVariable,
            T::Semicolon,
            T::GlobalVariable,
            T::Semicolon,
            T::NumberedReference,
            T::Semicolon,
            T::BackReference,
            T::Semicolon,
            T::GlobalVariable,
            T::Eof,
        ]
    );
}

#[test]
fn bare_sigils_are_errors() {
    let (_, output) = lex_with("@ ", &LexerOptions::default());
    assert_eq!(error_ids(&output), vec![DiagnosticId::InstanceVariableBare]);

    let (_, output) = lex_with("$ ", &LexerOptions::default());
    assert_eq!(error_ids(&output), vec![DiagnosticId::GlobalVariableBare]);
}

// === Strings and interpolation ===

#[test]
fn interpolated_string() {
    assert_eq!(
        kinds("x = \"a#{b}c\""),
        vec![
            T::Identifier,
            T::Equal,
            T::StringBegin,
            T::StringContent,
            T::EmbexprBegin,
            T::Identifier,
            T::EmbexprEnd,
            T::StringContent,
            T::StringEnd,
            T::Eof,
        ]
    );
}

#[test]
fn embedded_instance_variable() {
    assert_eq!(
        kinds("\"#@a\""),
        vec![T::StringBegin, T::Embvar, T::InstanceVariable, T::StringEnd, T::Eof]
    );
}

#[test]
fn single_quotes_do_not_interpolate() {
    assert_eq!(
        kinds("'a#{b}'"),
        vec![T::StringBegin, T::StringContent, T::StringEnd, T::Eof]
    );
}

#[test]
fn unterminated_string_closes_at_eof() {
    let (kinds, output) = lex_with("\"abc", &LexerOptions::default());
    assert_eq!(kinds, vec![T::StringBegin, T::StringContent, T::StringEnd, T::Eof]);
    assert_eq!(error_ids(&output), vec![DiagnosticId::StringTerm]);
}

#[test]
fn symbols_in_array() {
    assert_eq!(
        kinds("[:foo, :\"bar\", :+]"),
        vec![
            T::BracketLeftArray,
            T::SymbolBegin,
            T::Identifier,
            T::Comma,
            T::SymbolBegin,
            T::StringContent,
            T::StringEnd,
            T::Comma,
            T::SymbolBegin,
            T::Plus,
            T::BracketRight,
            T::Eof,
        ]
    );
}

#[test]
fn regexp_with_interpolation_and_options() {
    let options = LexerOptions {
        record_tokens: true,
        ..LexerOptions::default()
    };
    let (kinds, output) = lex_with("/a#{b}/i", &options);
    assert_eq!(
        kinds,
        vec![
            T::RegexpBegin,
            T::StringContent,
            T::EmbexprBegin,
            T::Identifier,
            T::EmbexprEnd,
            T::RegexpEnd,
            T::Eof,
        ]
    );
    assert_eq!(output.tokens[5].raw, b"/i");
}

#[test]
fn unknown_regexp_option() {
    let (_, output) = lex_with("/a/z", &LexerOptions::default());
    assert_eq!(error_ids(&output), vec![DiagnosticId::RegexpUnknownOption]);
}

#[test]
fn percent_word_list() {
    assert_eq!(
        kinds("%w[a b]"),
        vec![
            T::PercentLowerW,
            T::StringContent,
            T::WordsSep,
            T::StringContent,
            T::StringEnd,
            T::Eof,
        ]
    );
}

#[test]
fn percent_string_with_nested_brackets() {
    let options = LexerOptions {
        record_tokens: true,
        ..LexerOptions::default()
    };
    let (kinds, output) = lex_with("%q(a (b) c)", &options);
    assert_eq!(kinds, vec![T::StringBegin, T::StringContent, T::StringEnd, T::Eof]);
    assert_eq!(output.tokens[1].raw, b"a (b) c");
}

#[test]
fn unknown_percent_literal() {
    let (_, output) = lex_with("%z(a)", &LexerOptions::default());
    assert_eq!(error_ids(&output)[0], DiagnosticId::InvalidPercent);
}

#[test]
fn character_literals_and_ternary() {
    assert_eq!(kinds("?a"), vec![T::CharacterLiteral, T::Eof]);
    assert_eq!(kinds("?\\n"), vec![T::CharacterLiteral, T::Eof]);
    assert_eq!(
        kinds("x ? y : z"),
        vec![T::Identifier, T::QuestionMark, T::Identifier, T::Colon, T::Identifier, T::Eof]
    );
}

// === Heredocs ===

#[test]
fn squiggly_heredoc_in_call() {
    let options = LexerOptions {
        record_tokens: true,
        ..LexerOptions::default()
    };
    let (kinds, output) = lex_with("foo(<<~EOS)\n  a\n  b\nEOS\nbar\n", &options);
    assert_eq!(
        kinds,
        vec![
            T::Identifier,
            T::ParenthesisLeft,
            T::HeredocStart,
            T::StringContent,
            T::StringContent,
            T::HeredocEnd,
            T::ParenthesisRight,
            T::Newline,
            T::Identifier,
            T::Newline,
            T::Eof,
        ]
    );
    assert_eq!(output.tokens[3].raw, b"  a\n");
    assert_eq!(output.tokens[5].raw, b"EOS\n");
    assert!(output.diagnostics.errors().is_empty());
}

#[test]
fn two_heredocs_on_one_line() {
    let options = LexerOptions {
        record_tokens: true,
        ..LexerOptions::default()
    };
    let (_, output) = lex_with("f(<<A, <<B)\na\nA\nb\nB\n", &options);
    let contents: Vec<&[u8]> = output
        .tokens
        .iter()
        .filter(|t| t.kind == T::StringContent)
        .map(|t| t.raw)
        .collect();
    assert_eq!(contents, vec![&b"a\n"[..], &b"b\n"[..]]);
    assert!(output.diagnostics.errors().is_empty());
}

#[test]
fn unterminated_heredoc() {
    let (kinds, output) = lex_with("<<EOS\nabc\n", &LexerOptions::default());
    assert_eq!(
        kinds,
        vec![T::HeredocStart, T::StringContent, T::HeredocEnd, T::Newline, T::Eof]
    );
    assert_eq!(error_ids(&output), vec![DiagnosticId::HeredocTerm]);
}

#[test]
fn shift_operator_after_value() {
    assert_eq!(
        kinds("a << b"),
        vec![T::Identifier, T::LessLess, T::Identifier, T::Eof]
    );
}

// === Comments, documents, and magic comments ===

#[test]
fn frozen_string_literal_magic_comment() {
    let (_, output) = lex_with("# frozen_string_literal: true\nfoo", &LexerOptions::default());
    assert_eq!(output.frozen_string_literal, Some(true));
    assert_eq!(output.magic_comments.len(), 1);
    assert_eq!(output.comments.len(), 1);
}

#[test]
fn frozen_string_literal_after_a_token_is_ignored() {
    let (_, output) = lex_with("foo\n# frozen_string_literal: true\n", &LexerOptions::default());
    assert_eq!(output.frozen_string_literal, None);
    assert_eq!(warning_ids(&output), vec![DiagnosticId::IgnoredFrozenStringLiteral]);
}

#[test]
fn encoding_magic_comment() {
    let (_, output) = lex_with("# encoding: ascii-8bit\n", &LexerOptions::default());
    assert_eq!(output.encoding, Encoding::Ascii8Bit);

    let (_, output) = lex_with("# -*- coding: bogus -*-\n", &LexerOptions::default());
    assert_eq!(error_ids(&output), vec![DiagnosticId::InvalidEncodingMagicComment]);
}

#[test]
fn embedded_document() {
    let options = LexerOptions {
        record_tokens: true,
        ..LexerOptions::default()
    };
    let (kinds, output) = lex_with("=begin\nx\n=end\nfoo", &options);
    assert_eq!(kinds, vec![T::Identifier, T::Eof]);
    let recorded: Vec<_> = output.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        recorded,
        vec![T::EmbdocBegin, T::EmbdocLine, T::EmbdocEnd, T::Identifier, T::Eof]
    );
    assert_eq!(output.comments[0].kind, CommentKind::EmbeddedDoc);
}

#[test]
fn data_section_after_end_marker() {
    let (kinds, output) = lex_with("foo\n__END__\ndata", &LexerOptions::default());
    assert_eq!(kinds, vec![T::Identifier, T::Newline, T::Eof]);
    assert_eq!(output.data_loc, Some(Location::new(4, 16)));
}

// === Command-line handling ===

#[test]
fn shebang_flags_on_main_script() {
    let buffer = SourceBuffer::new(b"#!/usr/bin/env ruby -nl\nputs");
    let options = LexerOptions {
        main_script: true,
        ..LexerOptions::default()
    };
    let lexer = Lexer::new(&buffer, &options);
    assert_eq!(lexer.shebang_flags(), b"nl");
}

#[test]
fn skip_to_shebang_line() {
    let options = LexerOptions {
        skip_to_shebang: true,
        ..LexerOptions::default()
    };
    let (kinds, output) = lex_with("garbage (\n#!ruby\nputs", &options);
    assert_eq!(kinds, vec![T::Identifier, T::Eof]);
    assert!(output.diagnostics.errors().is_empty());

    let (kinds, output) = lex_with("no script here\n", &options);
    assert_eq!(kinds, vec![T::Eof]);
    assert_eq!(error_ids(&output), vec![DiagnosticId::ScriptNotFound]);
}

// === Totality ===

proptest! {
    #[test]
    fn lexing_terminates_with_ordered_tokens(source in proptest::collection::vec(any::<u8>(), 0..64)) {
        let buffer = SourceBuffer::new(&source);
        let options = LexerOptions { record_tokens: true, ..LexerOptions::default() };
        let mut lexer = Lexer::new(&buffer, &options);
        let mut steps = 0;
        while lexer.next_token().kind != T::Eof {
            steps += 1;
            prop_assert!(steps < 10 * (source.len() + 4), "lexer did not make progress");
        }
        let output = lexer.finish();
        for token in &output.tokens {
            prop_assert!(token.location.start <= token.location.end);
            prop_assert!(token.location.end as usize <= source.len());
            prop_assert_eq!(Some(token.raw), token.location.slice(&source));
        }
    }
}
