//! Malformed programs: every parse still yields a tree, and the errors
//! point at the right place.

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::{parse_source, statements};
use garnet_diagnostic::DiagnosticId;
use garnet_ir::NodeKind;

fn error_ids(source: &str) -> Vec<DiagnosticId> {
    parse_source(source).errors.iter().map(|error| error.id).collect()
}

// === Closers ===

#[test]
fn test_splat_of_keyword_and_in_parentheses() {
    assert_eq!(error_ids("foo(*bar and baz)"), vec![DiagnosticId::ArgumentTermParen]);
}

#[test]
fn test_missing_end_of_def() {
    let result = parse_source("def foo\n  1\n");
    assert!(result.errors.iter().any(|error| error.id == DiagnosticId::DefTerm));
    assert!(matches!(statements(&result)[0].kind, NodeKind::Def(_)));
}

#[test]
fn test_stray_end_is_skipped() {
    let result = parse_source("a\nend\nb");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(statements(&result).len(), 2);
}

#[test]
fn test_error_locations_are_inside_the_source() {
    let source = "foo(1, 2\nbar = [3,\n";
    let result = parse_source(source);
    assert!(!result.errors.is_empty());
    for error in &result.errors {
        assert!(error.location.end as usize <= source.len(), "{error:?}");
    }
}

// === Context checks ===

#[test]
fn test_top_level_yield() {
    assert_eq!(error_ids("yield"), vec![DiagnosticId::InvalidYield]);
}

#[test]
fn test_endless_setter() {
    assert_eq!(error_ids("def foo=(x) = 1"), vec![DiagnosticId::DefEndlessSetter]);
}

#[test]
fn test_retry_outside_rescue() {
    assert_eq!(error_ids("retry"), vec![DiagnosticId::InvalidRetry]);
    assert!(error_ids("begin\nrescue\n  retry\nend").is_empty());
}

// === Totality ===

proptest! {
    #[test]
    fn any_input_parses_to_a_program(source in "[a-z0-9 \n(){}\\[\\]|*&:=.,+\"'#$@-]{0,64}") {
        let result = parse_source(&source);
        prop_assert!(matches!(result.root.kind, NodeKind::Program(_)));
        for error in &result.errors {
            prop_assert!(error.location.start <= error.location.end);
            prop_assert!(error.location.end as usize <= source.len());
        }
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
        let result = crate::parse(&bytes, &crate::Options::default());
        prop_assert!(matches!(result.root.kind, NodeKind::Program(_)));
    }
}
