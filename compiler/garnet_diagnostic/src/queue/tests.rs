use super::*;
use pretty_assertions::assert_eq;

#[test]
fn keeps_encounter_order_per_severity() {
    let mut queue = DiagnosticQueue::new();
    queue.push(Diagnostic::new(DiagnosticId::ExpectExpression, Location::new(5, 6)));
    queue.push(Diagnostic::new(DiagnosticId::AmbiguousSlash, Location::new(1, 2)));
    queue.push(Diagnostic::new(DiagnosticId::ArrayTerm, Location::new(0, 1)));

    let ids: Vec<_> = queue.errors().iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![DiagnosticId::ExpectExpression, DiagnosticId::ArrayTerm]);
    assert_eq!(queue.warnings().len(), 1);
    assert_eq!(queue.error_count(), 2);
}

#[test]
fn drops_exact_duplicates() {
    let mut queue = DiagnosticQueue::new();
    let loc = Location::new(2, 3);
    assert!(queue.push(Diagnostic::new(DiagnosticId::ExpectExpression, loc)));
    assert!(!queue.push(Diagnostic::new(DiagnosticId::ExpectExpression, loc)));
    assert!(queue.push(Diagnostic::new(DiagnosticId::ExpectRparen, loc)));
    assert_eq!(queue.error_count(), 2);
    assert!(queue.has_error_at(2));
    assert!(!queue.has_error_at(3));
}

#[test]
fn into_parts() {
    let mut queue = DiagnosticQueue::new();
    assert!(!queue.has_errors());
    queue.push(Diagnostic::new(DiagnosticId::DotDotDotEol, Location::new(0, 3)));
    let (errors, warnings) = queue.into_parts();
    assert!(errors.is_empty());
    assert_eq!(warnings.len(), 1);
}
