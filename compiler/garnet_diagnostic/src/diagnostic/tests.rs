use super::*;
use pretty_assertions::assert_eq;

#[test]
fn new_uses_id_defaults() {
    let diag = Diagnostic::new(DiagnosticId::ArgumentTermParen, Location::new(3, 4));
    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.level, Level::Syntax);
    assert_eq!(diag.message, "Expected a ')' to close the argument list");
    assert!(diag.is_error());
}

#[test]
fn with_message_overrides() {
    let diag = Diagnostic::new(DiagnosticId::DefName, Location::new(0, 1))
        .with_message("unexpected '+'; expected a method name");
    assert_eq!(diag.message, "unexpected '+'; expected a method name");
    assert_eq!(diag.id, DiagnosticId::DefName);
}

#[test]
fn level_tags_depend_on_severity() {
    assert_eq!(Level::from_tag(Severity::Error, 0), Some(Level::Syntax));
    assert_eq!(Level::from_tag(Severity::Warning, 0), Some(Level::Default));
    assert_eq!(Level::from_tag(Severity::Warning, 2), None);
    for level in [
        Level::Syntax,
        Level::Argument,
        Level::Load,
    ] {
        assert_eq!(Level::from_tag(Severity::Error, level.tag()), Some(level));
    }
}

#[test]
fn display() {
    let diag = Diagnostic::new(DiagnosticId::DotDotDotEol, Location::new(5, 8));
    assert_eq!(
        diag.to_string(),
        "warning: ... at EOL, should be parenthesized? (5...8)"
    );
}
