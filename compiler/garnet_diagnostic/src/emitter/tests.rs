use super::*;
use crate::DiagnosticId;
use garnet_ir::Location;
use pretty_assertions::assert_eq;

fn render(diagnostic: &Diagnostic, src: &[u8]) -> String {
    let source = Source::new(src, 1);
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    emitter.emit(diagnostic, &source, "test.rb").unwrap();
    String::from_utf8(emitter.into_inner()).unwrap()
}

#[test]
fn renders_path_line_column_and_carets() {
    let diag = Diagnostic::new(DiagnosticId::ExpectRparen, Location::new(10, 13));
    let out = render(&diag, b"x = 1\nfoo(bar baz\n");
    assert_eq!(
        out,
        "test.rb:2:5: error: expected a matching `)`\n  foo(bar baz\n      ^^^\n"
    );
}

#[test]
fn zero_width_gets_one_caret() {
    let diag = Diagnostic::new(DiagnosticId::ExpectExpression, Location::point(4));
    let out = render(&diag, b"a = ");
    assert!(out.ends_with("  a = \n      ^\n"), "{out}");
}

#[test]
fn colors_wrap_severity() {
    let source = Source::new(b"x", 1);
    let diag = Diagnostic::new(DiagnosticId::DotDotDotEol, Location::new(0, 1));
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Always, false);
    emitter.emit(&diag, &source, "a.rb").unwrap();
    let out = String::from_utf8(emitter.into_inner()).unwrap();
    assert!(out.contains("\x1b[1;33mwarning\x1b[0m"));
}

#[test]
fn summary_pluralizes() {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    emitter.emit_summary(1, 2).unwrap();
    emitter.emit_summary(0, 0).unwrap();
    assert_eq!(
        String::from_utf8(emitter.into_inner()).unwrap(),
        "1 error, 2 warnings\n"
    );
}
