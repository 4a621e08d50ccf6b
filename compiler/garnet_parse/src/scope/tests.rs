use pretty_assertions::assert_eq;

use super::*;

fn names(scope: &Scope) -> Vec<String> {
    scope.locals().iter().map(ToString::to_string).collect()
}

// === Declaration and lookup ===

#[test]
fn locals_keep_declaration_order() {
    let mut scopes = ScopeTracker::new();
    scopes.push_scope(ScopeKind::Top);
    assert!(scopes.declare(b"b"));
    assert!(scopes.declare(b"a"));
    assert!(!scopes.declare(b"b"));
    let scope = scopes.pop_scope();
    assert_eq!(names(&scope), vec!["b", "a"]);
}

#[test]
fn depth_counts_block_boundaries() {
    let mut scopes = ScopeTracker::new();
    scopes.push_scope(ScopeKind::Top);
    scopes.declare(b"x");
    scopes.push_scope(ScopeKind::Block);
    scopes.push_scope(ScopeKind::Block);
    scopes.declare(b"y");
    assert_eq!(scopes.resolve(b"x"), Some(2));
    assert_eq!(scopes.resolve(b"y"), Some(0));
    assert_eq!(scopes.resolve(b"z"), None);
    assert!(scopes.is_declared_here(b"y"));
    assert!(!scopes.is_declared_here(b"x"));
}

#[test]
fn method_scopes_are_opaque() {
    let mut scopes = ScopeTracker::new();
    scopes.push_scope(ScopeKind::Top);
    scopes.declare(b"x");
    scopes.push_scope(ScopeKind::Method);
    assert_eq!(scopes.resolve(b"x"), None);
    scopes.push_scope(ScopeKind::Block);
    assert_eq!(scopes.resolve(b"x"), None);
    scopes.pop_scope();
    scopes.pop_scope();
    assert_eq!(scopes.resolve(b"x"), Some(0));
}

#[test]
fn program_inside_eval_scopes_sees_them() {
    let mut scopes = ScopeTracker::new();
    let outer = [Name::from("a")];
    let inner = [Name::from("b")];
    scopes.push_scope_with(ScopeKind::Eval, outer.iter(), Forwarding::empty());
    scopes.push_scope_with(ScopeKind::Eval, inner.iter(), Forwarding::empty());
    scopes.push_scope(ScopeKind::Top);
    assert_eq!(scopes.resolve(b"b"), Some(1));
    assert_eq!(scopes.resolve(b"a"), Some(2));
}

#[test]
fn popping_an_empty_tracker_does_not_panic() {
    let mut scopes = ScopeTracker::new();
    assert!(scopes.pop_scope().locals().is_empty());
    assert!(!scopes.declare(b"x"));
}

// === Forwarding ===

#[test]
fn forwarding_is_read_from_the_enclosing_method() {
    let mut scopes = ScopeTracker::new();
    scopes.push_scope(ScopeKind::Top);
    assert!(!scopes.can_forward(Forwarding::ALL));
    scopes.push_scope(ScopeKind::Method);
    scopes.add_forwarding(Forwarding::ALL);
    scopes.push_scope(ScopeKind::Block);
    assert!(scopes.can_forward(Forwarding::ALL));
    assert!(!scopes.can_forward(Forwarding::BLOCK));
}

#[test]
fn forwarding_does_not_leak_into_nested_methods() {
    let mut scopes = ScopeTracker::new();
    scopes.push_scope(ScopeKind::Method);
    scopes.add_forwarding(Forwarding::ALL);
    scopes.push_scope(ScopeKind::Method);
    assert!(!scopes.can_forward(Forwarding::ALL));
}

#[test]
fn forwarding_names_parse() {
    assert_eq!(Forwarding::parse("**"), Ok(Forwarding::KEYWORDS));
    assert_eq!(Forwarding::parse("&"), Ok(Forwarding::BLOCK));
    assert!(Forwarding::parse("***").is_err());
}

// === Block parameters ===

#[test]
fn numbered_parameters_declare_lower_numbers() {
    let mut scopes = ScopeTracker::new();
    scopes.push_scope(ScopeKind::Top);
    scopes.push_scope(ScopeKind::Block);
    assert_eq!(scopes.use_numbered_parameter(2), Ok(()));
    assert_eq!(scopes.use_numbered_parameter(1), Ok(()));
    assert_eq!(scopes.parameters(), BlockParameters::Numbered(2));
    assert_eq!(names(&scopes.pop_scope()), vec!["_1", "_2"]);
}

#[test]
fn numbered_parameters_conflict_with_ordinary_ones() {
    let mut scopes = ScopeTracker::new();
    scopes.push_scope(ScopeKind::Block);
    scopes.set_ordinary_parameters();
    assert_eq!(
        scopes.use_numbered_parameter(1),
        Err(DiagnosticId::NumberedParameterOrdinary)
    );
}

#[test]
fn numbered_parameters_in_an_outer_block_are_rejected() {
    let mut scopes = ScopeTracker::new();
    scopes.push_scope(ScopeKind::Top);
    scopes.push_scope(ScopeKind::Block);
    scopes.use_numbered_parameter(1).unwrap();
    scopes.push_scope(ScopeKind::Block);
    assert_eq!(
        scopes.use_numbered_parameter(1),
        Err(DiagnosticId::NumberedParameterOuterBlock)
    );
}

#[test]
fn it_conflicts_with_ordinary_parameters() {
    let mut scopes = ScopeTracker::new();
    scopes.push_scope(ScopeKind::Block);
    assert_eq!(scopes.use_it_parameter(), Ok(()));
    assert_eq!(scopes.parameters(), BlockParameters::It);
    scopes.push_scope(ScopeKind::Block);
    scopes.set_ordinary_parameters();
    assert_eq!(scopes.use_it_parameter(), Err(DiagnosticId::ItNotAllowedOrdinary));
}

#[test]
fn numbered_parameter_names() {
    assert_eq!(numbered_parameter(b"_1"), Some(1));
    assert_eq!(numbered_parameter(b"_9"), Some(9));
    assert_eq!(numbered_parameter(b"_0"), None);
    assert_eq!(numbered_parameter(b"_10"), None);
    assert_eq!(numbered_parameter(b"x"), None);
}
