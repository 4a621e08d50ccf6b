use super::*;
use std::collections::HashSet;

#[test]
fn ids_round_trip() {
    for &id in DiagnosticId::ALL {
        assert_eq!(DiagnosticId::from_u16(id.as_u16()), Some(id));
    }
    assert_eq!(DiagnosticId::from_u16(0), None);
}

#[test]
fn messages_are_unique_per_severity() {
    let mut seen = HashSet::new();
    for &id in DiagnosticId::ALL {
        assert!(!id.message().is_empty(), "{id}");
        assert!(seen.insert((id.severity(), id.message())), "{id}");
    }
}

#[test]
fn warnings_use_warning_levels() {
    for &id in DiagnosticId::ALL {
        match id.severity() {
            Severity::Warning => assert!(matches!(id.level(), Level::Default | Level::Verbose)),
            Severity::Error => assert!(matches!(
                id.level(),
                Level::Syntax | Level::Argument | Level::Load
            )),
        }
    }
}
