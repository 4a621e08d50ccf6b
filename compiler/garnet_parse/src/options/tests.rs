use pretty_assertions::assert_eq;

use super::*;

// === Command line ===

#[test]
fn command_line_letters_combine() {
    assert_eq!(CommandLine::parse("nl"), Ok(CommandLine::N | CommandLine::L));
    assert_eq!(CommandLine::parse(""), Ok(CommandLine::empty()));
}

#[test]
fn unknown_command_line_letter_is_an_error() {
    assert_eq!(
        Options::new().with_command_line("nq"),
        Err(ConfigError::UnknownCommandLineFlag('q'))
    );
}

// === Version ===

#[test]
fn versions_accept_patch_releases() {
    assert_eq!(Version::parse("latest"), Ok(Version::Latest));
    assert_eq!(Version::parse("3.3"), Ok(Version::V3_3));
    assert_eq!(Version::parse("3.3.6"), Ok(Version::V3_3));
    assert_eq!(Version::parse("3.4.0"), Ok(Version::V3_4));
}

#[test]
fn unknown_versions_are_rejected() {
    for version in ["3.2", "3.33", "3.4.", "4.0", ""] {
        assert_eq!(
            Version::parse(version),
            Err(ConfigError::UnknownVersion(version.to_string())),
            "{version:?}"
        );
    }
}

#[test]
fn selectors_round_trip() {
    for version in [Version::Latest, Version::V3_3, Version::V3_4] {
        assert_eq!(Version::from_selector(version.selector()), Some(version));
    }
    assert_eq!(Version::from_selector(3), None);
}

#[test]
fn it_parameter_starts_with_3_4() {
    assert!(!Version::V3_3.has_it_parameter());
    assert!(Version::V3_4.has_it_parameter());
    assert!(Version::Latest.has_it_parameter());
}

// === Builders ===

#[test]
fn defaults() {
    let options = Options::new();
    assert_eq!(options.start_line, 1);
    assert_eq!(options.encoding, None);
    assert_eq!(options.frozen_string_literal, None);
    assert!(options.scopes.is_empty());
}

#[test]
fn builders_set_fields() {
    let options = Options::new()
        .with_filepath("lib/a.rb")
        .with_start_line(10)
        .with_encoding("binary")
        .and_then(|o| o.with_version("3.3"))
        .map(|o| o.with_frozen_string_literal(true).with_partial_script(true))
        .unwrap();
    assert_eq!(options.filepath.as_deref(), Some(&b"lib/a.rb"[..]));
    assert_eq!(options.start_line, 10);
    assert_eq!(options.encoding, Some(Encoding::Ascii8Bit));
    assert_eq!(options.version, Version::V3_3);
    assert_eq!(options.frozen_string_literal, Some(true));
    assert!(options.partial_script);
}

#[test]
fn unknown_encoding_is_an_error() {
    assert_eq!(
        Options::new().with_encoding("klingon"),
        Err(ConfigError::UnknownEncoding("klingon".to_string()))
    );
}

#[test]
fn scopes_collect_forwarding() {
    let scope = OptionsScope::new(["a", "b"])
        .with_forwarding("*")
        .and_then(|s| s.with_forwarding("..."))
        .unwrap();
    assert_eq!(scope.locals, vec![Name::from("a"), Name::from("b")]);
    assert_eq!(scope.forwarding, Forwarding::POSITIONALS | Forwarding::ALL);
    assert_eq!(
        OptionsScope::new(["a"]).with_forwarding("&&"),
        Err(ConfigError::UnknownForwarding("&&".to_string()))
    );
}
