use pretty_assertions::assert_eq;

use super::*;

fn full_options() -> Options {
    Options::new()
        .with_filepath("lib/foo.rb")
        .with_start_line(10)
        .with_encoding("ascii")
        .unwrap()
        .with_frozen_string_literal(false)
        .with_command_line("np")
        .unwrap()
        .with_version("3.3")
        .unwrap()
        .with_encoding_locked(true)
        .with_main_script(true)
        .with_scope(OptionsScope::new(["a", "b"]).with_forwarding("...").unwrap())
        .with_scope(OptionsScope::new(["c"]))
}

// === Layout ===

#[test]
fn default_options_layout() {
    let bytes = encode_options(&Options::default());
    #[rustfmt::skip]
    let expected = vec![
        0, 0, 0, 0,         // filepath
        1, 0, 0, 0,         // start line
        0, 0, 0, 0,         // encoding
        0,                  // frozen
        0,                  // command line
        0,                  // version
        0, 0, 0,            // locked, main, partial
        0,                  // reserved
        0, 0, 0, 0,         // scopes
    ];
    assert_eq!(bytes, expected);
}

#[test]
fn scope_layout() {
    let options = Options::new().with_scope(OptionsScope::new(["x"]).with_forwarding("*").unwrap());
    let bytes = encode_options(&options);
    assert_eq!(&bytes[19..], &[1, 0, 0, 0, 1, 0, 0, 0, 1, 1, 0, 0, 0, b'x']);
}

// === Decoding ===

#[test]
fn decodes_what_was_encoded() {
    let options = full_options();
    assert_eq!(decode_options(&encode_options(&options)), Ok(options));
}

#[test]
fn frozen_states_are_distinct() {
    for frozen in [None, Some(true), Some(false)] {
        let options = Options {
            frozen_string_literal: frozen,
            ..Options::default()
        };
        let decoded = decode_options(&encode_options(&options)).unwrap();
        assert_eq!(decoded.frozen_string_literal, frozen);
    }
}

#[test]
fn empty_strings_mean_absent() {
    let decoded = decode_options(&encode_options(&Options::default())).unwrap();
    assert_eq!(decoded.filepath, None);
    assert_eq!(decoded.encoding, None);
}

// === Errors ===

#[test]
fn truncated_record() {
    let bytes = encode_options(&Options::default());
    assert_eq!(
        decode_options(&bytes[..6]),
        Err(ConfigError::Truncated { offset: 4, needed: 2 })
    );
}

#[test]
fn non_zero_reserved_byte() {
    let mut bytes = encode_options(&Options::default());
    bytes[18] = 1;
    assert_eq!(decode_options(&bytes), Err(ConfigError::Reserved { offset: 18 }));
}

#[test]
fn unknown_command_line_bit() {
    let mut bytes = encode_options(&Options::default());
    bytes[13] = 0x40;
    assert_eq!(
        decode_options(&bytes),
        Err(ConfigError::InvalidByte {
            field: "command line",
            value: 0x40,
            offset: 13,
        })
    );
}

#[test]
fn unknown_version_selector() {
    let mut bytes = encode_options(&Options::default());
    bytes[14] = 3;
    assert!(matches!(
        decode_options(&bytes),
        Err(ConfigError::InvalidByte { field: "version", value: 3, .. })
    ));
}

#[test]
fn flag_bytes_must_be_boolean() {
    let mut bytes = encode_options(&Options::default());
    bytes[16] = 2;
    assert!(matches!(
        decode_options(&bytes),
        Err(ConfigError::InvalidByte { field: "main script", .. })
    ));
}

#[test]
fn unknown_forwarding_bit() {
    let options = Options::new().with_scope(OptionsScope::new(["x"]));
    let mut bytes = encode_options(&options);
    bytes[27] = 0x10;
    assert!(matches!(
        decode_options(&bytes),
        Err(ConfigError::InvalidByte { field: "forwarding", value: 0x10, .. })
    ));
}

#[test]
fn unknown_encoding_name() {
    let mut bytes = vec![0, 0, 0, 0, 1, 0, 0, 0, 3, 0, 0, 0];
    bytes.extend_from_slice(b"xyz");
    bytes.extend_from_slice(&[0; 11]);
    assert_eq!(decode_options(&bytes), Err(ConfigError::UnknownEncoding("xyz".to_string())));
}

#[test]
fn trailing_bytes() {
    let mut bytes = encode_options(&Options::default());
    bytes.push(0);
    assert_eq!(decode_options(&bytes), Err(ConfigError::TrailingBytes { count: 1 }));
}
