use super::{coding_anywhere, key_is, pairs};
use pretty_assertions::assert_eq;

fn texts(comment: &[u8]) -> Vec<(String, String)> {
    pairs(comment)
        .iter()
        .map(|p| {
            (
                String::from_utf8_lossy(p.key(comment)).into_owned(),
                String::from_utf8_lossy(p.value(comment)).into_owned(),
            )
        })
        .collect()
}

#[test]
fn simple_form() {
    assert_eq!(
        texts(b" frozen_string_literal: true"),
        vec![("frozen_string_literal".into(), "true".into())]
    );
    assert_eq!(texts(b" encoding: ascii  "), vec![("encoding".into(), "ascii".into())]);
}

#[test]
fn prose_is_not_magic() {
    assert!(texts(b" this is: a comment").is_empty());
    assert!(texts(b" just words").is_empty());
    assert!(texts(b" key:").is_empty());
}

#[test]
fn emacs_form() {
    assert_eq!(
        texts(b" -*- coding: utf-8; frozen-string-literal: false -*-"),
        vec![
            ("coding".into(), "utf-8".into()),
            ("frozen-string-literal".into(), "false".into())
        ]
    );
    assert!(texts(b" -*- unterminated: yes").is_empty());
}

#[test]
fn keys_compare_loosely() {
    assert!(key_is(b"Frozen-String-Literal", "frozen_string_literal"));
    assert!(!key_is(b"frozen", "frozen_string_literal"));
}

#[test]
fn coding_inside_editor_lines() {
    let text = b" vim: set fileencoding=latin1 :";
    let pair = coding_anywhere(text).map(|p| p.value(text).to_vec());
    assert_eq!(pair, Some(b"latin1".to_vec()));
    assert!(coding_anywhere(b" no encoding here").is_none());
}
