use super::{float_value, integer_value, rational_value, split_suffix, NumericSuffix};
use garnet_ir::node::IntegerBaseFlags;
use garnet_ir::IntegerValue;
use pretty_assertions::assert_eq;

fn int(raw: &str) -> (String, IntegerBaseFlags) {
    let (value, base) = integer_value(raw.as_bytes());
    (value.to_string(), base)
}

#[test]
fn integer_bases() {
    assert_eq!(int("42"), ("42".to_string(), IntegerBaseFlags::DECIMAL));
    assert_eq!(int("0x1F"), ("31".to_string(), IntegerBaseFlags::HEXADECIMAL));
    assert_eq!(int("0b101"), ("5".to_string(), IntegerBaseFlags::BINARY));
    assert_eq!(int("0o17"), ("15".to_string(), IntegerBaseFlags::OCTAL));
    assert_eq!(int("017"), ("15".to_string(), IntegerBaseFlags::OCTAL));
    assert_eq!(int("0_17"), ("15".to_string(), IntegerBaseFlags::OCTAL));
    assert_eq!(int("0d99"), ("99".to_string(), IntegerBaseFlags::DECIMAL));
    assert_eq!(int("0"), ("0".to_string(), IntegerBaseFlags::DECIMAL));
    assert_eq!(int("1_000"), ("1000".to_string(), IntegerBaseFlags::DECIMAL));
}

#[test]
fn wide_integers_are_exact() {
    let (value, _) = integer_value(b"4294967296");
    assert_eq!(value.to_words(), (false, vec![0, 1]));
    let (value, _) = integer_value(b"123456789012345678901234567890");
    assert_eq!(value.to_string(), "123456789012345678901234567890");
}

#[test]
fn suffixes() {
    assert_eq!(
        split_suffix(b"1ri"),
        (
            &b"1"[..],
            NumericSuffix {
                rational: true,
                imaginary: true
            }
        )
    );
    assert!(split_suffix(b"2.5i").1.imaginary);
    assert_eq!(split_suffix(b"0xffi").0, b"0xff");
    assert_eq!(split_suffix(b"0x1").1, NumericSuffix::default());
}

#[test]
fn floats() {
    assert_eq!(float_value(b"1.5"), Some(1.5));
    assert_eq!(float_value(b"1_000.25"), Some(1000.25));
    assert_eq!(float_value(b"2e3"), Some(2000.0));
    assert_eq!(float_value(b"1e400"), None);
}

#[test]
fn rationals_reduce() {
    let (n, d) = rational_value(b"1.5");
    assert_eq!((n, d), (IntegerValue::from(3), IntegerValue::from(2)));
    let (n, d) = rational_value(b"3");
    assert_eq!((n, d), (IntegerValue::from(3), IntegerValue::from(1)));
    let (n, d) = rational_value(b"0.0");
    assert_eq!((n, d), (IntegerValue::from(0), IntegerValue::from(1)));
}
