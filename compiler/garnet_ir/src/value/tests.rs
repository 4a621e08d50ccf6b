use super::*;
use pretty_assertions::assert_eq;

#[test]
fn integer_words_wider_than_u32() {
    let value = IntegerValue::parse_digits(b"4294967296", 10).unwrap();
    let (negative, words) = value.to_words();
    assert!(!negative);
    assert_eq!(words, vec![0, 1]);
    assert_eq!(IntegerValue::from_words(false, &words), value);
}

#[test]
fn integer_zero_has_no_words() {
    let zero = IntegerValue::default();
    assert_eq!(zero.to_words(), (false, vec![]));
    assert_eq!(IntegerValue::from_words(false, &[]), zero);
    assert!(zero.is_zero());
}

#[test]
fn integer_negative() {
    let value = IntegerValue::from(-5).negated().negated();
    assert_eq!(value.to_words(), (true, vec![5]));
    assert_eq!(value.to_i64(), Some(-5));
}

#[test]
fn integer_radixes() {
    assert_eq!(
        IntegerValue::parse_digits(b"ff", 16).and_then(|v| v.to_i64()),
        Some(255)
    );
    assert_eq!(
        IntegerValue::parse_digits(b"777", 8).and_then(|v| v.to_i64()),
        Some(511)
    );
    assert!(IntegerValue::parse_digits(b"9", 8).is_none());
}

#[test]
fn string_value_shares_identical_slice() {
    let src = b"'abc'";
    let loc = Location::new(1, 4);
    let shared = StringValue::from_source(src, loc, b"abc".to_vec());
    assert_eq!(shared, StringValue::Shared(loc));
    assert_eq!(shared.resolve(src), b"abc");

    let owned = StringValue::from_source(src, loc, b"ab".to_vec());
    assert_eq!(owned, StringValue::Owned(b"ab".to_vec()));
    assert_eq!(owned.resolve(src), b"ab");
}

#[test]
fn float_bits_preserved() {
    let f = FloatValue::new(1.5);
    assert_eq!(FloatValue::from_bits(f.bits()), f);
    assert!((f.get() - 1.5).abs() < f64::EPSILON);
    assert_eq!(FloatValue::new(f64::NAN), FloatValue::new(f64::NAN));
}
