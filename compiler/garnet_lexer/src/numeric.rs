//! Values of numeric literal tokens.
//!
//! The lexer only validates the shape of a number; the parser calls these
//! to compute the value from the token's raw text.

use garnet_ir::node::IntegerBaseFlags;
use garnet_ir::IntegerValue;
use num_bigint::BigInt;
use num_traits::{One, Zero};

/// Which suffixes a numeric token carries.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct NumericSuffix {
    pub rational: bool,
    pub imaginary: bool,
}

/// Split `1ri` into `1` and its suffixes.
pub fn split_suffix(raw: &[u8]) -> (&[u8], NumericSuffix) {
    let mut suffix = NumericSuffix::default();
    let mut body = raw;
    if let Some(rest) = body.strip_suffix(b"i") {
        suffix.imaginary = true;
        body = rest;
    }
    if let Some(rest) = body.strip_suffix(b"r") {
        suffix.rational = true;
        body = rest;
    }
    (body, suffix)
}

/// Value and base of an integer literal without suffixes.
pub fn integer_value(raw: &[u8]) -> (IntegerValue, IntegerBaseFlags) {
    let (digits, radix, base) = match raw {
        [b'0', b'x' | b'X', rest @ ..] => (rest, 16, IntegerBaseFlags::HEXADECIMAL),
        [b'0', b'b' | b'B', rest @ ..] => (rest, 2, IntegerBaseFlags::BINARY),
        [b'0', b'o' | b'O', rest @ ..] => (rest, 8, IntegerBaseFlags::OCTAL),
        [b'0', b'd' | b'D', rest @ ..] => (rest, 10, IntegerBaseFlags::DECIMAL),
        [b'0', b'_' | b'0'..=b'9', ..] => (&raw[1..], 8, IntegerBaseFlags::OCTAL),
        _ => (raw, 10, IntegerBaseFlags::DECIMAL),
    };
    let clean: Vec<u8> = digits.iter().copied().filter(|&b| b != b'_').collect();
    let value = IntegerValue::parse_digits(&clean, radix).unwrap_or_else(|| IntegerValue::from(0));
    (value, base)
}

/// Value of a float literal without suffixes. `None` when it overflows.
pub fn float_value(raw: &[u8]) -> Option<f64> {
    let clean: String = raw
        .iter()
        .filter(|&&b| b != b'_')
        .map(|&b| char::from(b))
        .collect();
    match clean.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => None,
    }
}

/// Numerator and denominator of a rational literal body (`1`, `1.5`),
/// reduced to lowest terms.
pub fn rational_value(raw: &[u8]) -> (IntegerValue, IntegerValue) {
    let Some(dot) = raw.iter().position(|&b| b == b'.') else {
        let (value, _) = integer_value(raw);
        return (value, IntegerValue::from(1));
    };
    let mut digits: Vec<u8> = raw[..dot].iter().copied().filter(|&b| b != b'_').collect();
    let fraction: Vec<u8> = raw[dot + 1..].iter().copied().filter(|&b| b != b'_').collect();
    digits.extend_from_slice(&fraction);

    let numerator = IntegerValue::parse_digits(&digits, 10)
        .map_or_else(BigInt::zero, |v| v.as_bigint().clone());
    let mut denominator = BigInt::one();
    for _ in 0..fraction.len() {
        denominator *= 10;
    }
    let divisor = gcd(numerator.clone(), denominator.clone());
    if divisor.is_zero() || divisor.is_one() {
        return (IntegerValue::new(numerator), IntegerValue::new(denominator));
    }
    (
        IntegerValue::new(numerator / &divisor),
        IntegerValue::new(denominator / &divisor),
    )
}

fn gcd(mut a: BigInt, mut b: BigInt) -> BigInt {
    while !b.is_zero() {
        let rem = &a % &b;
        a = b;
        b = rem;
    }
    a
}

#[cfg(test)]
mod tests;
