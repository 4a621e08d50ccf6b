//! Literal payloads carried by nodes: string bytes, exact integers, floats.

use num_bigint::{BigInt, Sign};
use num_traits::{ToPrimitive, Zero};
use std::fmt;

use crate::Location;

/// The unescaped contents of a string-like literal.
///
/// When unescaping leaves the bytes identical to the source slice the
/// value is kept as a reference to that slice instead of a copy.
#[derive(Clone, Eq, PartialEq, Hash)]
pub enum StringValue {
    /// Same bytes as `source[location]`.
    Shared(Location),
    /// Bytes that differ from the source (escapes, dedent, line joins).
    Owned(Vec<u8>),
}

impl StringValue {
    /// Pick the cheapest representation for `bytes` found at `location`.
    pub fn from_source(source: &[u8], location: Location, bytes: Vec<u8>) -> Self {
        if location.slice(source) == Some(bytes.as_slice()) {
            StringValue::Shared(location)
        } else {
            StringValue::Owned(bytes)
        }
    }

    /// Resolve the value against the source it was parsed from.
    ///
    /// A shared value whose location falls outside `source` resolves to
    /// the empty slice; the deserializer rejects such locations up front.
    pub fn resolve<'a>(&'a self, source: &'a [u8]) -> &'a [u8] {
        match self {
            StringValue::Shared(loc) => loc.slice(source).unwrap_or_default(),
            StringValue::Owned(bytes) => bytes,
        }
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, StringValue::Shared(_))
    }
}

impl Default for StringValue {
    fn default() -> Self {
        StringValue::Owned(Vec::new())
    }
}

impl fmt::Debug for StringValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringValue::Shared(loc) => write!(f, "shared{loc:?}"),
            StringValue::Owned(bytes) => write!(f, "{:?}", String::from_utf8_lossy(bytes)),
        }
    }
}

/// An arbitrary-precision integer literal value.
#[derive(Clone, Eq, PartialEq, Hash, Default)]
pub struct IntegerValue(BigInt);

impl IntegerValue {
    pub fn new(value: BigInt) -> Self {
        IntegerValue(value)
    }

    /// Parse digits (no sign, no underscores) in `radix`.
    pub fn parse_digits(digits: &[u8], radix: u32) -> Option<Self> {
        if digits.is_empty() {
            return Some(IntegerValue::default());
        }
        BigInt::parse_bytes(digits, radix).map(IntegerValue)
    }

    /// Rebuild from the wire form: sign plus little-endian `u32` words.
    pub fn from_words(negative: bool, words: &[u32]) -> Self {
        let sign = if negative { Sign::Minus } else { Sign::Plus };
        IntegerValue(BigInt::from_slice(sign, words))
    }

    /// Wire form: sign plus little-endian `u32` words, least significant first.
    ///
    /// Zero encodes as no words.
    pub fn to_words(&self) -> (bool, Vec<u32>) {
        let (sign, words) = self.0.to_u32_digits();
        (sign == Sign::Minus, words)
    }

    #[must_use]
    pub fn negated(&self) -> Self {
        IntegerValue(-self.0.clone())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn to_i64(&self) -> Option<i64> {
        self.0.to_i64()
    }

    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }
}

impl From<i64> for IntegerValue {
    fn from(value: i64) -> Self {
        IntegerValue(BigInt::from(value))
    }
}

impl fmt::Debug for IntegerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for IntegerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A float literal, stored as bits so nodes can derive `Eq` and `Hash`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct FloatValue(u64);

impl FloatValue {
    pub fn new(value: f64) -> Self {
        FloatValue(value.to_bits())
    }

    pub fn from_bits(bits: u64) -> Self {
        FloatValue(bits)
    }

    pub fn bits(self) -> u64 {
        self.0
    }

    pub fn get(self) -> f64 {
        f64::from_bits(self.0)
    }
}

impl fmt::Debug for FloatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.get())
    }
}

#[cfg(test)]
mod tests;
