//! Per-node flag sets. All fit in a `u16` on the wire.

use bitflags::bitflags;

bitflags! {
    /// Flags on call nodes and their write/target variants.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct CallFlags: u16 {
        /// `&.` call operator.
        const SAFE_NAVIGATION = 1 << 0;
        /// Bare identifier that may also be a local read (`foo`).
        const VARIABLE_CALL = 1 << 1;
        /// Attribute write (`foo.bar = 1`, `foo[1] = 2`).
        const ATTRIBUTE_WRITE = 1 << 2;
        /// Receiver is `self`, so private methods are reachable.
        const IGNORE_VISIBILITY = 1 << 3;
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct ArgumentsFlags: u16 {
        const CONTAINS_FORWARDING = 1 << 0;
        const CONTAINS_KEYWORDS = 1 << 1;
        const CONTAINS_KEYWORD_SPLAT = 1 << 2;
        const CONTAINS_SPLAT = 1 << 3;
        const CONTAINS_MULTIPLE_SPLATS = 1 << 4;
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct ArrayFlags: u16 {
        const CONTAINS_SPLAT = 1 << 0;
    }
}

bitflags! {
    /// Encoding and mutability flags on string and xstring literals.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct StringFlags: u16 {
        /// A `\u` escape forced the value to UTF-8.
        const FORCED_UTF8_ENCODING = 1 << 0;
        /// Non-ASCII bytes from escapes forced the value to binary.
        const FORCED_BINARY_ENCODING = 1 << 1;
        /// `frozen_string_literal: true` is in effect.
        const FROZEN = 1 << 2;
        /// `frozen_string_literal: false` is in effect.
        const MUTABLE = 1 << 3;
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct SymbolFlags: u16 {
        const FORCED_UTF8_ENCODING = 1 << 0;
        const FORCED_BINARY_ENCODING = 1 << 1;
        /// Only ASCII bytes, so the symbol is US-ASCII regardless of the source.
        const FORCED_US_ASCII_ENCODING = 1 << 2;
    }
}

bitflags! {
    /// One bit per regexp suffix letter plus the forced-encoding bits.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct RegularExpressionFlags: u16 {
        /// `i`
        const IGNORE_CASE = 1 << 0;
        /// `x`
        const EXTENDED = 1 << 1;
        /// `m`
        const MULTI_LINE = 1 << 2;
        /// `o`
        const ONCE = 1 << 3;
        /// `e`
        const EUC_JP = 1 << 4;
        /// `n`
        const ASCII_8BIT = 1 << 5;
        /// `s`
        const WINDOWS_31J = 1 << 6;
        /// `u`
        const UTF_8 = 1 << 7;
        const FORCED_UTF8_ENCODING = 1 << 8;
        const FORCED_BINARY_ENCODING = 1 << 9;
        const FORCED_US_ASCII_ENCODING = 1 << 10;
    }
}

impl RegularExpressionFlags {
    /// Flag for a suffix letter, or `None` for an unknown letter.
    pub fn from_suffix(letter: u8) -> Option<Self> {
        Some(match letter {
            b'i' => Self::IGNORE_CASE,
            b'x' => Self::EXTENDED,
            b'm' => Self::MULTI_LINE,
            b'o' => Self::ONCE,
            b'e' => Self::EUC_JP,
            b'n' => Self::ASCII_8BIT,
            b's' => Self::WINDOWS_31J,
            b'u' => Self::UTF_8,
            _ => return None,
        })
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct IntegerBaseFlags: u16 {
        const BINARY = 1 << 0;
        const DECIMAL = 1 << 1;
        const OCTAL = 1 << 2;
        const HEXADECIMAL = 1 << 3;
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct LoopFlags: u16 {
        /// `begin ... end while cond`: body runs before the first check.
        const BEGIN_MODIFIER = 1 << 0;
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct RangeFlags: u16 {
        /// `...` rather than `..`.
        const EXCLUDE_END = 1 << 0;
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct ParameterFlags: u16 {
        /// Underscore-prefixed name appearing more than once.
        const REPEATED_PARAMETER = 1 << 0;
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct KeywordHashFlags: u16 {
        /// Every key is a plain symbol label.
        const SYMBOL_KEYS = 1 << 0;
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct InterpolatedStringFlags: u16 {
        const FROZEN = 1 << 0;
        const MUTABLE = 1 << 1;
    }
}
